//! HTTP inbound adapter exposing the REST endpoints under `/api/v1`.
//!
//! Handlers depend only on the driving ports bundled in [`state::HttpState`]
//! and identify callers through the cookie session in [`session`].

pub mod access;
pub mod accounts;
pub mod admin;
pub mod dashboard;
pub mod error;
pub mod modules;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;
