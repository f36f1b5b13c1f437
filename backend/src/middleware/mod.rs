//! Request middleware shared by every route.
//!
//! [`Trace`] gives each request a correlation id that error payloads and log
//! lines carry.

pub mod trace;

pub use trace::Trace;
