//! NICU respiratory therapy training backend.
//!
//! Hexagonal layout: [`domain`] holds the entities, progress aggregation and
//! services; [`outbound`] implements the storage and identity ports;
//! [`inbound`] exposes the REST surface; [`server`] wires them together.

pub mod content;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
