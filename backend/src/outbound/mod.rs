//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and the storage or
//! identity backend. They contain no business logic beyond the atomic
//! conditional writes the ports ask for.
//!
//! - **memory**: in-process document store and identity provider used by the
//!   default server wiring and the behaviour tests.

pub mod memory;
