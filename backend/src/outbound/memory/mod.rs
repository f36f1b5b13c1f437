//! In-process adapters for the document store and identity provider.
//!
//! These back the default server wiring and the behaviour tests. Every
//! conditional write (insert-if-empty, set union, set difference) runs under
//! the collection's lock, so concurrent callers observe a serial order.

mod document_store;
mod identity_provider;

pub use document_store::InMemoryDocumentStore;
pub use identity_provider::{InMemoryIdentityProvider, MIN_PASSWORD_LENGTH};
