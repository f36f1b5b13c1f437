//! Port for the `certifications` collection of the document store.

use async_trait::async_trait;

use crate::domain::{Certification, CertificationDraft};

use super::{SeedingResult, define_port_error};

define_port_error! {
    /// Persistence errors raised by certification repository adapters.
    pub enum CertificationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "certification repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "certification repository query failed: {message}",
    }
}

/// Port for reading certifications and seeding the collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificationRepository: Send + Sync {
    /// Every certification in stored order.
    async fn list(&self) -> Result<Vec<Certification>, CertificationPersistenceError>;

    /// Insert every draft with a fresh id when the collection is empty.
    async fn insert_all_if_empty(
        &self,
        drafts: Vec<CertificationDraft>,
    ) -> Result<SeedingResult, CertificationPersistenceError>;
}
