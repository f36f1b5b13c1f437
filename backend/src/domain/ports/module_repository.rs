//! Port for the `modules` collection of the document store.

use async_trait::async_trait;

use crate::domain::{ModuleCompletion, ModuleId, TrainingModule, TrainingModuleDraft};

use super::{SeedingResult, define_port_error};

define_port_error! {
    /// Persistence errors raised by module repository adapters.
    pub enum ModulePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "module repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "module repository query failed: {message}",
    }
}

/// Port for reading the module catalogue and recording completions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleRepository: Send + Sync {
    /// Every module in catalogue order.
    async fn list(&self) -> Result<Vec<TrainingModule>, ModulePersistenceError>;

    /// Fetch a module by id.
    async fn find_by_id(
        &self,
        id: &ModuleId,
    ) -> Result<Option<TrainingModule>, ModulePersistenceError>;

    /// Write the completion flag, score and date in one update.
    ///
    /// Returns the updated module, or `None` when the id is unknown. Any
    /// earlier completion is replaced.
    async fn record_completion(
        &self,
        id: &ModuleId,
        completion: ModuleCompletion,
    ) -> Result<Option<TrainingModule>, ModulePersistenceError>;

    /// Insert every draft with a fresh id when the collection is empty.
    ///
    /// Drafts are written as one batch; a non-empty collection is left as is.
    async fn insert_all_if_empty(
        &self,
        drafts: Vec<TrainingModuleDraft>,
    ) -> Result<SeedingResult, ModulePersistenceError>;
}
