//! Driving port for recording module completions.

use async_trait::async_trait;

use crate::domain::{Error, ModuleId, TrainingModule};

/// Domain use-case port for completing modules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModuleCompletionCommand: Send + Sync {
    /// Mark the module completed today with `score`.
    ///
    /// Scores are stored as given; range checks belong to the caller.
    async fn complete_module(&self, module_id: &ModuleId, score: i32)
    -> Result<TrainingModule, Error>;
}
