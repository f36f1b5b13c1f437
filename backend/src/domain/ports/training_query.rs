//! Driving port for catalogue and dashboard reads.

use async_trait::async_trait;

use crate::domain::{
    Certification, Error, ModuleQuery, ProgressStats, TrainingModule, UpcomingModule,
};

/// Domain use-case port for training read models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TrainingQuery: Send + Sync {
    /// Modules matching `query`, in catalogue order.
    async fn list_modules(&self, query: ModuleQuery) -> Result<Vec<TrainingModule>, Error>;

    /// Pending modules with a due date, earliest first.
    async fn upcoming_modules(&self, limit: Option<usize>) -> Result<Vec<UpcomingModule>, Error>;

    /// Most recently completed modules, newest first.
    async fn recently_completed(&self, limit: usize) -> Result<Vec<TrainingModule>, Error>;

    /// Dashboard figures as of today.
    async fn progress(&self) -> Result<ProgressStats, Error>;

    /// Every stored certification.
    async fn certifications(&self) -> Result<Vec<Certification>, Error>;
}
