//! Catalogue reads, dashboard stats and module completion.
//!
//! "Today" comes from the injected clock as a UTC calendar date and is then
//! handed to the pure functions in [`crate::domain::progress`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    CertificationPersistenceError, CertificationRepository, ModuleCompletionCommand,
    ModulePersistenceError, ModuleRepository, TrainingQuery,
};
use crate::domain::{
    Certification, Error, ModuleCompletion, ModuleId, ModuleQuery, ProgressStats, TrainingModule,
    UpcomingModule, recently_completed, upcoming_modules,
};

/// Errors raised by the training service.
#[derive(Debug, Error)]
pub enum TrainingServiceError {
    /// The module catalogue failed.
    #[error(transparent)]
    Modules(#[from] ModulePersistenceError),
    /// The certification store failed.
    #[error(transparent)]
    Certifications(#[from] CertificationPersistenceError),
    /// No module exists for the id.
    #[error("module {module_id} not found")]
    ModuleNotFound {
        /// Missing module.
        module_id: ModuleId,
    },
}

impl From<TrainingServiceError> for Error {
    fn from(value: TrainingServiceError) -> Self {
        match value {
            TrainingServiceError::Modules(err @ ModulePersistenceError::Connection { .. }) => {
                Error::service_unavailable(err.to_string())
            }
            TrainingServiceError::Certifications(
                err @ CertificationPersistenceError::Connection { .. },
            ) => Error::service_unavailable(err.to_string()),
            TrainingServiceError::Modules(err) => Error::internal(err.to_string()),
            TrainingServiceError::Certifications(err) => Error::internal(err.to_string()),
            err @ TrainingServiceError::ModuleNotFound { .. } => Error::not_found(err.to_string()),
        }
    }
}

/// Read model and completion service over the module and certification
/// collections.
#[derive(Clone)]
pub struct TrainingService<M, C> {
    modules: Arc<M>,
    certifications: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<M, C> TrainingService<M, C> {
    /// Create a service over the catalogue, certifications and a clock.
    pub fn new(modules: Arc<M>, certifications: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            modules,
            certifications,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

impl<M, C> TrainingService<M, C>
where
    M: ModuleRepository,
    C: CertificationRepository,
{
    /// Dashboard stats as of today.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingServiceError::Modules`] when the catalogue fails.
    pub async fn stats(&self) -> Result<ProgressStats, TrainingServiceError> {
        let modules = self.modules.list().await?;
        Ok(ProgressStats::from_modules(&modules, self.today()))
    }

    /// Modules matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingServiceError::Modules`] when the catalogue fails.
    pub async fn modules(
        &self,
        query: ModuleQuery,
    ) -> Result<Vec<TrainingModule>, TrainingServiceError> {
        let modules = self.modules.list().await?;
        Ok(query.apply(&modules))
    }

    /// Pending dated modules, earliest first, with their due status.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingServiceError::Modules`] when the catalogue fails.
    pub async fn upcoming(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<UpcomingModule>, TrainingServiceError> {
        let modules = self.modules.list().await?;
        let today = self.today();
        let views = upcoming_modules(&modules)
            .into_iter()
            .filter_map(|module| UpcomingModule::from_module(module, today));
        Ok(match limit {
            Some(limit) => views.take(limit).collect(),
            None => views.collect(),
        })
    }

    /// The `limit` most recently completed modules.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingServiceError::Modules`] when the catalogue fails.
    pub async fn recent(&self, limit: usize) -> Result<Vec<TrainingModule>, TrainingServiceError> {
        let modules = self.modules.list().await?;
        Ok(recently_completed(&modules, limit))
    }

    /// Every stored certification.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingServiceError::Certifications`] when the store fails.
    pub async fn all_certifications(&self) -> Result<Vec<Certification>, TrainingServiceError> {
        Ok(self.certifications.list().await?)
    }

    /// Mark a module completed today with `score`.
    ///
    /// Completing an already completed module replaces its score and date.
    ///
    /// # Errors
    ///
    /// Returns [`TrainingServiceError::ModuleNotFound`] for unknown ids.
    pub async fn complete(
        &self,
        module_id: &ModuleId,
        score: i32,
    ) -> Result<TrainingModule, TrainingServiceError> {
        let completion = ModuleCompletion::new(score, self.today());
        let module = self
            .modules
            .record_completion(module_id, completion)
            .await?
            .ok_or_else(|| TrainingServiceError::ModuleNotFound {
                module_id: module_id.clone(),
            })?;
        info!(module_id = %module_id, score, "module completed");
        Ok(module)
    }
}

#[async_trait]
impl<M, C> TrainingQuery for TrainingService<M, C>
where
    M: ModuleRepository,
    C: CertificationRepository,
{
    async fn list_modules(&self, query: ModuleQuery) -> Result<Vec<TrainingModule>, Error> {
        Ok(self.modules(query).await?)
    }

    async fn upcoming_modules(&self, limit: Option<usize>) -> Result<Vec<UpcomingModule>, Error> {
        Ok(self.upcoming(limit).await?)
    }

    async fn recently_completed(&self, limit: usize) -> Result<Vec<TrainingModule>, Error> {
        Ok(self.recent(limit).await?)
    }

    async fn progress(&self) -> Result<ProgressStats, Error> {
        Ok(self.stats().await?)
    }

    async fn certifications(&self) -> Result<Vec<Certification>, Error> {
        Ok(self.all_certifications().await?)
    }
}

#[async_trait]
impl<M, C> ModuleCompletionCommand for TrainingService<M, C>
where
    M: ModuleRepository,
    C: CertificationRepository,
{
    async fn complete_module(
        &self,
        module_id: &ModuleId,
        score: i32,
    ) -> Result<TrainingModule, Error> {
        Ok(self.complete(module_id, score).await?)
    }
}

#[cfg(test)]
#[path = "training_service_tests.rs"]
mod tests;
