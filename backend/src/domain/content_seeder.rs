//! Catalogue seeding orchestration.
//!
//! Converts validated content-bundle records into domain drafts, then asks
//! each repository to insert them only if its collection is empty. The two
//! collections are seeded independently, modules first, so a failure on the
//! second leaves the first applied.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use training_content::{
    CategorySeed, CertificationSeed, CertificationStatusSeed, ContentBundle, ModuleSeed,
};

use crate::domain::ports::{
    CertificationPersistenceError, CertificationRepository, ContentSeedCommand,
    ModulePersistenceError, ModuleRepository, SeedingResult,
};
use crate::domain::{
    CertificationDraft, CertificationStatus, CertificationValidationError, Error,
    ModuleCategory, ModuleCompletion, TrainingModuleDraft, TrainingModuleValidationError,
};

/// Per-collection outcome of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSeedOutcome {
    /// Outcome for `modules`.
    pub modules: SeedingResult,
    /// Outcome for `certifications`.
    pub certifications: SeedingResult,
}

/// Errors raised while preparing or applying a content bundle.
#[derive(Debug, Error)]
pub enum ContentSeedError {
    /// A module record failed domain validation.
    #[error("module {index} failed validation: {source}")]
    InvalidModule {
        /// Position in the bundle.
        index: usize,
        /// Validation failure.
        source: TrainingModuleValidationError,
    },
    /// A certification record failed domain validation.
    #[error("certification {index} failed validation: {source}")]
    InvalidCertification {
        /// Position in the bundle.
        index: usize,
        /// Validation failure.
        source: CertificationValidationError,
    },
    /// Module persistence failed.
    #[error(transparent)]
    Modules(#[from] ModulePersistenceError),
    /// Certification persistence failed.
    #[error(transparent)]
    Certifications(#[from] CertificationPersistenceError),
}

impl From<ContentSeedError> for Error {
    fn from(value: ContentSeedError) -> Self {
        match value {
            err @ (ContentSeedError::InvalidModule { .. }
            | ContentSeedError::InvalidCertification { .. }) => {
                Error::invalid_request(err.to_string())
            }
            ContentSeedError::Modules(err @ ModulePersistenceError::Connection { .. }) => {
                Error::service_unavailable(err.to_string())
            }
            ContentSeedError::Certifications(
                err @ CertificationPersistenceError::Connection { .. },
            ) => Error::service_unavailable(err.to_string()),
            ContentSeedError::Modules(err) => Error::internal(err.to_string()),
            ContentSeedError::Certifications(err) => Error::internal(err.to_string()),
        }
    }
}

/// Service that applies content bundles to the document store.
#[derive(Clone)]
pub struct ContentSeeder<M, C> {
    modules: Arc<M>,
    certifications: Arc<C>,
}

impl<M, C> ContentSeeder<M, C> {
    /// Create a seeder over the module and certification repositories.
    pub fn new(modules: Arc<M>, certifications: Arc<C>) -> Self {
        Self {
            modules,
            certifications,
        }
    }
}

impl<M, C> ContentSeeder<M, C>
where
    M: ModuleRepository,
    C: CertificationRepository,
{
    /// Seed every empty collection from `bundle`.
    ///
    /// All records are converted before anything is written, so a validation
    /// failure leaves both collections untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ContentSeedError`] when a record is invalid or a repository
    /// fails.
    pub async fn seed_bundle(
        &self,
        bundle: &ContentBundle,
    ) -> Result<ContentSeedOutcome, ContentSeedError> {
        let modules = bundle
            .modules()
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                convert_module(seed).map_err(|source| ContentSeedError::InvalidModule {
                    index,
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let certifications = bundle
            .certifications()
            .iter()
            .enumerate()
            .map(|(index, seed)| {
                convert_certification(seed).map_err(|source| {
                    ContentSeedError::InvalidCertification { index, source }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let modules = self.modules.insert_all_if_empty(modules).await?;
        log_outcome("modules", modules);
        let certifications = self
            .certifications
            .insert_all_if_empty(certifications)
            .await?;
        log_outcome("certifications", certifications);

        Ok(ContentSeedOutcome {
            modules,
            certifications,
        })
    }
}

#[async_trait]
impl<M, C> ContentSeedCommand for ContentSeeder<M, C>
where
    M: ModuleRepository,
    C: CertificationRepository,
{
    async fn seed(&self, bundle: &ContentBundle) -> Result<ContentSeedOutcome, Error> {
        Ok(self.seed_bundle(bundle).await?)
    }
}

fn log_outcome(collection: &str, result: SeedingResult) {
    match result {
        SeedingResult::Applied { inserted } => info!(collection, inserted, "collection seeded"),
        SeedingResult::AlreadySeeded => {
            info!(collection, "collection already populated; skipping seed");
        }
    }
}

fn convert_module(seed: &ModuleSeed) -> Result<TrainingModuleDraft, TrainingModuleValidationError> {
    let mut draft = TrainingModuleDraft::new(
        seed.title.clone(),
        seed.description.clone(),
        map_category(seed.category),
        seed.duration_minutes,
        seed.required,
    )?;
    if let Some(due) = seed.due_date {
        draft = draft.with_due_date(due);
    }
    if let Some(completion) = seed.completion {
        draft = draft.with_completion(ModuleCompletion::new(
            completion.score,
            completion.completed_on,
        ));
    }
    Ok(draft)
}

fn convert_certification(
    seed: &CertificationSeed,
) -> Result<CertificationDraft, CertificationValidationError> {
    CertificationDraft::new(
        seed.name.clone(),
        seed.issue_date,
        seed.expiry_date,
        map_status(seed.status),
    )
}

fn map_category(category: CategorySeed) -> ModuleCategory {
    match category {
        CategorySeed::Ventilation => ModuleCategory::Ventilation,
        CategorySeed::Equipment => ModuleCategory::Equipment,
        CategorySeed::Procedures => ModuleCategory::Procedures,
        CategorySeed::Safety => ModuleCategory::Safety,
        CategorySeed::Protocols => ModuleCategory::Protocols,
    }
}

fn map_status(status: CertificationStatusSeed) -> CertificationStatus {
    match status {
        CertificationStatusSeed::Active => CertificationStatus::Active,
        CertificationStatusSeed::Expiring => CertificationStatus::Expiring,
        CertificationStatusSeed::Expired => CertificationStatus::Expired,
    }
}
