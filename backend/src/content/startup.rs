//! Startup seeding orchestration.

use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;
use training_content::{BundleError, ContentBundle};

use crate::content::config::ContentSeedSettings;
use crate::domain::ports::ContentSeedCommand;
use crate::domain::{ContentSeedOutcome, Error};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Bundle file could not be read.
    #[error("failed to read content bundle at {path}: {source}")]
    BundleRead {
        /// Path to the bundle file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Bundle parsing or validation failed.
    #[error("content bundle error: {0}")]
    Bundle(#[from] BundleError),
    /// Conversion or persistence failed.
    #[error("content seeding error: {0}")]
    Seeding(#[from] Error),
}

/// Apply the configured content bundle on startup when enabled.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use nicu_training::content::{ContentSeedSettings, seed_content_on_startup};
/// use nicu_training::domain::ContentSeeder;
/// use nicu_training::outbound::memory::InMemoryDocumentStore;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryDocumentStore::new());
/// let seeder = ContentSeeder::new(store.clone(), store);
/// let settings = ContentSeedSettings {
///     enabled: false,
///     bundle_path: None,
/// };
/// let outcome = seed_content_on_startup(&settings, &seeder).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_content_on_startup(
    settings: &ContentSeedSettings,
    seeder: &dyn ContentSeedCommand,
) -> Result<Option<ContentSeedOutcome>, StartupSeedingError> {
    if !settings.enabled {
        info!(reason = "disabled", "content seeding skipped");
        return Ok(None);
    }

    let path = settings.bundle_path();
    let bundle = load_bundle(&path)?;
    info!(
        path = %path.display(),
        modules = bundle.modules().len(),
        certifications = bundle.certifications().len(),
        "content bundle loaded"
    );
    let outcome = seeder.seed(&bundle).await?;
    Ok(Some(outcome))
}

/// Read and validate a bundle through a capability handle on its directory.
///
/// # Errors
///
/// [`StartupSeedingError::BundleRead`] for I/O or encoding failures and
/// [`StartupSeedingError::Bundle`] for invalid content.
pub fn load_bundle(path: &Path) -> Result<ContentBundle, StartupSeedingError> {
    let read_error = |source| StartupSeedingError::BundleRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "bundle path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(ContentBundle::from_json(&contents)?)
}
