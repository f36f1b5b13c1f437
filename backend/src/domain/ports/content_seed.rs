//! Driving port for loading catalogue content.

use async_trait::async_trait;
use training_content::ContentBundle;

use crate::domain::{ContentSeedOutcome, Error};

/// Domain use-case port for seeding the module and certification
/// collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentSeedCommand: Send + Sync {
    /// Apply `bundle` to each empty collection; non-empty ones are skipped.
    async fn seed(&self, bundle: &ContentBundle) -> Result<ContentSeedOutcome, Error>;
}
