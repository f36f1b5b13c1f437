//! Startup wiring for catalogue seeding from a content bundle.

mod config;
mod startup;

pub use config::ContentSeedSettings;
pub use startup::{StartupSeedingError, load_bundle, seed_content_on_startup};
