//! Content seeding configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

fn default_bundle_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("training-content")
        .join("bundle.json")
}

/// Configuration values controlling catalogue seeding at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRAINING_CONTENT")]
pub struct ContentSeedSettings {
    /// Seed empty collections on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Optional bundle path override.
    pub bundle_path: Option<PathBuf>,
}

impl ContentSeedSettings {
    /// Return the configured bundle path, falling back to the bundled fixture.
    pub fn bundle_path(&self) -> PathBuf {
        self.bundle_path.clone().unwrap_or_else(default_bundle_path)
    }
}
