//! Backend entry-point: loads settings, seeds content and serves the REST API.

use std::ffi::OsString;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use nicu_training::content::{ContentSeedSettings, seed_content_on_startup};
use nicu_training::domain::ports::IdentityProvider;
use nicu_training::server::{
    Backends, BuildMode, ServerConfig, ServerSettings, build_http_state, create_server,
    log_session_events,
};

const PROGRAM_NAME: &str = "nicu-training";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // Settings come from the environment only; the binary takes no flags.
    let server_settings = ServerSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|e| eyre!("failed to load server settings: {e}"))?;
    let seed_settings = ContentSeedSettings::load_from_iter([OsString::from(PROGRAM_NAME)])
        .map_err(|e| eyre!("failed to load content seeding settings: {e}"))?;
    let config = ServerConfig::from_settings(&server_settings, BuildMode::from_debug_assertions())
        .wrap_err("invalid server configuration")?;

    let backends = Backends::default();
    actix_web::rt::spawn(log_session_events(backends.identity.subscribe()));
    let http_state = build_http_state(&backends);
    if let Some(outcome) = seed_content_on_startup(&seed_settings, http_state.content.as_ref())
        .await
        .wrap_err("startup content seeding failed")?
    {
        info!(
            modules = ?outcome.modules,
            certifications = ?outcome.certifications,
            "startup content seeding finished"
        );
    }

    let bind_addr = config.bind_addr();
    let server = create_server(http_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated with an error")
}
