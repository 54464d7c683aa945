//! Application setup and initialization
//!
//! Everything here runs before the listener binds. A failure in any step aborts
//! startup, so a misconfigured storage provider never serves traffic.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::{AppState, DbState};
use anyhow::{Context, Result};
use std::sync::Arc;
use streamhub_core::Config;
use streamhub_db::{MediaRepository, UserRepository};

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry();
    tracing::info!(
        environment = %config.environment(),
        provider = %config.storage().provider,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let (gateway, local_files) = storage::setup_storage(&config).await?;

    let db = DbState {
        media_repository: Arc::new(MediaRepository::new(pool.clone())),
        user_repository: Arc::new(UserRepository::new(pool)),
    };
    let state = Arc::new(AppState::new(config.clone(), db, gateway, local_files));

    database::seed_host_user(&state, &config).await?;

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
