//! Application setup and initialization
//!
//! Initialization logic lives here rather than in main.rs so integration
//! tests can build the same router against temporary directories.

pub mod routes;
pub mod server;

use crate::state::AppState;
use anyhow::{Context, Result};
use lumen_core::Config;
use std::sync::Arc;

/// Initialize storage and routes; returns the shared state and the router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let state = Arc::new(
        AppState::new(config.clone())
            .await
            .context("Failed to initialize storage directories")?,
    );

    tracing::info!(
        upload_dir = %config.upload_dir,
        processed_dir = %config.processed_dir,
        retention_secs = config.retention_secs,
        "Storage initialized"
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
