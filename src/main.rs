// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use std::sync::Arc;

use anyhow::{Context, Result};
use hemascan_node::{
    api::{start_server, AppState},
    classifier::ClassifierSet,
    config::ServerConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        "🚀 Starting hemascan node (models: {})",
        config.models_dir.display()
    );

    // Model files are required at startup; a missing file aborts here rather
    // than surfacing as a request-time error.
    let classifiers = ClassifierSet::load(&config.models_dir)
        .await
        .context("Failed to load classifier models")?;

    let state = AppState {
        classifiers: Arc::new(classifiers),
    };

    let addr = config.socket_addr()?;
    start_server(state, addr).await
}
