//! Storage setup and initialization

use anyhow::{Context, Result};
use imgpost_core::Config;
use imgpost_storage::{create_sink, StorageSink};
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn StorageSink>> {
    tracing::info!(backend = %config.storage_backend, "Initializing storage sink...");

    let sink = create_sink(config)
        .await
        .context("Failed to initialize storage sink")?;

    tracing::info!(
        backend = %sink.backend_type(),
        "Storage sink initialized successfully"
    );

    Ok(sink)
}
