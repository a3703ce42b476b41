//! Application setup and initialization

pub mod routes;
pub mod server;
pub mod storage;

use crate::image_type::build_transformer;
use crate::state::AppState;
use anyhow::{Context, Result};
use imgpost_core::Config;
use imgpost_processing::{UploadPipeline, UploadValidator};
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config);

    tracing::info!(
        environment = %config.environment,
        storage_backend = %config.storage_backend,
        "Configuration loaded and validated successfully"
    );

    let sink = storage::setup_storage(&config).await?;

    let transformer = build_transformer(&config).context("Invalid image output settings")?;
    tracing::info!(
        output_format = ?transformer.output_format(),
        quality = ?transformer.quality(),
        "Image transformer initialized"
    );

    let pipeline = UploadPipeline::new(
        UploadValidator::with_max_file_size(config.max_file_size_bytes),
        Arc::new(transformer),
        sink,
    );

    let state = Arc::new(AppState { pipeline });

    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
