//! Route configuration and setup

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use imgpost_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Room for multipart boundaries and the text fields around the image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub const IMAGE_UPLOAD_PATH: &str = "/api/ImageUpload";

/// Transport limit for an upload request body.
fn body_limit(config: &Config) -> usize {
    config
        .max_file_size_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES)
}

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    let body_limit = body_limit(config);

    let upload_routes = Router::new()
        .route(IMAGE_UPLOAD_PATH, post(handlers::image_upload::upload_image))
        // The body limit below replaces axum's 2 MB default.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(ConcurrencyLimitLayer::new(config.max_concurrent_requests))
        .with_state(state);

    Router::new()
        .route("/health", get(handlers::health::health))
        .merge(upload_routes)
        .layer(TraceLayer::new_for_http())
}
