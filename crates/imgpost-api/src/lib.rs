//! imgpost HTTP API
//!
//! Exposes the upload pipeline as `POST /api/ImageUpload`.

pub mod error;
pub mod handlers;
pub mod image_type;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use image_type::ImageType;
