//! Configuration module
//!
//! Settings are read from the process environment (with `.env` support) once at
//! startup. Nothing here is consulted per request except through the values the
//! API copies into its state.

use std::env;
use std::path::PathBuf;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 4000;
const MAX_FILE_SIZE_MB: usize = 10;
const LOCAL_STORAGE_PATH: &str = "./data";
const OUTPUT_FORMAT: &str = "jpeg";
const IMAGE_QUALITY: &str = "better";
const AVATAR_SIZE: u32 = 256;
const PREVIEW_MAX_WIDTH: u32 = 640;
const PREVIEW_MAX_HEIGHT: u32 = 480;
const MAX_CONCURRENT_REQUESTS: usize = 64;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub local_storage_path: PathBuf,
    /// Create missing destination directories under the local root.
    pub local_storage_create_dirs: bool,
    /// Host part of remote addresses: `https://{blob_store_identifier}/{path}/{name}`.
    pub blob_store_identifier: Option<String>,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    // Image processing configuration
    pub max_file_size_bytes: usize,
    pub output_format: String,
    pub image_quality: String,
    pub avatar_size: u32,
    pub preview_max_width: u32,
    pub preview_max_height: u32,
    pub max_concurrent_requests: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            storage_backend: StorageBackend::Local,
            local_storage_path: PathBuf::from(LOCAL_STORAGE_PATH),
            local_storage_create_dirs: true,
            blob_store_identifier: None,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            max_file_size_bytes: megabytes_to_bytes(MAX_FILE_SIZE_MB),
            output_format: OUTPUT_FORMAT.to_string(),
            image_quality: IMAGE_QUALITY.to_string(),
            avatar_size: AVATAR_SIZE,
            preview_max_width: PREVIEW_MAX_WIDTH,
            preview_max_height: PREVIEW_MAX_HEIGHT,
            max_concurrent_requests: MAX_CONCURRENT_REQUESTS,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Oversized values clamp to `usize::MAX`.
fn megabytes_to_bytes(mb: usize) -> usize {
    mb.saturating_mul(1024 * 1024)
}

fn env_flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| v.trim().to_lowercase())
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse::<StorageBackend>()?,
            Err(_) => defaults.storage_backend,
        };

        let server_port = match env::var("PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            Err(_) => defaults.server_port,
        };

        let max_file_size_mb = env_parse("MAX_FILE_SIZE_MB", MAX_FILE_SIZE_MB);

        let config = Config {
            server_port,
            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("APP_ENV"))
                .unwrap_or(defaults.environment),
            storage_backend,
            local_storage_path: env::var("LOCAL_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.local_storage_path),
            local_storage_create_dirs: env_flag(
                "LOCAL_STORAGE_CREATE_DIRS",
                defaults.local_storage_create_dirs,
            ),
            blob_store_identifier: env::var("BLOB_STORE_IDENTIFIER").ok(),
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            max_file_size_bytes: megabytes_to_bytes(max_file_size_mb),
            output_format: env::var("OUTPUT_FORMAT")
                .map(|s| s.trim().to_lowercase())
                .unwrap_or(defaults.output_format),
            image_quality: env::var("IMAGE_QUALITY")
                .map(|s| s.trim().to_lowercase())
                .unwrap_or(defaults.image_quality),
            avatar_size: env_parse("AVATAR_SIZE", AVATAR_SIZE),
            preview_max_width: env_parse("PREVIEW_MAX_WIDTH", PREVIEW_MAX_WIDTH),
            preview_max_height: env_parse("PREVIEW_MAX_HEIGHT", PREVIEW_MAX_HEIGHT),
            max_concurrent_requests: env_parse("MAX_CONCURRENT_REQUESTS", MAX_CONCURRENT_REQUESTS),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that the settings required by the selected backend are present.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_backend == StorageBackend::Remote {
            if self.s3_bucket.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_BUCKET must be set when STORAGE_BACKEND=remote"
                ));
            }
            if self.s3_region.is_none() && self.s3_endpoint.is_none() {
                return Err(anyhow::anyhow!(
                    "S3_REGION (or AWS_REGION) or S3_ENDPOINT must be set when STORAGE_BACKEND=remote"
                ));
            }
        }

        if self.avatar_size == 0 || self.preview_max_width == 0 || self.preview_max_height == 0 {
            return Err(anyhow::anyhow!("Image dimensions must be greater than zero"));
        }

        if self.max_concurrent_requests == 0 {
            return Err(anyhow::anyhow!("MAX_CONCURRENT_REQUESTS must be greater than zero"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    /// Store identifier used in remote addresses. Falls back to the virtual-hosted
    /// S3 host for the configured bucket.
    pub fn remote_store_identifier(&self) -> Option<String> {
        if let Some(id) = &self.blob_store_identifier {
            return Some(id.trim_end_matches('/').to_string());
        }
        let bucket = self.s3_bucket.as_ref()?;
        match &self.s3_region {
            Some(region) => Some(format!("{}.s3.{}.amazonaws.com", bucket, region)),
            None => Some(bucket.clone()),
        }
    }
}
