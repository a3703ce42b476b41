//! imgpost Storage Library
//!
//! This crate provides the `StorageSink` abstraction and its two implementations:
//! a local filesystem sink and a remote blob sink backed by `object_store`.
//!
//! # Key format
//!
//! Both backends address an artifact by `{destination_path}/{name}`. The pipeline
//! generates both parts; sinks still reject keys containing `..`, empty segments,
//! backslashes, or a leading `/`. Key handling is centralized in the `keys` module.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-remote")]
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use factory::create_sink;
pub use imgpost_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalFilesystemSink;
#[cfg(feature = "storage-remote")]
pub use remote::RemoteBlobSink;
pub use traits::{StorageError, StorageResult, StorageSink};
