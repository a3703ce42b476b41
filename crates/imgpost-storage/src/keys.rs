//! Shared key handling for storage sinks.
//!
//! Key format: `{destination_path}/{name}`, with `/` as the only separator.

use crate::traits::{StorageError, StorageResult};

/// Build and validate the storage key for an artifact.
///
/// Rejects traversal (`..`), absolute paths, backslashes, and empty segments so a
/// key can never resolve outside the sink's root.
pub fn storage_key(destination_path: &str, name: &str) -> StorageResult<String> {
    if name.is_empty() || name.contains('/') {
        return Err(StorageError::InvalidKey(format!("invalid file name: {:?}", name)));
    }

    let destination = destination_path.trim_end_matches('/');
    let key = if destination.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", destination, name)
    };

    if key.starts_with('/') || key.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    if key
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(format!(
            "Storage key has an invalid segment: {}",
            key
        )));
    }

    Ok(key)
}
