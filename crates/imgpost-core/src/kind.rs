//! Image kind abstraction
//!
//! An image kind is a closed, caller-defined tag (e.g. avatar, preview, post image)
//! that selects the transformation and the destination folder for an upload.

use std::fmt::Debug;
use std::hash::Hash;

/// Closed set of image categories accepted by the upload pipeline.
///
/// Implementors are plain enums. The destination path must be a constant per
/// variant: it is joined into storage keys and never derived from request data.
pub trait ImageKind: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Logical folder this kind is stored under (e.g. `"images/avatars"`).
    fn destination_path(&self) -> &'static str;
}
