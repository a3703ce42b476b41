//! Types for the upload pipeline.

use bytes::Bytes;
use imgpost_core::ErrorKind;
use std::fmt;

/// One upload as received from the caller.
#[derive(Clone, Debug)]
pub struct UploadRequest<K> {
    /// `None` when the caller supplied no payload at all.
    pub data: Option<Bytes>,
    pub content_type: String,
    pub kind: K,
}

impl<K> UploadRequest<K> {
    pub fn new(data: Option<Bytes>, content_type: impl Into<String>, kind: K) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            kind,
        }
    }

    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, Bytes::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Transformed bytes and their address, ready to be moved into a sink.
#[derive(Clone, Debug)]
pub struct StoredArtifact {
    pub generated_name: String,
    pub destination_path: &'static str,
    pub payload: Bytes,
}

/// Returned for a completed upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadReceipt {
    pub file_name: String,
    pub destination_path: String,
    /// Where the sink put the artifact (filesystem path or URL)
    pub location: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadStage {
    Received,
    Validated,
    Named,
    Transformed,
    Stored,
    Completed,
    Failed(ErrorKind),
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Received => write!(f, "received"),
            UploadStage::Validated => write!(f, "validated"),
            UploadStage::Named => write!(f, "named"),
            UploadStage::Transformed => write!(f, "transformed"),
            UploadStage::Stored => write!(f, "stored"),
            UploadStage::Completed => write!(f, "completed"),
            UploadStage::Failed(kind) => write!(f, "failed({:?})", kind),
        }
    }
}
