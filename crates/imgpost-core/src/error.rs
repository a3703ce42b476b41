//! Error types module
//!
//! Every stage of the upload pipeline reports failures as an [`UploadError`].
//! Backend-specific errors (codec, filesystem, object store) are converted into
//! one of these variants before they leave the stage that produced them, so
//! callers only ever see the stable [`ErrorKind`] vocabulary plus a short message.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like bad image data
    Warn,
    /// Error level - for storage failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "EMPTY_PAYLOAD")
    fn error_code(&self) -> &'static str;

    /// Client-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Discriminant of [`UploadError`], used for matching and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Missing,
    Empty,
    PayloadTooLarge,
    WrongType,
    DecodeFailure,
    IoFailure,
    RemoteUnavailable,
    NameConflict,
}

impl ErrorKind {
    /// Input validation failures, reported to the caller as a bad request.
    pub fn is_validation(self) -> bool {
        matches!(
            self,
            ErrorKind::Missing | ErrorKind::Empty | ErrorKind::PayloadTooLarge | ErrorKind::WrongType
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("Image is null")]
    Missing,

    #[error("Invalid image length")]
    Empty,

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Content type is not image: {content_type}")]
    WrongType { content_type: String },

    #[error("Image could not be decoded: {0}")]
    DecodeFailure(String),

    #[error("Storage write failed: {0}")]
    IoFailure(String),

    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Object already exists: {0}")]
    NameConflict(String),
}

/// Result type for pipeline stages
pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UploadError::Missing => ErrorKind::Missing,
            UploadError::Empty => ErrorKind::Empty,
            UploadError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
            UploadError::WrongType { .. } => ErrorKind::WrongType,
            UploadError::DecodeFailure(_) => ErrorKind::DecodeFailure,
            UploadError::IoFailure(_) => ErrorKind::IoFailure,
            UploadError::RemoteUnavailable(_) => ErrorKind::RemoteUnavailable,
            UploadError::NameConflict(_) => ErrorKind::NameConflict,
        }
    }
}

impl ErrorMetadata for UploadError {
    fn http_status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Missing | ErrorKind::Empty | ErrorKind::WrongType => 400,
            ErrorKind::PayloadTooLarge => 413,
            ErrorKind::RemoteUnavailable => 503,
            ErrorKind::DecodeFailure | ErrorKind::IoFailure | ErrorKind::NameConflict => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Missing => "MISSING_PAYLOAD",
            ErrorKind::Empty => "EMPTY_PAYLOAD",
            ErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorKind::WrongType => "WRONG_CONTENT_TYPE",
            ErrorKind::DecodeFailure => "DECODE_FAILURE",
            ErrorKind::IoFailure => "IO_FAILURE",
            ErrorKind::RemoteUnavailable => "REMOTE_UNAVAILABLE",
            ErrorKind::NameConflict => "NAME_CONFLICT",
        }
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::Missing | UploadError::Empty | UploadError::PayloadTooLarge { .. } => {
                self.to_string()
            }
            UploadError::WrongType { .. } => "Content type is not image".to_string(),
            UploadError::DecodeFailure(_) => "Image could not be decoded".to_string(),
            UploadError::IoFailure(_) => "Failed to store image".to_string(),
            UploadError::RemoteUnavailable(_) => "Image storage is unavailable".to_string(),
            UploadError::NameConflict(_) => "Image name already taken, retry upload".to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self.kind() {
            kind if kind.is_validation() => LogLevel::Debug,
            ErrorKind::DecodeFailure | ErrorKind::NameConflict => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_kinds_map_to_bad_request() {
        for err in [
            UploadError::Missing,
            UploadError::Empty,
            UploadError::WrongType {
                content_type: "text/plain".to_string(),
            },
        ] {
            assert!(err.kind().is_validation());
            assert_eq!(err.http_status_code(), 400);
            assert_eq!(err.log_level(), LogLevel::Debug);
        }
    }

    #[test]
    fn test_pipeline_failures_map_to_server_errors() {
        let decode = UploadError::DecodeFailure("bad header".to_string());
        let io = UploadError::IoFailure("disk full".to_string());
        let remote = UploadError::RemoteUnavailable("connection refused".to_string());
        let conflict = UploadError::NameConflict("images/a.jpg".to_string());

        assert_eq!(decode.http_status_code(), 500);
        assert_eq!(io.http_status_code(), 500);
        assert_eq!(remote.http_status_code(), 503);
        assert_eq!(conflict.http_status_code(), 500);
        assert!(!remote.kind().is_validation());
    }

    #[test]
    fn test_client_message_hides_backend_detail() {
        let io = UploadError::IoFailure("/var/lib/imgpost/images: permission denied".to_string());
        assert!(!io.client_message().contains("/var/lib"));
        assert_eq!(UploadError::Empty.client_message(), "Invalid image length");
        assert_eq!(UploadError::Missing.client_message(), "Image is null");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let errors = [
            UploadError::Missing,
            UploadError::Empty,
            UploadError::PayloadTooLarge { size: 2, max: 1 },
            UploadError::WrongType {
                content_type: String::new(),
            },
            UploadError::DecodeFailure(String::new()),
            UploadError::IoFailure(String::new()),
            UploadError::RemoteUnavailable(String::new()),
            UploadError::NameConflict(String::new()),
        ];
        let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.error_code()).collect();
        assert_eq!(codes.len(), errors.len());
    }
}
