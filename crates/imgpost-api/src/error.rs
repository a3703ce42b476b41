//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Upload failures keep the status,
//! client message and log level their `ErrorMetadata` gives them; request
//! problems caught before the pipeline runs are plain bad requests.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use imgpost_core::{ErrorMetadata, LogLevel, UploadError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "errorText")]
    pub error_text: String,
}

impl ErrorResponse {
    pub fn new(error_text: impl Into<String>) -> Self {
        Self {
            error_text: error_text.into(),
        }
    }
}

#[derive(Debug)]
pub enum HttpAppError {
    Upload(UploadError),
    /// Malformed request that never reached the pipeline
    Request { status: StatusCode, message: String },
}

impl HttpAppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpAppError::Request {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpAppError::Upload(err) => StatusCode::from_u16(err.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            HttpAppError::Request { status, .. } => *status,
        }
    }
}

impl From<UploadError> for HttpAppError {
    fn from(err: UploadError) -> Self {
        HttpAppError::Upload(err)
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        HttpAppError::Request {
            status: err.status(),
            message: err.body_text(),
        }
    }
}

/// A body that is not multipart form data carries no image at all.
impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Upload body is not multipart");
        HttpAppError::Upload(UploadError::Missing)
    }
}

fn log_error(error: &UploadError) {
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code = error_code, "Upload rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_code = error_code, "Upload failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_code = error_code, "Upload failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            HttpAppError::Upload(err) => {
                log_error(err);
                err.client_message()
            }
            HttpAppError::Request { message, .. } => {
                tracing::debug!(status = status.as_u16(), error = %message, "Bad upload request");
                message.clone()
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
