//! Error types module
//!
//! This module provides the core error types used throughout the Lumen
//! application. All errors are unified under the `AppError` enum which can
//! represent upload validation, filter, storage, and internal errors.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNKNOWN_FILTER")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    #[error("Empty file")]
    EmptyFile,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Image too large: {0}")]
    ImageTooLarge(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Filter '{filter}' failed: {message}")]
    Filter { filter: String, message: String },

    #[error("Failed to save processed image: {0}")]
    SaveFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

// Error conversion implementations
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
/// Reduces duplication in the ErrorMetadata impl; client_message stays per-variant for dynamic content.
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::MissingField(_) => (
            400,
            "MISSING_FIELD",
            false,
            Some("Include both an image file and a filter name"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidRequest(_) => (
            400,
            "INVALID_REQUEST",
            false,
            Some("Check the request body and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedFormat(_) => (
            400,
            "UNSUPPORTED_FORMAT",
            false,
            Some("Upload a png, jpg, jpeg, gif, bmp, tiff or webp file"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnknownFilter(_) => (
            400,
            "UNKNOWN_FILTER",
            false,
            Some("Use GET /filters to list valid filter names"),
            false,
            LogLevel::Debug,
        ),
        AppError::EmptyFile => (
            400,
            "EMPTY_FILE",
            false,
            Some("Upload a non-empty image file"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidImage(_) => (
            400,
            "INVALID_IMAGE",
            false,
            Some("Check the file is a valid image and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::ImageTooLarge(_) => (
            400,
            "IMAGE_TOO_LARGE",
            false,
            Some("Resize the image below 10000x10000 pixels"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidParameter(_) => (
            400,
            "INVALID_PARAMETER",
            false,
            Some("Check the parameter value and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::Filter { .. } => (
            400,
            "FILTER_ERROR",
            false,
            Some("Try a different file or filter"),
            false,
            LogLevel::Warn,
        ),
        AppError::SaveFailed(_) => (
            500,
            "SAVE_FAILED",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the filename exists; files expire after one hour"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size below 16MB"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::MissingField(_) => "MissingField",
            AppError::InvalidRequest(_) => "InvalidRequest",
            AppError::UnsupportedFormat(_) => "UnsupportedFormat",
            AppError::UnknownFilter(_) => "UnknownFilter",
            AppError::EmptyFile => "EmptyFile",
            AppError::InvalidImage(_) => "InvalidImage",
            AppError::ImageTooLarge(_) => "ImageTooLarge",
            AppError::InvalidParameter(_) => "InvalidParameter",
            AppError::Filter { .. } => "FilterError",
            AppError::SaveFailed(_) => "SaveFailed",
            AppError::NotFound(_) => "NotFound",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::MissingField(field) => format!("No {} provided", field),
            AppError::InvalidRequest(ref msg) => msg.clone(),
            AppError::UnsupportedFormat(ref msg) => msg.clone(),
            AppError::UnknownFilter(ref msg) => msg.clone(),
            AppError::EmptyFile => "Empty file".to_string(),
            AppError::InvalidImage(ref msg) => format!("Invalid image file: {}", msg),
            AppError::ImageTooLarge(ref msg) => msg.clone(),
            AppError::InvalidParameter(ref msg) => msg.clone(),
            AppError::Filter { filter, message } => {
                format!("Filter processing failed: {} ({})", message, filter)
            }
            AppError::SaveFailed(_) => "Failed to save processed image".to_string(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}
