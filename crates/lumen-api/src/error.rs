//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for AppError.
//!
//! **Preferred handler pattern:** Return `Result<impl IntoResponse, HttpAppError>`.
//! Use `AppError` (or the per-crate domain errors, which convert via `From`)
//! and `?` so they become `HttpAppError` and render consistently (status,
//! body, logging).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lumen_core::{AppError, ErrorMetadata, LogLevel};
use lumen_processing::{CodecError, FilterError, ValidationError};
use lumen_storage::StorageError;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from lumen-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;
        let is_production = is_production_env();

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Always hide details in production for security; in non-production,
        // only show details for non-sensitive errors.
        let body = if is_production || app_error.is_sensitive() {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: None,
                error_type: None,
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        } else {
            Json(ErrorResponse {
                error: app_error.client_message(),
                details: Some(app_error.detailed_message()),
                error_type: Some(app_error.error_type().to_string()),
                code: app_error.error_code().to_string(),
                recoverable: app_error.is_recoverable(),
                suggested_action: app_error.suggested_action().map(String::from),
            })
        };

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::NotFound(msg) => AppError::NotFound(format!("File not found: {}", msg)),
            StorageError::InvalidFilename(msg) => AppError::NotFound(msg),
            StorageError::WriteFailed(msg) => AppError::SaveFailed(msg),
            StorageError::ReadFailed(msg) => AppError::Internal(msg),
            StorageError::DeleteFailed(msg) => AppError::Internal(msg),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
        };
        HttpAppError(app)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::EmptyFile => AppError::EmptyFile,
            ValidationError::FileTooLarge { size, max } => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            ValidationError::MissingFilename => {
                AppError::UnsupportedFormat("No file selected".to_string())
            }
            err @ ValidationError::InvalidExtension { .. } => {
                AppError::UnsupportedFormat(err.to_string())
            }
            err @ ValidationError::ImageTooLarge { .. } => AppError::ImageTooLarge(err.to_string()),
        };
        HttpAppError(app)
    }
}

impl From<FilterError> for HttpAppError {
    fn from(err: FilterError) -> Self {
        let app = match err {
            err @ FilterError::UnsupportedFilter { .. } => AppError::UnknownFilter(err.to_string()),
            err @ FilterError::InvalidParameter { .. } => {
                AppError::InvalidParameter(err.to_string())
            }
            FilterError::Failed { filter, message } => AppError::Filter {
                filter: filter.to_string(),
                message,
            },
        };
        HttpAppError(app)
    }
}

impl From<CodecError> for HttpAppError {
    fn from(err: CodecError) -> Self {
        let app = match err {
            CodecError::Decode(msg) => AppError::InvalidImage(msg),
            err @ CodecError::Encode { .. } => AppError::SaveFailed(err.to_string()),
        };
        HttpAppError(app)
    }
}
