use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use lumen_core::AppError;
use lumen_processing::codec::{decode_image, encode_image, OutputEncoding};
use serde::Deserialize;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RetrieveQuery {
    /// Target format ("JPEG" or "PNG"); unrecognized values serve as stored
    format: Option<String>,
    /// "true" forces a Content-Disposition attachment
    download: Option<String>,
}

/// Retrieve a processed image
///
/// Serves the stored bytes directly unless `format` requests the other
/// encoding, in which case the file is transcoded on the fly. Unknown format
/// values fall back to serving the file as stored rather than erroring.
#[utoipa::path(
    get,
    path = "/processed/{filename}",
    tag = "filters",
    params(
        ("filename" = String, Path, description = "Filename returned by POST /process"),
        ("format" = Option<String>, Query, description = "Convert to JPEG or PNG on the fly"),
        ("download" = Option<String>, Query, description = "Set to 'true' to download as attachment")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "image/png"),
        (status = 404, description = "File not found or expired", body = ErrorResponse),
        (status = 500, description = "Conversion failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_processed"))]
pub async fn get_processed(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    Query(query): Query<RetrieveQuery>,
) -> Result<Response, HttpAppError> {
    let stored = state.processed.get(&filename).await?;

    let stored_ext = filename.rsplit('.').next().unwrap_or("");
    let implied = OutputEncoding::for_extension(stored_ext);
    let requested = query
        .format
        .as_deref()
        .and_then(OutputEncoding::from_name);

    let (bytes, encoding) = match requested {
        Some(target) if target != implied => {
            tracing::debug!(
                filename = %filename,
                from = implied.name(),
                to = target.name(),
                "Converting on retrieval"
            );
            let decoded = decode_image(&stored)
                .map_err(|err| AppError::Internal(format!("Stored file unreadable: {}", err)))?;
            let converted = encode_image(&decoded.image, target, state.config.jpeg_quality)?;
            (converted, target)
        }
        _ => (stored, implied),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(encoding.content_type()),
    );

    let wants_download = query
        .download
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));
    if wants_download {
        let base = filename.rsplit_once('.').map_or(filename.as_str(), |(b, _)| b);
        let attachment = format!(
            "attachment; filename=\"{}.{}\"",
            base,
            encoding.extension()
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&attachment)
                .map_err(|err| AppError::Internal(format!("Invalid filename header: {}", err)))?,
        );
    }

    Ok((headers, bytes).into_response())
}
