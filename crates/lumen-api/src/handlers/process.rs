use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Multipart, State},
    Json,
};
use lumen_core::AppError;
use lumen_processing::codec::{decode_image, encode_image, image_dimensions, OutputEncoding};
use lumen_processing::filters::{FilterEngine, FilterKind, FilterParams};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessResponse {
    pub success: bool,
    pub message: String,
    /// Stored filename, retrievable via `GET /processed/{filename}`
    pub filename: String,
    pub filter: String,
    /// Effective parameters after defaulting and clamping
    pub parameters: Value,
    /// Wall-clock processing time in milliseconds
    pub processing_time: f64,
    /// Original dimensions as "WxH"
    pub original_size: String,
    pub output_format: String,
    /// Size of the stored file in bytes
    pub file_size: usize,
}

struct UploadForm {
    filename: Option<String>,
    image_data: Option<Vec<u8>>,
    filter: Option<String>,
    factor: Option<String>,
    radius: Option<String>,
}

/// Drain the multipart stream into memory.
///
/// Field order is not guaranteed by clients, so everything is collected
/// before validation starts. A 413 from the body limit layer surfaces here
/// as a multipart read error and is mapped back to PayloadTooLarge.
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, HttpAppError> {
    let mut form = UploadForm {
        filename: None,
        image_data: None,
        filter: None,
        factor: None,
        radius: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_err)? {
        let Some(name) = field.name().map(String::from) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                form.filename = field.file_name().map(String::from);
                let data = field.bytes().await.map_err(map_multipart_err)?;
                form.image_data = Some(data.to_vec());
            }
            "filter" => {
                form.filter = Some(field.text().await.map_err(map_multipart_err)?);
            }
            "factor" => {
                form.factor = Some(field.text().await.map_err(map_multipart_err)?);
            }
            "radius" => {
                form.radius = Some(field.text().await.map_err(map_multipart_err)?);
            }
            _ => {
                tracing::debug!(field = %name, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

fn map_multipart_err(err: axum::extract::multipart::MultipartError) -> HttpAppError {
    let status = err.status();
    if status == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        HttpAppError(AppError::PayloadTooLarge(err.to_string()))
    } else if status.is_client_error() {
        // Truncated or misframed bodies are the client's fault, not ours.
        HttpAppError(AppError::InvalidRequest(format!(
            "Malformed multipart body: {}",
            err
        )))
    } else {
        HttpAppError(AppError::Internal(format!(
            "Failed to read multipart form: {}",
            err
        )))
    }
}

/// Parse the raw strength value for the selected filter.
///
/// Contrast and sharpen read `factor`, blur reads `radius`; the parameterless
/// filters ignore both. Negative values and clamping are handled downstream
/// by `FilterParams::for_filter`.
fn parse_strength(kind: FilterKind, form: &UploadForm) -> Result<Option<f32>, HttpAppError> {
    let (raw, param) = match kind {
        FilterKind::Contrast | FilterKind::Sharpen => (form.factor.as_deref(), "factor"),
        FilterKind::Blur => (form.radius.as_deref(), "radius"),
        FilterKind::Invert | FilterKind::Grayscale => return Ok(None),
    };

    match raw {
        None => Ok(None),
        Some(text) => {
            let value = text.trim().parse::<f32>().map_err(|_| {
                HttpAppError(AppError::InvalidParameter(format!(
                    "Invalid {} {}: must be a number",
                    kind.name(),
                    param
                )))
            })?;
            Ok(Some(value))
        }
    }
}

/// Upload an image and apply a filter
///
/// Validates the upload, decodes it, applies the requested filter, encodes
/// the result (JPEG for jpg/jpeg uploads, PNG otherwise) and stores it under
/// a fresh UUID-based filename. Stale processed files past the retention
/// window are swept as part of the same request.
#[utoipa::path(
    post,
    path = "/process",
    tag = "filters",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image processed and stored", body = ProcessResponse),
        (status = 400, description = "Invalid upload or parameters", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Processing or storage failure", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "process_image"))]
pub async fn process_image(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ProcessResponse>, HttpAppError> {
    let started = Instant::now();
    let form = read_form(multipart).await?;

    let image_data = form
        .image_data
        .as_deref()
        .ok_or_else(|| AppError::MissingField("image file".to_string()))?;
    let filter_name = form
        .filter
        .as_deref()
        .ok_or_else(|| AppError::MissingField("filter".to_string()))?;

    let filename = form.filename.as_deref().unwrap_or("");
    let extension = state.validator.validate_filename(filename)?;
    let kind = FilterKind::from_name(filter_name)?;
    state.validator.validate_file_size(image_data.len())?;

    // Dimension check reads only the header, so an over-limit image is
    // rejected before the full decode materializes it in memory.
    let (width, height) = image_dimensions(image_data)?;
    state.validator.validate_dimensions(width, height)?;

    let decoded = decode_image(image_data)?;

    let strength = parse_strength(kind, &form)?;
    let params = FilterParams::for_filter(kind, strength)?;

    let filtered = FilterEngine::apply(&decoded.image, kind, &params)?;

    let encoding = OutputEncoding::for_extension(&extension);
    let output = encode_image(&filtered, encoding, state.config.jpeg_quality)?;
    let file_size = output.len();

    let stored_name = format!("{}_{}.{}", Uuid::new_v4(), kind.name(), extension);
    state.processed.put(&stored_name, output).await?;

    // Retention sweep piggybacks on uploads so no background task is needed.
    let swept = state.sweeper.sweep().await;
    if swept > 0 {
        tracing::info!(swept, "Removed expired files during request");
    }

    let elapsed_ms = (started.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0;

    tracing::info!(
        filter = kind.name(),
        filename = %stored_name,
        width,
        height,
        file_size,
        duration_ms = elapsed_ms,
        "Image processed"
    );

    Ok(Json(ProcessResponse {
        success: true,
        message: format!("Filter '{}' applied successfully", kind.name()),
        filename: stored_name,
        filter: kind.name().to_string(),
        parameters: params.as_json(),
        processing_time: elapsed_ms,
        original_size: format!("{}x{}", width, height),
        output_format: encoding.name().to_string(),
        file_size,
    }))
}
