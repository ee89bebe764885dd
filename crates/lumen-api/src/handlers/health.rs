use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use image::{DynamicImage, RgbImage};
use lumen_processing::codec::{encode_image, OutputEncoding};
use lumen_processing::filters::registry;
use serde_json::{json, Value};

use crate::state::AppState;

/// Health check with a real self-test.
///
/// Rather than returning a static "ok", this exercises the image encoder and
/// the storage layer so a broken disk or codec shows up here before it shows
/// up in `/process`.
#[utoipa::path(
    get,
    path = "/health",
    tag = "meta",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 500, description = "Self-test failed")
    )
)]
pub async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    let mut checks = Vec::new();
    let mut healthy = true;

    // Encode a tiny image through the real codec path.
    let probe = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, image::Rgb([255, 0, 0])));
    match encode_image(&probe, OutputEncoding::Png, state.config.jpeg_quality) {
        Ok(bytes) if !bytes.is_empty() => {
            checks.push(json!({"name": "image_codec", "status": "ok"}));
        }
        Ok(_) => {
            healthy = false;
            checks.push(json!({"name": "image_codec", "status": "failed", "detail": "empty output"}));
        }
        Err(err) => {
            healthy = false;
            checks.push(json!({"name": "image_codec", "status": "failed", "detail": err.to_string()}));
        }
    }

    // Touch the upload store to confirm the directory is reachable.
    match state.uploads.exists("healthcheck.probe").await {
        Ok(_) => checks.push(json!({"name": "upload_storage", "status": "ok"})),
        Err(err) => {
            healthy = false;
            checks.push(json!({"name": "upload_storage", "status": "failed", "detail": err.to_string()}));
        }
    }

    let filter_count = registry().len();
    checks.push(json!({"name": "filter_registry", "status": "ok", "filters": filter_count}));

    let status = if healthy { "healthy" } else { "unhealthy" };
    let code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        code,
        Json(json!({
            "status": status,
            "timestamp": Utc::now().to_rfc3339(),
            "version": env!("CARGO_PKG_VERSION"),
            "checks": checks,
        })),
    )
}
