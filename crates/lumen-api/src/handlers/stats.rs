use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use lumen_processing::filters::registry;
use serde_json::{json, Value};

use crate::error::HttpAppError;
use crate::state::AppState;

fn to_mb(bytes: u64) -> f64 {
    (bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0
}

/// Storage statistics
///
/// File counts and on-disk sizes for both directories, plus the filter
/// inventory. Sizes are reported in megabytes rounded to two decimals.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "meta",
    responses(
        (status = 200, description = "Current storage statistics"),
        (status = 500, description = "Storage unreadable")
    )
)]
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<Value>, HttpAppError> {
    let uploaded = state.uploads.stats().await?;
    let processed = state.processed.stats().await?;

    let specs = registry();
    let names: Vec<&str> = specs.iter().map(|s| s.name).collect();
    let mut categories: Vec<&str> = specs.iter().map(|s| s.category).collect();
    categories.sort_unstable();
    categories.dedup();

    Ok(Json(json!({
        "timestamp": Utc::now().to_rfc3339(),
        "files": {
            "uploaded": uploaded.file_count,
            "processed": processed.file_count,
            "total": uploaded.file_count + processed.file_count,
        },
        "storage": {
            "uploaded_size_mb": to_mb(uploaded.total_bytes),
            "processed_size_mb": to_mb(processed.total_bytes),
            "total_size_mb": to_mb(uploaded.total_bytes + processed.total_bytes),
        },
        "filters": {
            "available": specs.len(),
            "names": names,
            "categories": categories,
        },
        "retention_seconds": state.sweeper.retention().as_secs(),
    })))
}
