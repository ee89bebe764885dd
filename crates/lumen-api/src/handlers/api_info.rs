use axum::Json;
use serde_json::{json, Value};

/// API capability summary
///
/// Hand-maintained endpoint overview for quick discovery; the full
/// machine-readable contract lives at `/api/openapi.json`.
#[utoipa::path(
    get,
    path = "/api",
    tag = "meta",
    responses(
        (status = 200, description = "API capability summary")
    )
)]
pub async fn api_info() -> Json<Value> {
    Json(json!({
        "name": "Lumen Image Filter API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /process": {
                "description": "Upload an image and apply a filter",
                "content_type": "multipart/form-data",
                "fields": {
                    "image": "image file (png, jpg, jpeg, gif, bmp, webp, tiff)",
                    "filter": "one of: invert, grayscale, contrast, blur, sharpen",
                    "factor": "optional strength for contrast/sharpen",
                    "radius": "optional radius for blur"
                }
            },
            "GET /processed/{filename}": {
                "description": "Retrieve a processed image",
                "query": {
                    "format": "optional output format (JPEG or PNG) to convert on the fly",
                    "download": "set to 'true' to force a file download"
                }
            },
            "GET /filters": "List available filters with parameter specs",
            "GET /stats": "Storage and file counts",
            "GET /health": "Service health check",
            "GET /api/openapi.json": "OpenAPI 3 document"
        }
    }))
}
