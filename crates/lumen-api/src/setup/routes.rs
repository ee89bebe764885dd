//! Route configuration and setup

use crate::api_doc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use lumen_core::Config;
use serde_json::json;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    // Leave headroom over the file-size limit for multipart framing, so
    // oversized files reach the validator and get the field-level error
    // instead of a blunt host-level 413.
    let body_limit = config.max_file_size_bytes + 64 * 1024;

    // Server-level concurrency cap; image decode and filtering are CPU-bound
    // so unbounded request fan-in would just queue on the runtime.
    let concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1024)
        .max(1);

    let app = Router::new()
        .route("/", get(handlers::home::home))
        .route("/api", get(handlers::api_info::api_info))
        .route("/api/openapi.json", get(openapi_spec))
        .route("/health", get(handlers::health::health))
        .route("/filters", get(handlers::filters::list_filters))
        .route("/stats", get(handlers::stats::stats))
        .route("/process", post(handlers::process::process_image))
        .route("/processed/{filename}", get(handlers::processed::get_processed))
        .fallback(not_found)
        .layer(ConcurrencyLimitLayer::new(concurrency_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(api_doc::get_openapi_spec())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "code": "NOT_FOUND",
            "recoverable": false,
        })),
    )
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins.iter().map(|o| o.parse()).collect();
        let origins = origins.map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
