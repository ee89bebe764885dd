//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lumen Image Filter API",
        version = "0.1.0",
        description = "Upload an image, apply a filter (invert, grayscale, contrast, blur, sharpen), and retrieve the result. Processed files are kept for one hour."
    ),
    paths(
        handlers::process::process_image,
        handlers::processed::get_processed,
        handlers::filters::list_filters,
        handlers::stats::stats,
        handlers::health::health,
        handlers::api_info::api_info,
    ),
    components(schemas(
        handlers::process::ProcessResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "filters", description = "Image filter processing and retrieval"),
        (name = "meta", description = "Service info, health, and statistics")
    )
)]
pub struct ApiDoc;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
