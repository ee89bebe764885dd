use axum::response::Html;

/// Serve the bundled upload page.
///
/// The page is compiled into the binary so the service stays a single
/// deployable artifact with no asset directory to ship.
pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}
