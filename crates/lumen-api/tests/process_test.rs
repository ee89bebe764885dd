//! Filter processing integration tests.
//!
//! Run with: `cargo test -p lumen-api --test process_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::{fixtures, setup_test_app, setup_test_app_with};
use serde_json::Value;

fn image_part(data: Vec<u8>, filename: &str, mime: &str) -> Part {
    Part::bytes(data)
        .file_name(filename.to_string())
        .mime_type(mime.to_string())
}

fn upload_form(data: Vec<u8>, filename: &str, filter: &str) -> MultipartForm {
    MultipartForm::new()
        .add_part("image", image_part(data, filename, "image/png"))
        .add_text("filter", filter)
}

#[tokio::test]
async fn test_invert_red_png_end_to_end() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(
            fixtures::solid_png(10, 10, [255, 0, 0]),
            "red.png",
            "invert",
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["filter"], "invert");
    assert_eq!(body["original_size"], "10x10");
    assert_eq!(body["output_format"], "PNG");

    let filename = body["filename"].as_str().unwrap();
    assert!(filename.ends_with("_invert.png"), "got {}", filename);

    // Fetch the stored result and verify the pixels actually inverted.
    let stored = client.get(&format!("/processed/{}", filename)).await;
    assert_eq!(stored.status_code(), 200);
    assert_eq!(
        stored.headers().get("content-type").unwrap(),
        "image/png"
    );

    let img = image::load_from_memory(stored.as_bytes()).unwrap().to_rgb8();
    assert_eq!(img.get_pixel(5, 5), &image::Rgb([0, 255, 255]));
}

#[tokio::test]
async fn test_jpeg_upload_produces_jpeg_output() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new()
        .add_part(
            "image",
            image_part(fixtures::solid_jpeg(8, 8, [10, 20, 30]), "photo.jpg", "image/jpeg"),
        )
        .add_text("filter", "grayscale");

    let response = client.post("/process").multipart(form).await;
    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["output_format"], "JPEG");
    let filename = body["filename"].as_str().unwrap();
    assert!(filename.ends_with("_grayscale.jpg"), "got {}", filename);

    let stored = client.get(&format!("/processed/{}", filename)).await;
    assert_eq!(
        stored.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
}

#[tokio::test]
async fn test_contrast_uses_default_factor() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(
            fixtures::solid_png(4, 4, [100, 100, 100]),
            "gray.png",
            "contrast",
        ))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["parameters"]["factor"], 1.5);
}

#[tokio::test]
async fn test_blur_radius_clamped_to_max() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = upload_form(fixtures::solid_png(6, 6, [50, 60, 70]), "x.png", "blur")
        .add_text("radius", "25");

    let response = client.post("/process").multipart(form).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["parameters"]["radius"], 10.0);
}

#[tokio::test]
async fn test_negative_sharpen_factor_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = upload_form(fixtures::solid_png(4, 4, [0, 0, 0]), "x.png", "sharpen")
        .add_text("factor", "-1");

    let response = client.post("/process").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_non_numeric_factor_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = upload_form(fixtures::solid_png(4, 4, [0, 0, 0]), "x.png", "contrast")
        .add_text("factor", "strong");

    let response = client.post("/process").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_PARAMETER");
    assert!(body["error"].as_str().unwrap().contains("factor"));
}

#[tokio::test]
async fn test_unknown_filter_lists_available() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(
            fixtures::solid_png(4, 4, [0, 0, 0]),
            "x.png",
            "sepia",
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNKNOWN_FILTER");
    let msg = body["error"].as_str().unwrap();
    assert!(msg.contains("sepia"));
    assert!(msg.contains("invert"));
}

#[tokio::test]
async fn test_missing_filter_field() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_part(
        "image",
        image_part(fixtures::solid_png(4, 4, [0, 0, 0]), "x.png", "image/png"),
    );

    let response = client.post("/process").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "MISSING_FIELD");
}

#[tokio::test]
async fn test_missing_image_field() {
    let app = setup_test_app().await;
    let client = app.client();

    let form = MultipartForm::new().add_text("filter", "invert");

    let response = client.post("/process").multipart(form).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "MISSING_FIELD");
}

#[tokio::test]
async fn test_unsupported_extension_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(b"not an image".to_vec(), "notes.txt", "invert"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
}

#[tokio::test]
async fn test_empty_file_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(Vec::new(), "empty.png", "invert"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "EMPTY_FILE");
}

#[tokio::test]
async fn test_corrupt_image_rejected() {
    let app = setup_test_app().await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(
            vec![0xde, 0xad, 0xbe, 0xef, 0x00, 0x01, 0x02, 0x03],
            "broken.png",
            "invert",
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_IMAGE");
}

#[tokio::test]
async fn test_truncated_multipart_body_is_client_error() {
    let app = setup_test_app().await;
    let client = app.client();

    // Opening boundary and headers but no closing boundary.
    let truncated = "--XBOUNDARY\r\n\
        Content-Disposition: form-data; name=\"filter\"\r\n\r\n\
        invert\r\n";

    let response = client
        .post("/process")
        .add_header(
            "Content-Type",
            "multipart/form-data; boundary=XBOUNDARY",
        )
        .bytes(truncated.into())
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_REQUEST");
}

#[tokio::test]
async fn test_file_over_size_limit_rejected() {
    let app = setup_test_app_with(|config| {
        config.max_file_size_bytes = 1024;
    })
    .await;
    let client = app.client();

    // Noise compresses poorly enough that 64x64 overshoots 1 KiB.
    let mut img = image::RgbImage::new(64, 64);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8]);
    }
    let mut buf = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    let data = buf.into_inner();
    assert!(data.len() > 1024);

    let response = client
        .post("/process")
        .multipart(upload_form(data, "big.png", "invert"))
        .await;

    assert_eq!(response.status_code(), 413);
}

#[tokio::test]
async fn test_image_dimensions_over_limit_rejected() {
    let app = setup_test_app_with(|config| {
        config.max_image_dimension = 8;
    })
    .await;
    let client = app.client();

    let response = client
        .post("/process")
        .multipart(upload_form(
            fixtures::solid_png(10, 10, [0, 0, 0]),
            "wide.png",
            "invert",
        ))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "IMAGE_TOO_LARGE");
}
