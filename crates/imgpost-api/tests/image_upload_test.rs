mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_corrupt_png, create_test_jpeg, create_test_png};
use helpers::{setup_test_app, setup_test_app_with};
use image::GenericImageView;
use serde_json::Value;

const UPLOAD: &str = "/api/ImageUpload";

fn image_form(data: Vec<u8>, mime: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "imageData",
        Part::bytes(data).file_name("upload.bin").mime_type(mime),
    )
}

fn error_text(body: &Value) -> &str {
    body["errorText"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_health() {
    let app = setup_test_app().await;
    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn test_avatar_upload_stores_square_jpeg() {
    let app = setup_test_app().await;

    let form = image_form(create_test_jpeg(160, 100), "image/jpeg");
    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "avatar")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let name = response.text();
    assert!(name.ends_with(".jpg"));
    assert!(!name.contains('/'));

    let path = app.storage_root().join("images").join("avatars").join(&name);
    let stored = image::open(&path).unwrap();
    assert_eq!(stored.dimensions(), (64, 64));
}

#[tokio::test]
async fn test_image_type_from_form_field() {
    let app = setup_test_app().await;

    let form = image_form(create_test_png(200, 100), "image/png").add_text("imageType", "Preview");
    let response = app.client().post(UPLOAD).multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let name = response.text();
    let stored = image::open(app.storage_root().join("images/previews").join(&name)).unwrap();
    assert_eq!(stored.dimensions(), (80, 40));
}

#[tokio::test]
async fn test_post_image_keeps_png_pixels() {
    let app = setup_test_app_with(|config| config.output_format = "png".to_string()).await;
    let source = create_test_png(30, 20);

    let form = image_form(source.clone(), "image/png");
    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "postImage")
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let name = response.text();
    assert!(name.ends_with(".png"));

    let stored = image::open(app.storage_root().join("images").join(&name)).unwrap();
    let original = image::load_from_memory(&source).unwrap();
    assert_eq!(stored.dimensions(), (30, 20));
    assert_eq!(stored.to_rgba8(), original.to_rgba8());
}

#[tokio::test]
async fn test_uploads_get_distinct_names() {
    let app = setup_test_app().await;
    let source = create_test_png(12, 12);

    let mut names = Vec::new();
    for _ in 0..3 {
        let response = app
            .client()
            .post(UPLOAD)
            .add_query_param("imageType", "postImage")
            .multipart(image_form(source.clone(), "image/png"))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        names.push(response.text());
    }

    names.sort();
    names.dedup();
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn test_empty_image_is_bad_request() {
    let app = setup_test_app().await;

    for mime in ["image/png", "text/plain"] {
        let response = app
            .client()
            .post(UPLOAD)
            .add_query_param("imageType", "avatar")
            .multipart(image_form(Vec::new(), mime))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(error_text(&body), "Invalid image length");
    }
}

#[tokio::test]
async fn test_missing_image_is_bad_request() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("imageType", "avatar");
    let response = app.client().post(UPLOAD).multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(error_text(&body), "Image is null");
}

#[tokio::test]
async fn test_non_multipart_body_is_missing_image() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "avatar")
        .text("hello")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let content_type = response.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("application/json"));
    let body: Value = response.json();
    assert_eq!(error_text(&body), "Image is null");
}

#[tokio::test]
async fn test_wrong_content_type_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "avatar")
        .multipart(image_form(create_test_png(8, 8), "application/pdf"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(error_text(&body), "Content type is not image");
}

#[tokio::test]
async fn test_unknown_or_missing_image_type_is_bad_request() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "banner")
        .multipart(image_form(create_test_png(8, 8), "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = app
        .client()
        .post(UPLOAD)
        .multipart(image_form(create_test_png(8, 8), "image/png"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(error_text(&body).contains("imageType"));
}

#[tokio::test]
async fn test_corrupt_image_is_server_error_and_not_stored() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "postImage")
        .multipart(image_form(create_corrupt_png(), "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(error_text(&body), "Image could not be decoded");
    assert!(!app.storage_root().join("images").exists());
}

#[tokio::test]
async fn test_oversized_image_is_rejected() {
    let app = setup_test_app_with(|config| config.max_file_size_bytes = 1024).await;

    let response = app
        .client()
        .post(UPLOAD)
        .add_query_param("imageType", "postImage")
        .multipart(image_form(vec![0u8; 4096], "image/png"))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
}
