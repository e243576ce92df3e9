//! HTTP-level integration tests for the image upload pipeline: product
//! creation with an attachment, the content-type gate, filename
//! uniqueness, and wholesale gallery replacement.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_multipart, put_multipart, seed_category, seed_product, MultipartForm};
use sqlx::PgPool;

/// Bytes standing in for image data. Only the declared content type is
/// gated; the pipeline never inspects the payload.
const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-a-real-image";

/// Multipart form with every product text field and one attachment.
fn product_form(category_id: i64, filename: &str) -> MultipartForm {
    MultipartForm::new()
        .text("name", "Red Shirt")
        .text("description", "A very red shirt")
        .text("longDescription", "Crimson, even.")
        .text("brand", "Acme")
        .text("price", "19.99")
        .text("category", &category_id.to_string())
        .text("countInStock", "3")
        .text("rating", "4.5")
        .text("numReviews", "12")
        .text("isFeatured", "true")
        .file("image", filename, "image/png", FAKE_PNG)
}

/// Names of the files currently sitting in the uploads directory.
fn stored_files(dir: &std::path::Path) -> Vec<String> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect(),
        // The pipeline creates the directory on first write.
        Err(_) => Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Product create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_stores_image_and_returns_url(pool: PgPool) {
    let uploads = tempfile::tempdir().expect("tempdir should create");
    let category = seed_category(&pool, "Shirts").await;

    let app = common::build_test_app_with_uploads(pool, uploads.path().to_path_buf());
    let response = post_multipart(
        app,
        "/api/v1/products",
        product_form(category.id, "red shirt.png"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Red Shirt");
    assert_eq!(json["countInStock"], 3);
    assert_eq!(json["isFeatured"], true);

    // The URL is the request's own scheme+host plus the public prefix.
    let image_url = json["image"].as_str().expect("image must be set");
    assert!(image_url.starts_with("http://localhost:3000/public/uploads/"));
    // Whitespace in the original name collapsed to hyphens.
    assert!(image_url.contains("red-shirt.png-"));

    // The bytes landed under the content root.
    let files = stored_files(uploads.path());
    assert_eq!(files.len(), 1);
    assert!(image_url.ends_with(&files[0]));
}

/// An unresolved category wins over everything else in the payload.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_unresolved_category_rejected(pool: PgPool) {
    let uploads = tempfile::tempdir().expect("tempdir should create");

    let app = common::build_test_app_with_uploads(pool, uploads.path().to_path_buf());
    let response = post_multipart(
        app,
        "/api/v1/products",
        product_form(999999, "shirt.png"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid category");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_without_attachment_rejected(pool: PgPool) {
    let category = seed_category(&pool, "Shirts").await;

    let app = common::build_test_app(pool);
    let form = MultipartForm::new()
        .text("name", "Red Shirt")
        .text("category", &category.id.to_string());
    let response = post_multipart(app, "/api/v1/products", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "No image in the request");
}

/// A disallowed content type is rejected before any bytes reach disk.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_product_disallowed_type_rejected_before_persist(pool: PgPool) {
    let uploads = tempfile::tempdir().expect("tempdir should create");
    let category = seed_category(&pool, "Shirts").await;

    let app = common::build_test_app_with_uploads(pool, uploads.path().to_path_buf());
    let form = MultipartForm::new()
        .text("name", "Not An Image")
        .text("category", &category.id.to_string())
        .file("image", "payload.txt", "text/plain", b"plain text");
    let response = post_multipart(app, "/api/v1/products", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid image type");

    assert!(
        stored_files(uploads.path()).is_empty(),
        "no bytes may be persisted for a rejected type"
    );
}

/// Two uploads with the same original filename land on distinct stored
/// files and distinct URLs.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_same_original_filename_never_collides(pool: PgPool) {
    let uploads = tempfile::tempdir().expect("tempdir should create");
    let category = seed_category(&pool, "Shirts").await;

    let app = common::build_test_app_with_uploads(pool.clone(), uploads.path().to_path_buf());
    let first = body_json(
        post_multipart(
            app,
            "/api/v1/products",
            product_form(category.id, "shirt.png"),
        )
        .await,
    )
    .await;

    // The destination name embeds a millisecond timestamp; step past it.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let app = common::build_test_app_with_uploads(pool, uploads.path().to_path_buf());
    let second = body_json(
        post_multipart(
            app,
            "/api/v1/products",
            product_form(category.id, "shirt.png"),
        )
        .await,
    )
    .await;

    let first_url = first["image"].as_str().unwrap();
    let second_url = second["image"].as_str().unwrap();
    assert_ne!(first_url, second_url);
    assert_eq!(stored_files(uploads.path()).len(), 2);
}

// ---------------------------------------------------------------------------
// Gallery replacement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_replaced_wholesale(pool: PgPool) {
    let uploads = tempfile::tempdir().expect("tempdir should create");
    let category = seed_category(&pool, "Shirts").await;
    let product = seed_product(&pool, "Red Shirt", category.id, false).await;
    let uri = format!("/api/v1/products/gallery-images/{}", product.id);

    let app = common::build_test_app_with_uploads(pool.clone(), uploads.path().to_path_buf());
    let form = MultipartForm::new()
        .file("images", "front.png", "image/png", FAKE_PNG)
        .file("images", "back.jpg", "image/jpeg", FAKE_PNG);
    let json = body_json(put_multipart(app, &uri, form).await).await;

    let gallery = json["images"].as_array().expect("images must be an array");
    assert_eq!(gallery.len(), 2);
    // Attachment order is preserved.
    assert!(gallery[0].as_str().unwrap().contains("front.png-"));
    assert!(gallery[1].as_str().unwrap().contains("back.jpg-"));

    // A second replacement discards all previously stored paths.
    let app = common::build_test_app_with_uploads(pool, uploads.path().to_path_buf());
    let form = MultipartForm::new().file("images", "side.png", "image/png", FAKE_PNG);
    let json = body_json(put_multipart(app, &uri, form).await).await;

    let gallery = json["images"].as_array().unwrap();
    assert_eq!(gallery.len(), 1);
    assert!(gallery[0].as_str().unwrap().contains("side.png-"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_rejects_more_than_ten_images(pool: PgPool) {
    let category = seed_category(&pool, "Shirts").await;
    let product = seed_product(&pool, "Red Shirt", category.id, false).await;

    let mut form = MultipartForm::new();
    for i in 0..11 {
        form = form.file("images", &format!("img-{i}.png"), "image/png", FAKE_PNG);
    }

    let app = common::build_test_app(pool);
    let response = put_multipart(
        app,
        &format!("/api/v1/products/gallery-images/{}", product.id),
        form,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_invalid_id_checked_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let form = MultipartForm::new().file("images", "a.png", "image/png", FAKE_PNG);
    let response = put_multipart(app, "/api/v1/products/gallery-images/not-an-id", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid product id");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_nonexistent_product_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let form = MultipartForm::new().file("images", "a.png", "image/png", FAKE_PNG);
    let response = put_multipart(app, "/api/v1/products/gallery-images/999999", form).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
