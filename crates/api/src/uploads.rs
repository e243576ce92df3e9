//! Filesystem half of the image upload pipeline, plus multipart ingestion.
//!
//! Attachments are gated by declared content type before their bytes are
//! read, named via [`emporia_core::uploads::destination_filename`] with a
//! per-upload millisecond timestamp, persisted under the configured
//! content root, and returned as externally addressable URLs built from
//! the request's own scheme and host.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::{Field, Multipart};
use axum::http::HeaderMap;

use emporia_core::error::CoreError;
use emporia_core::uploads::{allowed_extension, destination_filename};
use emporia_db::models::product::ProductInput;

use crate::error::{AppError, AppResult};

/// Public URL prefix under which stored images are addressable.
pub const PUBLIC_UPLOADS_PREFIX: &str = "/public/uploads/";

/// Maximum number of gallery images accepted per request.
pub const MAX_GALLERY_IMAGES: usize = 10;

/// A content-type-gated attachment buffered from a multipart request.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub original_name: String,
    pub extension: &'static str,
    pub data: Bytes,
}

/// Scheme + host of the inbound request. Honors `x-forwarded-proto` when
/// the service sits behind a proxy; host comes from the `Host` header.
pub fn request_base(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{scheme}://{host}")
}

/// Gate one multipart file field and buffer its bytes.
///
/// The allow-list check happens before `bytes()` is awaited: a disallowed
/// content type is rejected before any data could reach disk.
async fn read_image_field(field: Field<'_>) -> AppResult<ImageUpload> {
    let content_type = field.content_type().unwrap_or_default().to_string();
    let extension = allowed_extension(&content_type)
        .ok_or_else(|| AppError::Core(CoreError::Validation("Invalid image type".into())))?;

    let original_name = field.file_name().unwrap_or("upload").to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(ImageUpload {
        original_name,
        extension,
        data,
    })
}

/// Split a product create request into its text fields and the single
/// file attachment under the `image` field.
pub async fn collect_product_form(
    mut multipart: Multipart,
) -> AppResult<(ProductInput, Option<ImageUpload>)> {
    let mut input = ProductInput::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" && field.file_name().is_some() {
            image = Some(read_image_field(field).await?);
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        apply_text_field(&mut input, &name, value)?;
    }

    Ok((input, image))
}

/// Buffer the `images` attachments of a gallery update, gating each by
/// content type and capping the batch size.
pub async fn collect_gallery(mut multipart: Multipart) -> AppResult<Vec<ImageUpload>> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("images") {
            continue;
        }
        if uploads.len() == MAX_GALLERY_IMAGES {
            return Err(AppError::Core(CoreError::Validation(format!(
                "At most {MAX_GALLERY_IMAGES} gallery images per request"
            ))));
        }
        uploads.push(read_image_field(field).await?);
    }

    Ok(uploads)
}

/// Persist a gated upload under the content root and return its
/// externally addressable URL. A failed write is fatal for the enclosing
/// create/gallery request.
pub async fn store_image(
    upload: &ImageUpload,
    uploads_dir: &Path,
    base_url: &str,
) -> AppResult<String> {
    let stamp = chrono::Utc::now().timestamp_millis();
    let filename = destination_filename(&upload.original_name, upload.extension, stamp);

    tokio::fs::create_dir_all(uploads_dir).await.map_err(|e| {
        AppError::Core(CoreError::Internal(format!(
            "Failed to create uploads dir: {e}"
        )))
    })?;
    tokio::fs::write(uploads_dir.join(&filename), &upload.data)
        .await
        .map_err(|e| AppError::Core(CoreError::Internal(format!("Failed to store image: {e}"))))?;

    tracing::debug!(%filename, size = upload.data.len(), "Stored uploaded image");

    Ok(format!("{base_url}{PUBLIC_UPLOADS_PREFIX}{filename}"))
}

/// Coerce one multipart text field onto the typed input. Unknown fields
/// are ignored; numeric and boolean fields must parse.
fn apply_text_field(input: &mut ProductInput, name: &str, value: String) -> AppResult<()> {
    fn parsed<T: std::str::FromStr>(name: &str, value: &str) -> AppResult<T> {
        value
            .trim()
            .parse()
            .map_err(|_| AppError::Core(CoreError::Validation(format!("Invalid value for {name}"))))
    }

    match name {
        "name" => input.name = value,
        "description" => input.description = value,
        "longDescription" => input.long_description = value,
        "image" => input.image = Some(value),
        "brand" => input.brand = value,
        "price" => input.price = parsed(name, &value)?,
        "category" => input.category = Some(parsed(name, &value)?),
        "countInStock" => input.count_in_stock = parsed(name, &value)?,
        "rating" => input.rating = parsed(name, &value)?,
        "numReviews" => input.num_reviews = parsed(name, &value)?,
        "isFeatured" => input.is_featured = parsed(name, &value)?,
        _ => {}
    }
    Ok(())
}
