//! Handlers for the `/products` resource.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use axum_extra::extract::Host;
use serde::Deserialize;
use validator::Validate;

use emporia_core::error::CoreError;
use emporia_core::types::DbId;
use emporia_db::models::product::{Product, ProductInput, ProductResponse};
use emporia_db::repositories::{CategoryRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::parse_id;
use crate::response::{CountResponse, StatusResponse};
use crate::state::AppState;
use crate::uploads;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ListProductsParams {
    /// Comma-separated category ids; products in any of them match.
    pub categories: Option<String>,
}

/// GET /api/v1/products
///
/// List products with their category populated, optionally filtered by
/// category membership. An empty catalog is a valid empty list, not an
/// error.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> AppResult<Json<Vec<ProductResponse>>> {
    let filter = params
        .categories
        .as_deref()
        .map(parse_category_filter)
        .transpose()?
        // An empty filter value means "no filter", not "match nothing".
        .filter(|ids| !ids.is_empty());

    let rows = ProductRepo::list(&state.pool, filter.as_deref()).await?;

    Ok(Json(rows.into_iter().map(ProductResponse::from).collect()))
}

/// GET /api/v1/products/{id}
///
/// Get one product with its category populated.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let id = parse_id(&id, "Invalid product id")?;

    let row = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    Ok(Json(ProductResponse::from(row)))
}

/// GET /api/v1/products/get/count
///
/// Total product count. Zero is a valid count.
pub async fn count_products(State(state): State<AppState>) -> AppResult<Json<CountResponse>> {
    let count = ProductRepo::count(&state.pool).await?;
    Ok(Json(CountResponse { count }))
}

/// GET /api/v1/products/get/featured/{count}
///
/// Featured products, up to `count`. A count of `0` deliberately means
/// "no limit" and returns the full featured set.
pub async fn featured_products(
    State(state): State<AppState>,
    Path(count): Path<String>,
) -> AppResult<Json<Vec<Product>>> {
    let limit: i64 = count
        .parse()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| AppError::Core(CoreError::Validation("Invalid count".into())))?;

    let products = ProductRepo::list_featured(&state.pool, limit).await?;
    Ok(Json(products))
}

/// POST /api/v1/products
///
/// Create a product from a multipart form: text fields per the product
/// attributes plus exactly one file under `image`. The category must
/// resolve and the attachment must be present; the upload pipeline
/// supplies the stored image URL.
pub async fn create_product(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Product>)> {
    let (input, image) = uploads::collect_product_form(multipart).await?;

    let category_id = resolve_category(&state, input.category).await?;

    let image = image.ok_or_else(|| {
        AppError::Core(CoreError::Validation("No image in the request".into()))
    })?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let base_url = uploads::request_base(&headers, &host);
    let image_url = uploads::store_image(&image, &state.config.uploads_dir, &base_url).await?;

    let product = ProductRepo::create(&state.pool, &input, category_id, &image_url).await?;

    tracing::info!(product_id = product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/v1/products/{id}
///
/// Full-field replace from a JSON body. Omitted fields are written as
/// their empty values; `image` is stored verbatim (setting an image
/// reference, not uploading — uploads go through create or the gallery).
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> AppResult<Json<Product>> {
    let id = parse_id(&id, "Invalid product id")?;

    let category_id = resolve_category(&state, input.category).await?;

    let product = ProductRepo::update(&state.pool, id, &input, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    Ok(Json(product))
}

/// PUT /api/v1/products/gallery-images/{id}
///
/// Replace the product's gallery wholesale with the uploaded `images`
/// attachments (at most 10), in attachment order.
pub async fn update_gallery(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    Path(id): Path<String>,
    multipart: Multipart,
) -> AppResult<Json<Product>> {
    let id = parse_id(&id, "Invalid product id")?;

    let attachments = uploads::collect_gallery(multipart).await?;

    let base_url = uploads::request_base(&headers, &host);
    let mut image_urls = Vec::with_capacity(attachments.len());
    for attachment in &attachments {
        let url = uploads::store_image(attachment, &state.config.uploads_dir, &base_url).await?;
        image_urls.push(url);
    }

    let product = ProductRepo::replace_gallery(&state.pool, id, &image_urls)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))?;

    tracing::info!(product_id = id, images = image_urls.len(), "Product gallery replaced");

    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let id = parse_id(&id, "Invalid product id")?;

    let removed = ProductRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(Json(StatusResponse {
        success: true,
        message: "Product deleted",
    }))
}

/// Resolve the payload's category reference against the store, rejecting
/// a missing or dangling reference before anything is written.
async fn resolve_category(state: &AppState, category: Option<DbId>) -> AppResult<DbId> {
    let invalid = || AppError::Core(CoreError::Validation("Invalid category".into()));

    let category_id = category.ok_or_else(invalid)?;
    if !CategoryRepo::exists(&state.pool, category_id).await? {
        return Err(invalid());
    }
    Ok(category_id)
}

/// Parse the comma-separated category filter into ids.
fn parse_category_filter(raw: &str) -> AppResult<Vec<DbId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>().map_err(|_| {
                AppError::Core(CoreError::Validation("Invalid category id in filter".into()))
            })
        })
        .collect()
}
