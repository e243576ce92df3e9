//! Route definitions for the `/products` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /                      -> list_products
/// POST   /                      -> create_product
/// GET    /get/count             -> count_products
/// GET    /get/featured/{count}  -> featured_products
/// PUT    /gallery-images/{id}   -> update_gallery
/// GET    /{id}                  -> get_product
/// PUT    /{id}                  -> update_product
/// DELETE /{id}                  -> delete_product
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(products::list_products).post(products::create_product),
        )
        .route("/get/count", get(products::count_products))
        .route("/get/featured/{count}", get(products::featured_products))
        .route("/gallery-images/{id}", put(products::update_gallery))
        .route(
            "/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
