pub mod health;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /products                        list (?categories=1,2), create (multipart `image`)
/// /products/{id}                   get, full-replace update, delete
/// /products/get/count              total count
/// /products/get/featured/{count}   featured products; 0 = no limit
/// /products/gallery-images/{id}    replace gallery (multipart `images`, max 10)
///
/// /users                           list, create
/// /users/{id}                      get, delete
/// /users/get/count                 total count
/// /users/register                  register (same contract as create)
/// /users/login                     login -> { user, token }
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/users", users::router())
}
