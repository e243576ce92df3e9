//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /            -> list_users
/// POST   /            -> create_user
/// POST   /register    -> register_user (same contract as create)
/// POST   /login       -> login
/// GET    /get/count   -> count_users
/// GET    /{id}        -> get_user
/// DELETE /{id}        -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/register", post(users::register_user))
        .route("/login", post(users::login))
        .route("/get/count", get(users::count_users))
        .route("/{id}", get(users::get_user).delete(users::delete_user))
}
