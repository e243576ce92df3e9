//! Shared helpers for HTTP-level integration tests.
//!
//! Rebuilds the production router (full middleware stack) over the test
//! pool so tests exercise the same CORS/request-id/timeout/trace/panic
//! layers as `main.rs`, and provides `tower::ServiceExt::oneshot` request
//! helpers so no TCP listener is needed.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use emporia_api::auth::jwt::JwtConfig;
use emporia_api::config::ServerConfig;
use emporia_api::routes;
use emporia_api::state::AppState;
use emporia_core::types::DbId;
use emporia_db::models::category::{Category, CreateCategory};
use emporia_db::models::product::{Product, ProductInput};
use emporia_db::repositories::{CategoryRepo, ProductRepo};

/// Signing secret used by every test app.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults and the given uploads
/// root.
pub fn test_config(uploads_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        uploads_dir,
    }
}

/// Build the full application router over the given pool, storing uploads
/// in a shared temp directory. Tests that assert on stored files should
/// use [`build_test_app_with_uploads`] with their own directory instead.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_uploads(pool, std::env::temp_dir().join("emporia-test-uploads"))
}

/// Build the full application router with all middleware layers, using
/// the given database pool and uploads directory.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app_with_uploads(pool: PgPool, uploads_dir: PathBuf) -> Router {
    let config = test_config(uploads_dir);

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Body, content_type: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        // The upload pipeline builds public URLs from the Host header.
        .header("host", "localhost:3000");

    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }

    app.oneshot(builder.body(body).expect("request should build"))
        .await
        .expect("request should not fail at the transport level")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(
        app,
        Method::PUT,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn post_multipart(app: Router, uri: &str, form: MultipartForm) -> Response {
    let (content_type, body) = form.finish();
    send(app, Method::POST, uri, Body::from(body), Some(&content_type)).await
}

pub async fn put_multipart(app: Router, uri: &str, form: MultipartForm) -> Response {
    let (content_type, body) = form.finish();
    send(app, Method::PUT, uri, Body::from(body), Some(&content_type)).await
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart form builder
// ---------------------------------------------------------------------------

/// Minimal `multipart/form-data` body builder for upload tests.
pub struct MultipartForm {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "emporia-test-boundary",
            body: Vec::new(),
        }
    }

    /// Append a text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    /// Append a file field with the given declared content type.
    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Close the form, returning the Content-Type header value and body.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (content_type, self.body)
    }
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a category directly through the repository.
pub async fn seed_category(pool: &PgPool, name: &str) -> Category {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            icon: "tag".to_string(),
            color: "#cccccc".to_string(),
        },
    )
    .await
    .expect("category creation should succeed")
}

/// Insert a product directly through the repository, bypassing the upload
/// pipeline (the image URL is a placeholder).
pub async fn seed_product(
    pool: &PgPool,
    name: &str,
    category_id: DbId,
    is_featured: bool,
) -> Product {
    let input = ProductInput {
        name: name.to_string(),
        description: "a seeded product".to_string(),
        brand: "Acme".to_string(),
        price: 9.99,
        category: Some(category_id),
        count_in_stock: 5,
        is_featured,
        ..Default::default()
    };
    ProductRepo::create(
        pool,
        &input,
        category_id,
        "http://localhost:3000/public/uploads/seed.png",
    )
    .await
    .expect("product creation should succeed")
}
