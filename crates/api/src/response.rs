//! Typed response envelopes for non-entity payloads.
//!
//! Use these instead of ad-hoc `serde_json::json!` bodies so the count,
//! confirmation, and login shapes stay consistent across handlers.

use serde::Serialize;

/// `{ "count": n }` returned by the count endpoints. A genuine zero is a
/// valid payload, not a failure.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// `{ "success": true, "message": ... }` confirmation for deletions.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `{ "user": email, "token": jwt }` returned by a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: String,
    pub token: String,
}
