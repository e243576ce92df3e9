//! Category entity model.
//!
//! Categories are referenced by products but managed outside this service,
//! so only the surface needed for reference validation and for populated
//! product reads lives here.

use emporia_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fields for inserting a category (used by seeds and tests; there is no
/// category HTTP surface in this service).
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
}
