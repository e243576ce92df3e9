//! Repository for the `categories` table.
//!
//! Categories are managed outside this service; products only need to
//! check that a reference resolves, plus an insert path for seeds/tests.

use sqlx::PgPool;

use emporia_core::types::DbId;

use crate::models::category::{Category, CreateCategory};

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name, icon, color, created_at, updated_at";

pub struct CategoryRepo;

impl CategoryRepo {
    /// Check whether a category id resolves to an existing row.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a category.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, icon, color) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.icon)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }
}
