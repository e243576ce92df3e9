//! Repository for the `products` table.
//!
//! Read operations that populate the category reference join against
//! `categories`; the join is a LEFT JOIN so a dangling reference (category
//! deleted after the product was written) still returns the product.

use sqlx::PgPool;

use emporia_core::types::DbId;

use crate::models::product::{Product, ProductInput, ProductWithCategory};

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, name, description, long_description, image, images, \
    brand, price, category_id, count_in_stock, \
    rating, num_reviews, is_featured, created_at, updated_at";

/// Column list for populated reads (`products p LEFT JOIN categories c`).
const JOINED_COLUMNS: &str = "\
    p.id, p.name, p.description, p.long_description, p.image, p.images, \
    p.brand, p.price, p.category_id, p.count_in_stock, \
    p.rating, p.num_reviews, p.is_featured, p.created_at, p.updated_at, \
    c.name AS category_name, c.icon AS category_icon, c.color AS category_color, \
    c.created_at AS category_created_at, c.updated_at AS category_updated_at";

pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product. `category_id` has already been resolved and
    /// `image_url` produced by the upload pipeline; the gallery starts
    /// empty.
    pub async fn create(
        pool: &PgPool,
        input: &ProductInput,
        category_id: DbId,
        image_url: &str,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (\
                name, description, long_description, image, brand, price, \
                category_id, count_in_stock, rating, num_reviews, is_featured\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.long_description)
            .bind(image_url)
            .bind(&input.brand)
            .bind(input.price)
            .bind(category_id)
            .bind(input.count_in_stock)
            .bind(input.rating)
            .bind(input.num_reviews)
            .bind(input.is_featured)
            .fetch_one(pool)
            .await
    }

    /// List products with their category populated, optionally restricted
    /// to a set of category ids.
    pub async fn list(
        pool: &PgPool,
        category_ids: Option<&[DbId]>,
    ) -> Result<Vec<ProductWithCategory>, sqlx::Error> {
        match category_ids {
            Some(ids) => {
                let query = format!(
                    "SELECT {JOINED_COLUMNS} FROM products p \
                     LEFT JOIN categories c ON c.id = p.category_id \
                     WHERE p.category_id = ANY($1) \
                     ORDER BY p.id"
                );
                sqlx::query_as::<_, ProductWithCategory>(&query)
                    .bind(ids)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {JOINED_COLUMNS} FROM products p \
                     LEFT JOIN categories c ON c.id = p.category_id \
                     ORDER BY p.id"
                );
                sqlx::query_as::<_, ProductWithCategory>(&query)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Find one product by id with its category populated.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductWithCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM products p \
             LEFT JOIN categories c ON c.id = p.category_id \
             WHERE p.id = $1"
        );
        sqlx::query_as::<_, ProductWithCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Total product count.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
    }

    /// List featured products, unpopulated. `limit == 0` means no limit.
    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Product>, sqlx::Error> {
        if limit > 0 {
            let query = format!(
                "SELECT {COLUMNS} FROM products WHERE is_featured ORDER BY id LIMIT $1"
            );
            sqlx::query_as::<_, Product>(&query)
                .bind(limit)
                .fetch_all(pool)
                .await
        } else {
            let query = format!("SELECT {COLUMNS} FROM products WHERE is_featured ORDER BY id");
            sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
        }
    }

    /// Full-field replace of a product. Every column is written from the
    /// input; omitted payload fields arrive as their empty values. Returns
    /// `None` when the id does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ProductInput,
        category_id: DbId,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = $2, description = $3, long_description = $4, image = $5, \
                brand = $6, price = $7, category_id = $8, count_in_stock = $9, \
                rating = $10, num_reviews = $11, is_featured = $12, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.long_description)
            .bind(input.image.as_deref())
            .bind(&input.brand)
            .bind(input.price)
            .bind(category_id)
            .bind(input.count_in_stock)
            .bind(input.rating)
            .bind(input.num_reviews)
            .bind(input.is_featured)
            .fetch_optional(pool)
            .await
    }

    /// Replace the gallery wholesale. Prior paths are discarded, never
    /// merged. Returns `None` when the id does not exist.
    pub async fn replace_gallery(
        pool: &PgPool,
        id: DbId,
        images: &[String],
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET images = $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(images)
            .fetch_optional(pool)
            .await
    }

    /// Delete by id. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
