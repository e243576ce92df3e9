//! Product entity model and DTOs.
//!
//! Wire field names stay camelCase (`countInStock`, `isFeatured`, …) so the
//! transport contract matches what catalog clients already speak.

use emporia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::Category;

/// A row from the `products` table.
///
/// `category_id` serializes as `category` — the raw reference, matching the
/// unpopulated document shape. Populated reads go through
/// [`ProductResponse`] instead.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub brand: String,
    pub price: f64,
    #[serde(rename = "category")]
    pub category_id: DbId,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product row joined with its category (LEFT JOIN).
///
/// The category columns are nullable: a product whose category was deleted
/// after the reference was validated keeps the dangling id and populates
/// as `null`.
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub brand: String,
    pub price: f64,
    pub category_id: DbId,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: Option<String>,
    pub category_icon: Option<String>,
    pub category_color: Option<String>,
    pub category_created_at: Option<Timestamp>,
    pub category_updated_at: Option<Timestamp>,
}

/// Populated product representation for read responses: the raw category
/// reference is replaced by the full category record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub brand: String,
    pub price: f64,
    pub category: Option<Category>,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProductWithCategory> for ProductResponse {
    fn from(row: ProductWithCategory) -> Self {
        let category = match (
            row.category_name,
            row.category_icon,
            row.category_color,
            row.category_created_at,
            row.category_updated_at,
        ) {
            (Some(name), Some(icon), Some(color), Some(created_at), Some(updated_at)) => {
                Some(Category {
                    id: row.category_id,
                    name,
                    icon,
                    color,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };

        ProductResponse {
            id: row.id,
            name: row.name,
            description: row.description,
            long_description: row.long_description,
            image: row.image,
            images: row.images,
            brand: row.brand,
            price: row.price,
            category,
            count_in_stock: row.count_in_stock,
            rating: row.rating,
            num_reviews: row.num_reviews,
            is_featured: row.is_featured,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Incoming product fields, shared by create and update.
///
/// Updates are full-document replaces, not patches: every omitted field
/// deserializes to its empty value and is written as such.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductInput {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub description: String,
    pub long_description: String,
    /// On update this is stored verbatim (a "set image reference"
    /// operation). On create it is ignored; the upload pipeline supplies
    /// the image URL.
    pub image: Option<String>,
    pub brand: String,
    pub price: f64,
    pub category: Option<DbId>,
    pub count_in_stock: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub is_featured: bool,
}
