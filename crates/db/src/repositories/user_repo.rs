//! Repository for the `users` table.
//!
//! Point reads and listings use the hash-free column set; only the login
//! lookup and the insert path touch `password_hash`.

use sqlx::PgPool;

use emporia_core::types::DbId;

use crate::models::user::{CreateUserRecord, User, UserProfile};

/// Full column list, including the password hash.
const COLUMNS: &str = "\
    id, name, email, password_hash, phone, is_admin, \
    street, apartment, zip, city, country, created_at, updated_at";

/// Hash-free column list for list/get responses.
const PROFILE_COLUMNS: &str = "\
    id, name, email, phone, is_admin, \
    street, apartment, zip, city, country, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a user with an already-hashed password.
    pub async fn create(pool: &PgPool, input: &CreateUserRecord) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (\
                name, email, password_hash, phone, is_admin, \
                street, apartment, zip, city, country\
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.phone)
            .bind(input.is_admin)
            .bind(&input.street)
            .bind(&input.apartment)
            .bind(&input.zip)
            .bind(&input.city)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Find a user by id, hash excluded.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, full row (needed for credential verification).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users, hash excluded.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserProfile>, sqlx::Error> {
        let query = format!("SELECT {PROFILE_COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserProfile>(&query).fetch_all(pool).await
    }

    /// Total user count.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// Delete by id. Returns the number of rows removed (0 or 1).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
