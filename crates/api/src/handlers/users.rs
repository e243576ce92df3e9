//! Handlers for the `/users` resource: account CRUD and login.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use emporia_core::error::CoreError;
use emporia_db::models::user::{CreateUser, CreateUserRecord, LoginCredentials, User, UserProfile};
use emporia_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::parse_id;
use crate::response::{CountResponse, LoginResponse, StatusResponse};
use crate::state::AppState;

/// GET /api/v1/users
///
/// List all users. The password hash never appears in this response.
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserProfile>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users))
}

/// GET /api/v1/users/{id}
///
/// Get one user, hash excluded.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserProfile>> {
    let id = parse_id(&id, "Invalid user id")?;

    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(user))
}

/// GET /api/v1/users/get/count
pub async fn count_users(State(state): State<AppState>) -> AppResult<Json<CountResponse>> {
    let count = UserRepo::count(&state.pool).await?;
    Ok(Json(CountResponse { count }))
}

/// POST /api/v1/users
///
/// Direct user creation. Same contract as registration.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    create_account(&state, input).await
}

/// POST /api/v1/users/register
///
/// Self-registration. Same contract as direct creation.
pub async fn register_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    create_account(&state, input).await
}

/// POST /api/v1/users/login
///
/// Verify credentials and mint a session token. An unknown email and a
/// wrong password fail with distinct messages.
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<LoginCredentials>,
) -> AppResult<Json<LoginResponse>> {
    let user = UserRepo::find_by_email(&state.pool, &credentials.email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User not found".into())))?;

    let password_valid = verify_password(&credentials.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    let token = generate_token(user.id, user.is_admin, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(LoginResponse {
        user: user.email,
        token,
    }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<StatusResponse>> {
    let id = parse_id(&id, "Invalid user id")?;

    let removed = UserRepo::delete(&state.pool, id).await?;
    if removed == 0 {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(Json(StatusResponse {
        success: true,
        message: "User deleted",
    }))
}

/// Shared account-creation contract behind the create and register entry
/// points: validate, hash the plaintext once, persist, return the row.
async fn create_account(
    state: &AppState,
    input: CreateUser,
) -> AppResult<(StatusCode, Json<User>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let record = CreateUserRecord {
        name: input.name,
        email: input.email,
        password_hash,
        phone: input.phone,
        is_admin: input.is_admin,
        street: input.street,
        apartment: input.apartment,
        zip: input.zip,
        city: input.city,
        country: input.country,
    };

    let user = UserRepo::create(&state.pool, &record).await?;

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}
