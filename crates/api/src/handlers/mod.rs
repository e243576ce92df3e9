//! HTTP handlers for the product and user resource services.

pub mod products;
pub mod users;

use emporia_core::error::CoreError;
use emporia_core::types::DbId;

use crate::error::{AppError, AppResult};

/// Parse a path id, short-circuiting with a validation error before any
/// store access.
pub(crate) fn parse_id(raw: &str, message: &'static str) -> AppResult<DbId> {
    raw.parse()
        .map_err(|_| AppError::Core(CoreError::Validation(message.into())))
}
