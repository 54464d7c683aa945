pub mod auth;
pub mod files;
pub mod health;
pub mod media;
pub mod profile;

use streamhub_core::AppError;
use uuid::Uuid;

/// Parse a path id, answering 400 rather than axum's plain-text rejection.
pub(crate) fn parse_media_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidInput("Invalid media ID".to_string()))
}
