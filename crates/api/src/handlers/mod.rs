//! HTTP handlers.
//!
//! Handlers own the request/response shape: they sanitize and validate
//! input at the boundary, then delegate to the corresponding repository
//! in `petchip_db` and map errors via [`crate::error::AppError`].

pub mod animals;
pub mod chips;
pub mod lookup;
pub mod lostfound;
pub mod owners;

use uuid::Uuid;

use crate::error::AppError;

/// Parse a path/body UUID, mapping failure to a 400 with a consistent
/// message instead of an extractor rejection.
fn parse_uuid(raw: &str, what: &str) -> Result<Uuid, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {what} format")))
}
