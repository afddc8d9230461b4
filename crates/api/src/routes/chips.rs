//! Route definitions for the chip assignment engine.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chips;
use crate::state::AppState;

/// Chip routes mounted at `/chips`.
///
/// ```text
/// POST /assign                     -> assign_chip (staff)
/// GET  /{chip_number}              -> get_chip
/// POST /{chip_number}/deactivate   -> deactivate_chip (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/assign", post(chips::assign_chip))
        .route("/{chip_number}", get(chips::get_chip))
        .route("/{chip_number}/deactivate", post(chips::deactivate_chip))
}
