//! Route definitions for public chip lookup. No authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::lookup;
use crate::state::AppState;

/// Public lookup routes mounted at `/lookup`.
///
/// ```text
/// GET /chip/{chip_number}           -> lookup_chip
/// GET /chip/{chip_number}/validate  -> probe_chip
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chip/{chip_number}", get(lookup::lookup_chip))
        .route("/chip/{chip_number}/validate", get(lookup::probe_chip))
}
