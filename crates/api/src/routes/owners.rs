//! Route definitions for the holding (owner) registry.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::owners;
use crate::state::AppState;

/// Owner routes mounted at `/owners`.
///
/// ```text
/// POST   /       -> create_holding
/// GET    /       -> list_holdings
/// GET    /{id}   -> get_holding
/// PATCH  /{id}   -> update_holding
/// DELETE /{id}   -> delete_holding (soft)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(owners::create_holding).get(owners::list_holdings))
        .route(
            "/{id}",
            get(owners::get_holding)
                .patch(owners::update_holding)
                .delete(owners::delete_holding),
        )
}
