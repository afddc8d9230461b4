//! Route definitions for the lost/found alert manager.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::lostfound;
use crate::state::AppState;

/// Lost/found routes mounted at `/lostfound`.
///
/// ```text
/// POST   /       -> create_alert
/// GET    /       -> list_alerts
/// GET    /{id}   -> get_alert
/// PATCH  /{id}   -> update_alert
/// DELETE /{id}   -> delete_alert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(lostfound::create_alert).get(lostfound::list_alerts),
        )
        .route(
            "/{id}",
            get(lostfound::get_alert)
                .patch(lostfound::update_alert)
                .delete(lostfound::delete_alert),
        )
}
