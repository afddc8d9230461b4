pub mod animals;
pub mod chips;
pub mod health;
pub mod lookup;
pub mod lostfound;
pub mod owners;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /animals                                 register (POST, staff), search (GET)
/// /animals/{id}                            get, update (PUT)
/// /animals/{id}/medical-records            append record (POST)
///
/// /chips/assign                            assign chip (POST, staff)
/// /chips/{chip_number}                     get chip + animal
/// /chips/{chip_number}/deactivate          deactivate (POST, staff)
///
/// /lookup/chip/{chip_number}               public lookup (no auth)
/// /lookup/chip/{chip_number}/validate      public non-throwing probe (no auth)
///
/// /owners                                  register (POST), list (GET)
/// /owners/{id}                             get, update (PATCH), soft delete (DELETE)
///
/// /lostfound                               open case (POST), list (GET)
/// /lostfound/{id}                          get, update (PATCH), delete (DELETE)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/animals", animals::router())
        .nest("/chips", chips::router())
        .nest("/lookup", lookup::router())
        .nest("/owners", owners::router())
        .nest("/lostfound", lostfound::router())
}
