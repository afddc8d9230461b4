//! Route definitions for the animal registry.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::animals;
use crate::state::AppState;

/// Animal routes mounted at `/animals`.
///
/// ```text
/// POST /                      -> register_animal (staff)
/// GET  /?search=              -> search_animals
/// GET  /{id}                  -> get_animal
/// PUT  /{id}                  -> update_animal
/// POST /{id}/medical-records  -> add_medical_record
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(animals::register_animal).get(animals::search_animals),
        )
        .route("/{id}", get(animals::get_animal).put(animals::update_animal))
        .route("/{id}/medical-records", post(animals::add_medical_record))
}
