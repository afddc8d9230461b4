//! Handlers for the animal registry.
//!
//! Registration is the one multi-entity write: the handler performs the
//! boundary work (sanitize, normalize, manufacturer validation, advisory
//! duplicate checks) and then hands the decision to
//! [`AnimalRepo::register`], which re-checks the chip under a row lock.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petchip_core::error::CoreError;
use petchip_core::microchip::{normalize_chip_number, validate_chip};
use petchip_core::sanitize::sanitize_text;
use petchip_core::search::SearchKey;
use petchip_db::models::animal::{RegisterAnimal, UpdateAnimal};
use petchip_db::models::health::CreateHealthRecord;
use petchip_db::repositories::{AnimalRepo, ChipRepo, HealthRecordRepo};
use serde::Deserialize;
use validator::Validate;

use super::parse_uuid;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query string for `GET /api/v1/animals`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// POST /api/v1/animals
///
/// Register an animal together with its microchip and, when an owner id
/// is supplied, the current-owner record. Staff only.
pub async fn register_animal(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<RegisterAnimal>,
) -> AppResult<impl IntoResponse> {
    input.official_id = sanitize_text(&input.official_id);
    if let Some(breed) = &input.breed {
        input.breed = Some(sanitize_text(breed));
    }
    input.validate()?;

    input.microchip_number = normalize_chip_number(&input.microchip_number)?;
    let validation = validate_chip(&input.microchip_number, state.directory.as_ref());
    if !validation.is_valid {
        return Err(AppError::BadRequest(
            validation
                .message
                .unwrap_or_else(|| "Invalid microchip number".to_string()),
        ));
    }

    // Advisory pre-checks for friendlier errors; the registration
    // transaction re-checks both under its row lock / unique constraints.
    if AnimalRepo::find_by_official_id(&state.pool, &input.official_id)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Animal with official ID {} already exists",
            input.official_id
        ))));
    }
    if let Some(chip) = ChipRepo::find_by_number(&state.pool, &input.microchip_number).await? {
        if chip.is_active {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Microchip {} is already registered to another animal",
                input.microchip_number
            ))));
        }
    }

    let registered = AnimalRepo::register(&state.pool, &input, &validation).await?;

    tracing::info!(
        animal_id = %registered.animal.animal_id,
        official_id = %registered.animal.official_id,
        user_id = %staff.user_id,
        "Animal registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: registered })))
}

/// GET /api/v1/animals?search=
///
/// Dual-key search: a 15-digit query resolves through the chip first and
/// falls back to official-id equality; anything else is official-id only.
pub async fn search_animals(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.search.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(AppError::BadRequest("Search query is required".into()));
    }

    let animal = match SearchKey::classify(&query) {
        SearchKey::ChipNumber(number) => {
            let via_chip = ChipRepo::find_with_animal(&state.pool, &number)
                .await?
                .and_then(|found| found.animal);
            match via_chip {
                Some(animal) => Some(animal),
                // A 15-digit official id is still reachable here.
                None => AnimalRepo::find_by_official_id(&state.pool, &number).await?,
            }
        }
        SearchKey::OfficialId(id) => AnimalRepo::find_by_official_id(&state.pool, &id).await?,
    };

    let Some(animal) = animal else {
        return Err(AppError::Core(CoreError::not_found("Animal", query.trim())));
    };

    let detail = AnimalRepo::load_detail(&state.pool, animal, false).await?;

    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/animals/{id}
///
/// Full detail including movement history.
pub async fn get_animal(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let animal_id = parse_uuid(&id, "animal ID")?;

    let animal = AnimalRepo::find_by_id(&state.pool, animal_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Animal", animal_id)))?;

    let detail = AnimalRepo::load_detail(&state.pool, animal, true).await?;

    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/animals/{id}
///
/// Sparse patch: only the fields present in the body are applied.
pub async fn update_animal(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut input): Json<UpdateAnimal>,
) -> AppResult<impl IntoResponse> {
    let animal_id = parse_uuid(&id, "animal ID")?;

    if input.is_empty() {
        return Err(AppError::BadRequest("No fields provided to update".into()));
    }
    if let Some(breed) = &input.breed {
        input.breed = Some(sanitize_text(breed));
    }

    let animal = AnimalRepo::update(&state.pool, animal_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Animal", animal_id)))?;

    tracing::info!(animal_id = %animal_id, user_id = %auth.user_id, "Animal updated");

    Ok(Json(DataResponse { data: animal }))
}

/// POST /api/v1/animals/{id}/medical-records
///
/// Append a health record. The animal's own status is never touched.
pub async fn add_medical_record(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut input): Json<CreateHealthRecord>,
) -> AppResult<impl IntoResponse> {
    let animal_id = parse_uuid(&id, "animal ID")?;

    if AnimalRepo::find_by_id(&state.pool, animal_id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("Animal", animal_id)));
    }

    if let Some(diagnosis) = &input.diagnosis {
        input.diagnosis = Some(sanitize_text(diagnosis));
    }
    if let Some(treatment) = &input.treatment_administered {
        input.treatment_administered = Some(sanitize_text(treatment));
    }
    if let Some(vet) = &input.veterinarian_name {
        input.veterinarian_name = Some(sanitize_text(vet));
    }

    let record = HealthRecordRepo::insert(&state.pool, animal_id, &input).await?;

    tracing::info!(
        animal_id = %animal_id,
        record_id = record.health_record_id,
        user_id = %auth.user_id,
        "Medical record added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}
