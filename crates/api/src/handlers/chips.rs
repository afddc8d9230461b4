//! Handlers for the chip assignment engine.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use petchip_core::error::CoreError;
use petchip_core::microchip::{normalize_chip_number, validate_chip};
use petchip_db::models::chip::AssignChip;
use petchip_db::repositories::{AnimalRepo, ChipRepo};
use serde::Deserialize;

use super::parse_uuid;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `POST /chips/{chip_number}/deactivate`.
#[derive(Debug, Default, Deserialize)]
pub struct DeactivateRequest {
    /// Audit note; logged, not persisted.
    pub reason: Option<String>,
}

/// POST /api/v1/chips/assign
///
/// Bind a chip number to an existing animal. Staff only. The repository
/// decides assign-vs-reassign under a row lock on the chip number.
pub async fn assign_chip(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(mut input): Json<AssignChip>,
) -> AppResult<impl IntoResponse> {
    let animal_id = parse_uuid(&input.animal_id, "animal ID")?;
    input.chip_number = normalize_chip_number(&input.chip_number)?;

    let validation = validate_chip(&input.chip_number, state.directory.as_ref());
    if !validation.is_valid {
        return Err(AppError::BadRequest(
            validation
                .message
                .unwrap_or_else(|| "Invalid microchip number".to_string()),
        ));
    }

    if AnimalRepo::find_by_id(&state.pool, animal_id).await?.is_none() {
        return Err(AppError::Core(CoreError::not_found("Animal", animal_id)));
    }

    let (outcome, chip) = ChipRepo::assign(
        &state.pool,
        animal_id,
        &input,
        validation.manufacturer.as_deref(),
    )
    .await?;

    tracing::info!(
        chip_number = %chip.chip_number,
        animal_id = %animal_id,
        user_id = %staff.user_id,
        "Chip assignment completed",
    );

    Ok(Json(MessageResponse {
        message: outcome.message().to_string(),
        data: chip,
    }))
}

/// GET /api/v1/chips/{chip_number}
///
/// Chip with its bound animal eager-loaded.
pub async fn get_chip(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(chip_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    let chip_number = normalize_chip_number(&chip_number)?;

    let found = ChipRepo::find_with_animal(&state.pool, &chip_number)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chip", &chip_number)))?;

    Ok(Json(DataResponse { data: found }))
}

/// POST /api/v1/chips/{chip_number}/deactivate
///
/// Flip an active chip to inactive. Staff only.
pub async fn deactivate_chip(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(chip_number): Path<String>,
    Json(input): Json<DeactivateRequest>,
) -> AppResult<impl IntoResponse> {
    let chip_number = normalize_chip_number(&chip_number)?;

    let chip = ChipRepo::deactivate(&state.pool, &chip_number, input.reason.as_deref()).await?;

    tracing::info!(
        chip_number = %chip_number,
        user_id = %staff.user_id,
        "Chip deactivated",
    );

    Ok(Json(MessageResponse {
        message: "Chip deactivated successfully".to_string(),
        data: chip,
    }))
}
