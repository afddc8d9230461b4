//! Public chip lookup handlers (no authentication).
//!
//! The lookup endpoint is the citizen-facing "whose pet is this" path;
//! the validate endpoint is a non-throwing probe for scanner apps and
//! never returns an error status for bad input.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use petchip_core::error::CoreError;
use petchip_core::microchip::{normalize_chip_number, validate_chip};
use petchip_core::types::Timestamp;
use petchip_db::models::animal::Animal;
use petchip_db::models::chip::Chip;
use petchip_db::models::holding::Holding;
use petchip_db::repositories::{AnimalRepo, ChipRepo, HoldingRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload for `GET /lookup/chip/{chip_number}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    pub chip: Chip,
    pub animal: Animal,
    pub current_holding: Option<Holding>,
}

/// Payload for `GET /lookup/chip/{chip_number}/validate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipProbe {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /api/v1/lookup/chip/{chip_number}
///
/// Resolve a chip to its animal and current holding. An inactive chip is
/// deliberately a 403, not a 404: the chip exists but its binding must
/// not be disclosed.
pub async fn lookup_chip(
    State(state): State<AppState>,
    Path(chip_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    let chip_number = normalize_chip_number(&chip_number)?;

    let found = ChipRepo::find_with_animal(&state.pool, &chip_number)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Chip", &chip_number)))?;

    if !found.chip.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "This microchip has been deactivated".into(),
        )));
    }

    // Unbound chip or a binding whose animal row is gone: same answer.
    let Some(animal) = found.animal else {
        return Err(AppError::Core(CoreError::not_found("Animal", &chip_number)));
    };

    let current_holding = HoldingRepo::find_by_id(&state.pool, animal.current_holding_id).await?;

    Ok(Json(DataResponse {
        data: LookupResponse {
            chip: found.chip,
            animal,
            current_holding,
        },
    }))
}

/// GET /api/v1/lookup/chip/{chip_number}/validate
///
/// Non-throwing probe: malformed input and unknown chips are reported in
/// the body, never as an error status.
pub async fn probe_chip(
    State(state): State<AppState>,
    Path(chip_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    let chip_number = match normalize_chip_number(&chip_number) {
        Ok(number) => number,
        Err(_) => {
            return Ok(Json(DataResponse {
                data: ChipProbe {
                    valid: false,
                    status: None,
                    registered_at: None,
                    message: Some(
                        "Invalid microchip format. Must be 15 digits according to ISO 11784/11785"
                            .to_string(),
                    ),
                },
            }));
        }
    };

    if let Some(chip) = ChipRepo::find_by_number(&state.pool, &chip_number).await? {
        let bound = match chip.animal_id {
            Some(animal_id) => AnimalRepo::find_by_id(&state.pool, animal_id).await?.is_some(),
            None => false,
        };
        return Ok(Json(DataResponse {
            data: ChipProbe {
                valid: true,
                status: Some(if chip.is_active { "Active" } else { "Inactive" }),
                registered_at: Some(chip.created_at),
                message: (!bound).then(|| "Chip is not bound to an animal".to_string()),
            },
        }));
    }

    // Not in the local registry; fall back to the manufacturer directory.
    let validation = validate_chip(&chip_number, state.directory.as_ref());
    Ok(Json(DataResponse {
        data: ChipProbe {
            valid: validation.is_valid,
            status: None,
            registered_at: None,
            message: validation
                .message
                .or_else(|| Some("Microchip is valid but not registered in the system".to_string())),
        },
    }))
}
