//! Lost/found alert entity and case DTOs.

use petchip_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::animal::Animal;
use super::enums::AlertStatus;

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub alert_id: Uuid,
    pub animal_id: Option<Uuid>,
    pub reporter_user_id: Option<Uuid>,
    pub status: AlertStatus,
    pub message: String,
    pub last_seen_lat: Option<f64>,
    pub last_seen_long: Option<f64>,
    pub last_seen_address: Option<String>,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Request body for `POST /lostfound`.
///
/// The message length rule applies to the sanitized text, so the handler
/// sanitizes in place before calling `validate()`. Coordinates are
/// both-or-neither; each is range-checked independently.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_coordinate_pair"))]
pub struct CreateAlert {
    pub animal_id: Uuid,
    pub reporter_user_id: Option<Uuid>,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub last_seen_lat: Option<f64>,
    #[validate(range(
        min = -180.0,
        max = 180.0,
        message = "Longitude must be between -180 and 180"
    ))]
    pub last_seen_long: Option<f64>,
    pub last_seen_address: Option<String>,
}

fn validate_coordinate_pair(alert: &CreateAlert) -> Result<(), ValidationError> {
    if alert.last_seen_lat.is_some() != alert.last_seen_long.is_some() {
        return Err(ValidationError::new("coordinate_pair")
            .with_message("Both latitude and longitude must be provided together".into()));
    }
    Ok(())
}

/// Sparse patch for `PATCH /lostfound/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlert {
    pub status: Option<AlertStatus>,
    pub message: Option<String>,
}

/// Query-string filters for `GET /lostfound`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertListParams {
    pub status: Option<AlertStatus>,
    pub animal_id: Option<Uuid>,
}

/// An alert with its referenced animal attached when the reference still
/// resolves (dangling references are tolerated).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertWithAnimal {
    #[serde(flatten)]
    pub alert: Alert,
    pub animal: Option<Animal>,
}
