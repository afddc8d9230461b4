//! Animal movement history (read-only in this service; loaded into the
//! get-by-id detail shape).

use chrono::NaiveDate;
use petchip_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::enums::MovementType;

/// A row from the `animal_movements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub movement_id: DbId,
    pub animal_id: Uuid,
    pub from_holding_id: DbId,
    pub to_holding_id: DbId,
    pub movement_date: NaiveDate,
    pub movement_type: MovementType,
    pub movement_reason: Option<String>,
    pub official_permit_number: Option<String>,
    pub recorded_by: Option<String>,
    pub created_at: Timestamp,
}
