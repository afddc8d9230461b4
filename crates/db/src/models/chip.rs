//! Chip entity and assignment DTOs.

use chrono::NaiveDate;
use petchip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::animal::Animal;

/// A row from the `chips` table. One row per physical chip; rebinding
/// updates the row rather than inserting a sibling.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chip {
    pub chip_id: Uuid,
    pub chip_number: String,
    pub manufacturer: Option<String>,
    pub animal_id: Option<Uuid>,
    pub implantation_date: Option<NaiveDate>,
    pub implanted_by: Option<String>,
    pub holding_id: Option<DbId>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /chips/assign`.
///
/// `animal_id` is a raw string; the handler validates the UUID format and
/// maps failures to a 400 rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignChip {
    pub chip_number: String,
    pub animal_id: String,
    pub implantation_date: Option<NaiveDate>,
    pub implanter_id: Option<String>,
    pub holding_id: Option<DbId>,
}

/// A chip with its bound animal eager-loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipWithAnimal {
    #[serde(flatten)]
    pub chip: Chip,
    pub animal: Option<Animal>,
}

/// How an assignment resolved: a brand-new chip row, or an existing
/// (inactive or unbound) row rebound to the animal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Assigned,
    Reassigned,
}

impl AssignOutcome {
    pub fn message(self) -> &'static str {
        match self {
            AssignOutcome::Assigned => "Chip successfully assigned to animal",
            AssignOutcome::Reassigned => "Chip successfully reassigned to animal",
        }
    }
}
