//! Health records and vaccinations (append-only medical history).

use chrono::NaiveDate;
use petchip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::enums::HealthStatus;

/// A row from the `animal_health_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub health_record_id: DbId,
    pub animal_id: Uuid,
    pub record_date: NaiveDate,
    pub health_status: Option<HealthStatus>,
    pub diagnosis: Option<String>,
    pub treatment_administered: Option<String>,
    pub veterinarian_name: Option<String>,
    pub holding_id: DbId,
    pub created_at: Timestamp,
}

/// Request body for `POST /animals/{id}/medical-records`.
///
/// Appending a record never touches `animals.status`, even when
/// `health_status` implies the animal died; that linkage is out of scope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthRecord {
    pub procedure_date: NaiveDate,
    pub holding_id: DbId,
    pub health_status: Option<HealthStatus>,
    pub diagnosis: Option<String>,
    pub treatment_administered: Option<String>,
    pub veterinarian_name: Option<String>,
}

/// A row from the `vaccinations` table (read-only in this service).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    pub vaccination_id: DbId,
    pub animal_id: Uuid,
    pub vaccine_type: String,
    pub vaccine_batch: Option<String>,
    pub administration_date: NaiveDate,
    pub next_due_date: Option<NaiveDate>,
    pub administering_veterinarian: Option<String>,
    pub holding_id: DbId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}
