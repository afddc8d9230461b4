//! Holding (owner-of-record) entity and CRUD DTOs.

use chrono::NaiveDate;
use petchip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::enums::{HoldingStatus, HoldingType};

/// A row from the `holdings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub holding_id: DbId,
    pub holding_name: String,
    pub holding_type: HoldingType,
    pub owner_name: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub status: HoldingStatus,
    pub area_id: DbId,
    pub registration_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /owners`.
///
/// Name fields are sanitized in place by the handler before `validate()`
/// runs, so the length rules apply to the stored form.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHolding {
    #[validate(length(min = 2, message = "Holding name must be at least 2 characters"))]
    pub holding_name: String,
    pub holding_type: HoldingType,
    #[validate(length(min = 2, message = "Owner name must be at least 2 characters"))]
    pub owner_name: String,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub area_id: DbId,
}

/// Sparse patch for `PATCH /owners/{id}`: only present fields are
/// applied; name fields are re-validated when supplied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHolding {
    pub holding_name: Option<String>,
    pub owner_name: Option<String>,
    pub contact_phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<HoldingStatus>,
}

/// Query-string filters for `GET /owners`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingListParams {
    pub holding_type: Option<HoldingType>,
    pub status: Option<HoldingStatus>,
    pub area_id: Option<DbId>,
}
