//! Animal entity, registration/update DTOs and the eager-loaded detail
//! shape returned by search and get-by-id.

use chrono::NaiveDate;
use petchip_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::alert::Alert;
use super::chip::Chip;
use super::enums::{AnimalSex, AnimalSpecies, AnimalStatus};
use super::health::{HealthRecord, Vaccination};
use super::holding::Holding;
use super::movement::Movement;
use super::ownership::OwnershipWithUser;

/// A row from the `animals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub animal_id: Uuid,
    pub official_id: String,
    pub species: AnimalSpecies,
    pub breed: Option<String>,
    pub sex: AnimalSex,
    pub date_of_birth: Option<NaiveDate>,
    pub current_holding_id: DbId,
    pub birth_holding_id: DbId,
    pub status: AnimalStatus,
    pub registration_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration request body (`POST /animals`).
///
/// `owner_id` stays a raw string on purpose: its format is validated
/// inside the registration transaction so a malformed value rolls the
/// whole write back (animal and chip included).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAnimal {
    #[validate(length(min = 15, message = "microchipNumber must be 15 digits"))]
    pub microchip_number: String,
    #[validate(length(min = 1, message = "officialId is required"))]
    pub official_id: String,
    pub species: AnimalSpecies,
    pub sex: AnimalSex,
    pub breed: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub status: Option<AnimalStatus>,
    pub owner_id: Option<String>,
    pub current_holding_id: DbId,
    pub birth_holding_id: DbId,
}

/// Sparse patch for `PUT /animals/{id}`: only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnimal {
    pub species: Option<AnimalSpecies>,
    pub breed: Option<String>,
    pub sex: Option<AnimalSex>,
    pub date_of_birth: Option<NaiveDate>,
    pub current_holding_id: Option<DbId>,
    pub status: Option<AnimalStatus>,
}

impl UpdateAnimal {
    pub fn is_empty(&self) -> bool {
        self.species.is_none()
            && self.breed.is_none()
            && self.sex.is_none()
            && self.date_of_birth.is_none()
            && self.current_holding_id.is_none()
            && self.status.is_none()
    }
}

/// Eager-loaded animal as returned by search and get-by-id.
///
/// Collections are ordered most-recent-first. `movements` is only loaded
/// for direct id lookup and omitted from the JSON otherwise.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalDetail {
    #[serde(flatten)]
    pub animal: Animal,
    pub current_holding: Option<Holding>,
    pub birth_holding: Option<Holding>,
    pub chips: Vec<Chip>,
    pub vaccinations: Vec<Vaccination>,
    pub health_records: Vec<HealthRecord>,
    /// The current-owner row (with its user), if any.
    pub ownership_history: Vec<OwnershipWithUser>,
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movements: Option<Vec<Movement>>,
}

/// Registration response: the new animal merged with its chip and the
/// ownership record when one was created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredAnimal {
    #[serde(flatten)]
    pub animal: Animal,
    pub microchip_number: String,
    pub chip: Chip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ownership: Option<super::ownership::OwnershipRecord>,
}
