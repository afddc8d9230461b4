//! PostgreSQL enum mappings.
//!
//! Variant spellings must match the values declared in
//! `db/migrations/0001_init.sql`; several carry spaces and are renamed
//! explicitly for both sqlx and the JSON wire format.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "animal_species")]
pub enum AnimalSpecies {
    Cattle,
    Sheep,
    Goat,
    Horse,
    Poultry,
    Dog,
    Cat,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "animal_sex")]
pub enum AnimalSex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "animal_status")]
pub enum AnimalStatus {
    Alive,
    Deceased,
    Sold,
    Slaughtered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "holding_type")]
pub enum HoldingType {
    Farm,
    Household,
    #[sqlx(rename = "Commercial Enterprise")]
    #[serde(rename = "Commercial Enterprise")]
    CommercialEnterprise,
    Pastoral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "holding_status")]
pub enum HoldingStatus {
    Active,
    Inactive,
    Suspended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "alert_status")]
pub enum AlertStatus {
    Active,
    Resolved,
    #[sqlx(rename = "False Alarm")]
    #[serde(rename = "False Alarm")]
    FalseAlarm,
}

impl AlertStatus {
    /// Whether transitioning into this status closes the case (and must
    /// stamp `resolved_at`).
    pub fn is_terminal(self) -> bool {
        matches!(self, AlertStatus::Resolved | AlertStatus::FalseAlarm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "health_status")]
pub enum HealthStatus {
    Healthy,
    Sick,
    #[sqlx(rename = "Under Treatment")]
    #[serde(rename = "Under Treatment")]
    UnderTreatment,
    Quarantined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "movement_type")]
pub enum MovementType {
    Sale,
    Transfer,
    Loan,
    Exhibition,
    Slaughter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    Veterinarian,
    #[sqlx(rename = "Government Officer")]
    #[serde(rename = "Government Officer")]
    GovernmentOfficer,
    Farmer,
    #[sqlx(rename = "System Admin")]
    #[serde(rename = "System Admin")]
    SystemAdmin,
    Citizen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status")]
pub enum UserStatus {
    Active,
    Inactive,
}
