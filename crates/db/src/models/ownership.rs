//! Ownership-of-record history.

use petchip_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::user::User;

/// A row from the `ownership_history` table. Append-only; the single
/// current-owner row per animal is enforced by a partial unique index
/// plus the transactional flip in `OwnershipRepo::set_current_owner`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipRecord {
    pub history_id: DbId,
    pub animal_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub is_current_owner: bool,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub transfer_notes: Option<String>,
    pub created_at: Timestamp,
}

/// An ownership row with its user eager-loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipWithUser {
    #[serde(flatten)]
    pub record: OwnershipRecord,
    pub user: Option<User>,
}
