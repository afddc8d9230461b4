//! Repository for the `ownership_history` table.
//!
//! The table is append-only, but the "at most one current owner per
//! animal" invariant is enforced actively: installing a new current
//! owner first closes any open row (flip `is_current_owner`, stamp
//! `end_date`) inside the caller's transaction. A partial unique index
//! backs this up at the schema level.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::models::ownership::{OwnershipRecord, OwnershipWithUser};
use crate::models::user::User;

/// Column list for `ownership_history` queries.
const OWNERSHIP_COLUMNS: &str = "\
    history_id, animal_id, user_id, is_current_owner, start_date, \
    end_date, transfer_notes, created_at";

/// Provides ownership-of-record reads and the current-owner transition.
pub struct OwnershipRepo;

impl OwnershipRepo {
    /// Install `user_id` as the current owner of `animal_id`.
    ///
    /// Runs inside the caller's transaction so a failure later in the
    /// flow (e.g. registration) also rolls back the ownership change.
    pub async fn set_current_owner(
        tx: &mut Transaction<'_, Postgres>,
        animal_id: Uuid,
        user_id: Uuid,
    ) -> Result<OwnershipRecord, sqlx::Error> {
        // Close any open current-owner row before inserting the new one.
        sqlx::query(
            "UPDATE ownership_history SET is_current_owner = FALSE, end_date = now() \
             WHERE animal_id = $1 AND is_current_owner",
        )
        .bind(animal_id)
        .execute(&mut **tx)
        .await?;

        let query = format!(
            "INSERT INTO ownership_history (animal_id, user_id, is_current_owner, start_date) \
             VALUES ($1, $2, TRUE, now()) \
             RETURNING {OWNERSHIP_COLUMNS}"
        );
        sqlx::query_as::<_, OwnershipRecord>(&query)
            .bind(animal_id)
            .bind(user_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// The current-owner row for an animal, with its user attached.
    pub async fn current_for_animal(
        pool: &PgPool,
        animal_id: Uuid,
    ) -> Result<Option<OwnershipWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNERSHIP_COLUMNS} FROM ownership_history \
             WHERE animal_id = $1 AND is_current_owner"
        );
        let Some(record) = sqlx::query_as::<_, OwnershipRecord>(&query)
            .bind(animal_id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let user = match record.user_id {
            Some(user_id) => {
                sqlx::query_as::<_, User>(
                    "SELECT user_id, username, email, phone_number, full_name, user_role, \
                            area_id, status, created_at, updated_at \
                     FROM users WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_optional(pool)
                .await?
            }
            None => None,
        };

        Ok(Some(OwnershipWithUser { record, user }))
    }

    /// Full ownership history for an animal, newest first.
    pub async fn history_for_animal(
        pool: &PgPool,
        animal_id: Uuid,
    ) -> Result<Vec<OwnershipRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {OWNERSHIP_COLUMNS} FROM ownership_history \
             WHERE animal_id = $1 ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, OwnershipRecord>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }
}
