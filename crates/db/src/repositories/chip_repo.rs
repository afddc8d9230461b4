//! Repository for the `chips` table and the chip state machine.
//!
//! Per chip number the lifecycle is
//! `Unbound -> Active(animal=X) -> Inactive -> Active(animal=Y) -> ...`
//! with exactly one row per physical chip: assignment rebinds the
//! existing row under a lock, never inserts a sibling. The
//! `uq_chips_chip_number` constraint is the backstop for concurrent
//! first-time inserts.

use chrono::NaiveDate;
use petchip_core::error::CoreError;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::chip::{AssignChip, AssignOutcome, Chip, ChipWithAnimal};

/// Column list for `chips` queries.
const CHIP_COLUMNS: &str = "\
    chip_id, chip_number, manufacturer, animal_id, implantation_date, \
    implanted_by, holding_id, is_active, created_at, updated_at";

/// Provides chip binding and lifecycle operations.
pub struct ChipRepo;

impl ChipRepo {
    /// Find a chip by its 15-digit number.
    pub async fn find_by_number(
        pool: &PgPool,
        chip_number: &str,
    ) -> Result<Option<Chip>, sqlx::Error> {
        let query = format!("SELECT {CHIP_COLUMNS} FROM chips WHERE chip_number = $1");
        sqlx::query_as::<_, Chip>(&query)
            .bind(chip_number)
            .fetch_optional(pool)
            .await
    }

    /// Find a chip with its bound animal eager-loaded.
    pub async fn find_with_animal(
        pool: &PgPool,
        chip_number: &str,
    ) -> Result<Option<ChipWithAnimal>, sqlx::Error> {
        let Some(chip) = Self::find_by_number(pool, chip_number).await? else {
            return Ok(None);
        };

        let animal = match chip.animal_id {
            Some(animal_id) => {
                super::AnimalRepo::find_by_id(pool, animal_id).await?
            }
            None => None,
        };

        Ok(Some(ChipWithAnimal { chip, animal }))
    }

    /// Lock the chip row for this number inside an open transaction.
    ///
    /// Serializes concurrent registration/assignment attempts on the
    /// same number: whoever gets the lock decides insert-vs-rebind, the
    /// rest wait and then see the committed state.
    pub async fn lock_by_number(
        tx: &mut Transaction<'_, Postgres>,
        chip_number: &str,
    ) -> Result<Option<Chip>, sqlx::Error> {
        let query = format!("SELECT {CHIP_COLUMNS} FROM chips WHERE chip_number = $1 FOR UPDATE");
        sqlx::query_as::<_, Chip>(&query)
            .bind(chip_number)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a fresh chip row bound to an animal, active.
    pub async fn insert_bound(
        tx: &mut Transaction<'_, Postgres>,
        chip_number: &str,
        animal_id: Uuid,
        manufacturer: Option<&str>,
        implantation_date: Option<NaiveDate>,
        implanted_by: Option<&str>,
        holding_id: Option<i64>,
    ) -> Result<Chip, sqlx::Error> {
        let query = format!(
            "INSERT INTO chips \
                (chip_number, manufacturer, animal_id, implantation_date, \
                 implanted_by, holding_id, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, TRUE) \
             RETURNING {CHIP_COLUMNS}"
        );
        sqlx::query_as::<_, Chip>(&query)
            .bind(chip_number)
            .bind(manufacturer)
            .bind(animal_id)
            .bind(implantation_date)
            .bind(implanted_by)
            .bind(holding_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Rebind an existing chip row to an animal and reactivate it.
    ///
    /// Optional fields fall back to the previously stored values when the
    /// caller supplies none.
    pub async fn rebind(
        tx: &mut Transaction<'_, Postgres>,
        chip_id: Uuid,
        animal_id: Uuid,
        manufacturer: Option<&str>,
        implantation_date: Option<NaiveDate>,
        implanted_by: Option<&str>,
        holding_id: Option<i64>,
    ) -> Result<Chip, sqlx::Error> {
        let query = format!(
            "UPDATE chips SET \
                animal_id = $2, \
                is_active = TRUE, \
                manufacturer = COALESCE($3, manufacturer), \
                implantation_date = COALESCE($4, implantation_date), \
                implanted_by = COALESCE($5, implanted_by), \
                holding_id = COALESCE($6, holding_id), \
                updated_at = now() \
             WHERE chip_id = $1 \
             RETURNING {CHIP_COLUMNS}"
        );
        sqlx::query_as::<_, Chip>(&query)
            .bind(chip_id)
            .bind(animal_id)
            .bind(manufacturer)
            .bind(implantation_date)
            .bind(implanted_by)
            .bind(holding_id)
            .fetch_one(&mut **tx)
            .await
    }

    /// Assign a chip number to an animal.
    ///
    /// State machine, decided under the row lock:
    /// - no row: insert bound + active ("assigned")
    /// - active on another animal: conflict, no automatic steal
    /// - active on the *same* animal: conflict ("already assigned")
    /// - inactive (whatever it was bound to): rebind + reactivate
    ///   ("reassigned")
    pub async fn assign(
        pool: &PgPool,
        animal_id: Uuid,
        input: &AssignChip,
        manufacturer: Option<&str>,
    ) -> Result<(AssignOutcome, Chip), DbError> {
        let chip_number = &input.chip_number;
        let mut tx = pool.begin().await?;

        let existing = Self::lock_by_number(&mut tx, chip_number).await?;

        let (outcome, chip) = match existing {
            None => {
                let chip = Self::insert_bound(
                    &mut tx,
                    chip_number,
                    animal_id,
                    manufacturer,
                    input.implantation_date,
                    input.implanter_id.as_deref(),
                    input.holding_id,
                )
                .await?;
                (AssignOutcome::Assigned, chip)
            }
            Some(prior) if prior.is_active => {
                let message = if prior.animal_id == Some(animal_id) {
                    format!("Chip {chip_number} is already assigned to this animal")
                } else {
                    format!("Chip {chip_number} is already assigned to another animal")
                };
                return Err(CoreError::Conflict(message).into());
            }
            Some(prior) => {
                let chip = Self::rebind(
                    &mut tx,
                    prior.chip_id,
                    animal_id,
                    manufacturer,
                    input.implantation_date,
                    input.implanter_id.as_deref(),
                    input.holding_id,
                )
                .await?;
                (AssignOutcome::Reassigned, chip)
            }
        };

        tx.commit().await?;

        tracing::info!(
            chip_number = %chip_number,
            animal_id = %animal_id,
            outcome = ?outcome,
            "Chip assigned"
        );

        Ok((outcome, chip))
    }

    /// Deactivate a chip. Fails if the chip is unknown or already
    /// inactive. `reason` is an audit note, logged but not persisted.
    pub async fn deactivate(
        pool: &PgPool,
        chip_number: &str,
        reason: Option<&str>,
    ) -> Result<Chip, DbError> {
        let Some(chip) = Self::find_by_number(pool, chip_number).await? else {
            return Err(CoreError::not_found("Chip", chip_number).into());
        };

        if !chip.is_active {
            return Err(CoreError::Validation("Chip is already deactivated".to_string()).into());
        }

        let query = format!(
            "UPDATE chips SET is_active = FALSE, updated_at = now() \
             WHERE chip_id = $1 \
             RETURNING {CHIP_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Chip>(&query)
            .bind(chip.chip_id)
            .fetch_one(pool)
            .await?;

        tracing::info!(chip_number = %chip_number, reason = ?reason, "Chip deactivated");

        Ok(updated)
    }
}
