//! Repository for the `animals` table and the registration transaction.
//!
//! Registration is the one multi-entity write in the system: animal,
//! chip and (optionally) ownership rows must become visible atomically.
//! The chip row is locked inside the transaction, so the pre-flight
//! "chip already active" check handlers perform is advisory only — the
//! decision made here under the row lock is authoritative.

use petchip_core::error::CoreError;
use petchip_core::microchip::ChipValidation;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::alert::Alert;
use crate::models::animal::{Animal, AnimalDetail, RegisterAnimal, RegisteredAnimal, UpdateAnimal};
use crate::models::chip::Chip;
use crate::models::health::{HealthRecord, Vaccination};
use crate::models::movement::Movement;
use crate::repositories::{ChipRepo, HoldingRepo, OwnershipRepo};

/// Column list for `animals` queries.
const ANIMAL_COLUMNS: &str = "\
    animal_id, official_id, species, breed, sex, date_of_birth, \
    current_holding_id, birth_holding_id, status, registration_date, \
    created_at, updated_at";

/// Provides animal lifecycle operations.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Find an animal by primary key.
    pub async fn find_by_id(pool: &PgPool, animal_id: Uuid) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE animal_id = $1");
        sqlx::query_as::<_, Animal>(&query)
            .bind(animal_id)
            .fetch_optional(pool)
            .await
    }

    /// Find an animal by its externally assigned official id.
    pub async fn find_by_official_id(
        pool: &PgPool,
        official_id: &str,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {ANIMAL_COLUMNS} FROM animals WHERE official_id = $1");
        sqlx::query_as::<_, Animal>(&query)
            .bind(official_id)
            .fetch_optional(pool)
            .await
    }

    /// Register a new animal together with its chip and optional
    /// ownership record, atomically.
    ///
    /// Expects `input.microchip_number` already normalized and
    /// `validation` to have passed. Inside the transaction:
    ///
    /// 1. The chip row for this number (if any) is locked with
    ///    `FOR UPDATE`; an active row aborts with a conflict. This closes
    ///    the race between two concurrent registrations of the same
    ///    number — the second blocks on the lock (or on the
    ///    `uq_chips_chip_number` insert) and then fails.
    /// 2. The animal is inserted; a duplicate official id surfaces as a
    ///    unique-constraint violation on `uq_animals_official_id`.
    /// 3. The chip is rebound (preserving stored manufacturer/implant
    ///    fields when the validation result has none) or inserted fresh.
    /// 4. When `owner_id` is present it is parsed *here* so a malformed
    ///    value rolls back the animal and chip writes too, then the
    ///    current-owner row is written.
    pub async fn register(
        pool: &PgPool,
        input: &RegisterAnimal,
        validation: &ChipValidation,
    ) -> Result<RegisteredAnimal, DbError> {
        let chip_number = &input.microchip_number;
        let mut tx = pool.begin().await?;

        let existing_chip = ChipRepo::lock_by_number(&mut tx, chip_number).await?;
        if let Some(chip) = &existing_chip {
            if chip.is_active {
                return Err(CoreError::Conflict(format!(
                    "Microchip {chip_number} is already registered to another animal"
                ))
                .into());
            }
        }

        let insert_animal = format!(
            "INSERT INTO animals \
                (official_id, species, breed, sex, date_of_birth, \
                 current_holding_id, birth_holding_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'Alive')) \
             RETURNING {ANIMAL_COLUMNS}"
        );
        let animal = sqlx::query_as::<_, Animal>(&insert_animal)
            .bind(&input.official_id)
            .bind(input.species)
            .bind(&input.breed)
            .bind(input.sex)
            .bind(input.date_of_birth)
            .bind(input.current_holding_id)
            .bind(input.birth_holding_id)
            .bind(input.status)
            .fetch_one(&mut *tx)
            .await?;

        let implant_date = validation
            .implant_date
            .as_deref()
            .and_then(|d| d.parse::<chrono::NaiveDate>().ok());

        let chip = match existing_chip {
            Some(prior) => {
                ChipRepo::rebind(
                    &mut tx,
                    prior.chip_id,
                    animal.animal_id,
                    validation.manufacturer.as_deref(),
                    implant_date,
                    None,
                    Some(input.current_holding_id),
                )
                .await?
            }
            None => {
                ChipRepo::insert_bound(
                    &mut tx,
                    chip_number,
                    animal.animal_id,
                    validation.manufacturer.as_deref(),
                    implant_date,
                    None,
                    Some(input.current_holding_id),
                )
                .await?
            }
        };

        let ownership = match &input.owner_id {
            Some(raw) => {
                let owner_id: Uuid = raw.parse().map_err(|_| {
                    CoreError::Validation("Invalid owner ID format".to_string())
                })?;
                Some(OwnershipRepo::set_current_owner(&mut tx, animal.animal_id, owner_id).await?)
            }
            None => None,
        };

        tx.commit().await?;

        tracing::info!(
            animal_id = %animal.animal_id,
            chip_number = %chip_number,
            "Animal registered"
        );

        Ok(RegisteredAnimal {
            microchip_number: chip_number.clone(),
            animal,
            chip,
            ownership,
        })
    }

    /// Apply a sparse patch. Returns `None` when the animal does not exist.
    pub async fn update(
        pool: &PgPool,
        animal_id: Uuid,
        input: &UpdateAnimal,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "UPDATE animals SET \
                species = COALESCE($2, species), \
                breed = COALESCE($3, breed), \
                sex = COALESCE($4, sex), \
                date_of_birth = COALESCE($5, date_of_birth), \
                current_holding_id = COALESCE($6, current_holding_id), \
                status = COALESCE($7, status), \
                updated_at = now() \
             WHERE animal_id = $1 \
             RETURNING {ANIMAL_COLUMNS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(animal_id)
            .bind(input.species)
            .bind(&input.breed)
            .bind(input.sex)
            .bind(input.date_of_birth)
            .bind(input.current_holding_id)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Load the eager-loaded detail shape for an already-fetched animal.
    ///
    /// Collections come back most-recent-first. Movement history is only
    /// fetched for direct id lookups (`include_movements`).
    pub async fn load_detail(
        pool: &PgPool,
        animal: Animal,
        include_movements: bool,
    ) -> Result<AnimalDetail, sqlx::Error> {
        let animal_id = animal.animal_id;

        let current_holding = HoldingRepo::find_by_id(pool, animal.current_holding_id).await?;
        let birth_holding = if animal.birth_holding_id == animal.current_holding_id {
            current_holding.clone()
        } else {
            HoldingRepo::find_by_id(pool, animal.birth_holding_id).await?
        };

        let chips = sqlx::query_as::<_, Chip>(
            "SELECT chip_id, chip_number, manufacturer, animal_id, implantation_date, \
                    implanted_by, holding_id, is_active, created_at, updated_at \
             FROM chips WHERE animal_id = $1 ORDER BY created_at DESC",
        )
        .bind(animal_id)
        .fetch_all(pool)
        .await?;

        let vaccinations = sqlx::query_as::<_, Vaccination>(
            "SELECT vaccination_id, animal_id, vaccine_type, vaccine_batch, \
                    administration_date, next_due_date, administering_veterinarian, \
                    holding_id, notes, created_at \
             FROM vaccinations WHERE animal_id = $1 \
             ORDER BY administration_date DESC",
        )
        .bind(animal_id)
        .fetch_all(pool)
        .await?;

        let health_records = sqlx::query_as::<_, HealthRecord>(
            "SELECT health_record_id, animal_id, record_date, health_status, diagnosis, \
                    treatment_administered, veterinarian_name, holding_id, created_at \
             FROM animal_health_records WHERE animal_id = $1 \
             ORDER BY record_date DESC",
        )
        .bind(animal_id)
        .fetch_all(pool)
        .await?;

        let ownership_history = OwnershipRepo::current_for_animal(pool, animal_id)
            .await?
            .into_iter()
            .collect();

        let alerts = sqlx::query_as::<_, Alert>(
            "SELECT alert_id, animal_id, reporter_user_id, status, message, \
                    last_seen_lat, last_seen_long, last_seen_address, created_at, resolved_at \
             FROM alerts WHERE animal_id = $1 ORDER BY created_at DESC",
        )
        .bind(animal_id)
        .fetch_all(pool)
        .await?;

        let movements = if include_movements {
            Some(
                sqlx::query_as::<_, Movement>(
                    "SELECT movement_id, animal_id, from_holding_id, to_holding_id, \
                            movement_date, movement_type, movement_reason, \
                            official_permit_number, recorded_by, created_at \
                     FROM animal_movements WHERE animal_id = $1 \
                     ORDER BY movement_date DESC",
                )
                .bind(animal_id)
                .fetch_all(pool)
                .await?,
            )
        } else {
            None
        };

        Ok(AnimalDetail {
            animal,
            current_holding,
            birth_holding,
            chips,
            vaccinations,
            health_records,
            ownership_history,
            alerts,
            movements,
        })
    }
}
