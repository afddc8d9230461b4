//! Repository for the `animal_health_records` table (append-only).

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::health::{CreateHealthRecord, HealthRecord};

/// Column list for `animal_health_records` queries.
const HEALTH_RECORD_COLUMNS: &str = "\
    health_record_id, animal_id, record_date, health_status, diagnosis, \
    treatment_administered, veterinarian_name, holding_id, created_at";

/// Provides append/read access to an animal's health history.
pub struct HealthRecordRepo;

impl HealthRecordRepo {
    /// Append a record. Never touches the animal row.
    pub async fn insert(
        pool: &PgPool,
        animal_id: Uuid,
        input: &CreateHealthRecord,
    ) -> Result<HealthRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO animal_health_records \
                (animal_id, record_date, health_status, diagnosis, \
                 treatment_administered, veterinarian_name, holding_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {HEALTH_RECORD_COLUMNS}"
        );
        let record = sqlx::query_as::<_, HealthRecord>(&query)
            .bind(animal_id)
            .bind(input.procedure_date)
            .bind(input.health_status)
            .bind(&input.diagnosis)
            .bind(&input.treatment_administered)
            .bind(&input.veterinarian_name)
            .bind(input.holding_id)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            animal_id = %animal_id,
            record_id = record.health_record_id,
            "Medical record added"
        );

        Ok(record)
    }

    /// All records for an animal, newest first.
    pub async fn list_for_animal(
        pool: &PgPool,
        animal_id: Uuid,
    ) -> Result<Vec<HealthRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {HEALTH_RECORD_COLUMNS} FROM animal_health_records \
             WHERE animal_id = $1 ORDER BY record_date DESC"
        );
        sqlx::query_as::<_, HealthRecord>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }
}
