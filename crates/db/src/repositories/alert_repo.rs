//! Repository for the `alerts` (lost/found case) table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::alert::{Alert, AlertListParams, AlertWithAnimal, CreateAlert, UpdateAlert};

/// Column list for `alerts` queries.
const ALERT_COLUMNS: &str = "\
    alert_id, animal_id, reporter_user_id, status, message, last_seen_lat, \
    last_seen_long, last_seen_address, created_at, resolved_at";

/// Provides lost/found case CRUD.
pub struct AlertRepo;

impl AlertRepo {
    /// Open a new case. Input must already be sanitized and validated.
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts \
                (animal_id, reporter_user_id, message, last_seen_lat, last_seen_long, \
                 last_seen_address, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'Active') \
             RETURNING {ALERT_COLUMNS}"
        );
        let alert = sqlx::query_as::<_, Alert>(&query)
            .bind(input.animal_id)
            .bind(input.reporter_user_id)
            .bind(&input.message)
            .bind(input.last_seen_lat)
            .bind(input.last_seen_long)
            .bind(&input.last_seen_address)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            alert_id = %alert.alert_id,
            animal_id = ?alert.animal_id,
            has_location = alert.last_seen_lat.is_some(),
            "Lost/Found case created"
        );

        Ok(alert)
    }

    /// Find a case by primary key.
    pub async fn find_by_id(pool: &PgPool, alert_id: Uuid) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {ALERT_COLUMNS} FROM alerts WHERE alert_id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a case and attach the referenced animal when it resolves.
    /// A dangling animal reference is tolerated (`animal: None`).
    pub async fn find_with_animal(
        pool: &PgPool,
        alert_id: Uuid,
    ) -> Result<Option<AlertWithAnimal>, sqlx::Error> {
        let Some(alert) = Self::find_by_id(pool, alert_id).await? else {
            return Ok(None);
        };

        let animal = match alert.animal_id {
            Some(animal_id) => super::AnimalRepo::find_by_id(pool, animal_id).await?,
            None => None,
        };

        Ok(Some(AlertWithAnimal { alert, animal }))
    }

    /// List cases with optional equality filters, newest first.
    pub async fn list(pool: &PgPool, params: &AlertListParams) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {ALERT_COLUMNS} FROM alerts \
             WHERE ($1::alert_status IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR animal_id = $2) \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(params.status)
            .bind(params.animal_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse patch. Transitioning into a terminal status stamps
    /// `resolved_at`; other transitions leave it untouched.
    ///
    /// Returns `None` when the case does not exist.
    pub async fn update(
        pool: &PgPool,
        alert_id: Uuid,
        input: &UpdateAlert,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let stamp_resolved = input.status.is_some_and(|s| s.is_terminal());

        let query = format!(
            "UPDATE alerts SET \
                status = COALESCE($2, status), \
                message = COALESCE($3, message), \
                resolved_at = CASE WHEN $4 THEN now() ELSE resolved_at END \
             WHERE alert_id = $1 \
             RETURNING {ALERT_COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(alert_id)
            .bind(input.status)
            .bind(&input.message)
            .bind(stamp_resolved)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a case. Returns `false` when it does not exist.
    pub async fn delete(pool: &PgPool, alert_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts WHERE alert_id = $1")
            .bind(alert_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
