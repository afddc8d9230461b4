//! Repository for the `holdings` table.
//!
//! Holding names are unique per administrative area, not globally; the
//! pair is re-checked on create and rename, with the
//! `uq_holdings_name_area` constraint as the backstop. Holdings are
//! never hard-deleted — "delete" is a status flip to Inactive.

use petchip_core::error::CoreError;
use petchip_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::enums::HoldingStatus;
use crate::models::holding::{CreateHolding, Holding, HoldingListParams, UpdateHolding};

/// Column list for `holdings` queries.
const HOLDING_COLUMNS: &str = "\
    holding_id, holding_name, holding_type, owner_name, contact_phone, \
    address, status, area_id, registration_date, created_at, updated_at";

/// Provides holding (owner-of-record) CRUD.
pub struct HoldingRepo;

impl HoldingRepo {
    /// Find a holding by primary key.
    pub async fn find_by_id(pool: &PgPool, holding_id: DbId) -> Result<Option<Holding>, sqlx::Error> {
        let query = format!("SELECT {HOLDING_COLUMNS} FROM holdings WHERE holding_id = $1");
        sqlx::query_as::<_, Holding>(&query)
            .bind(holding_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a holding with this name already exists in the area.
    pub async fn name_exists_in_area(
        pool: &PgPool,
        holding_name: &str,
        area_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM holdings WHERE holding_name = $1 AND area_id = $2)",
        )
        .bind(holding_name)
        .bind(area_id)
        .fetch_one(pool)
        .await?;
        Ok(exists.0)
    }

    /// Register a new holding. Fields must already be sanitized and
    /// length-validated by the caller.
    pub async fn create(pool: &PgPool, input: &CreateHolding) -> Result<Holding, DbError> {
        if Self::name_exists_in_area(pool, &input.holding_name, input.area_id).await? {
            return Err(CoreError::Conflict(format!(
                "A holding with name \"{}\" already exists in this area",
                input.holding_name
            ))
            .into());
        }

        let query = format!(
            "INSERT INTO holdings \
                (holding_name, holding_type, owner_name, contact_phone, address, area_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6, 'Active') \
             RETURNING {HOLDING_COLUMNS}"
        );
        let holding = sqlx::query_as::<_, Holding>(&query)
            .bind(&input.holding_name)
            .bind(input.holding_type)
            .bind(&input.owner_name)
            .bind(&input.contact_phone)
            .bind(&input.address)
            .bind(input.area_id)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            holding_id = holding.holding_id,
            holding_name = %holding.holding_name,
            "Holding registered"
        );

        Ok(holding)
    }

    /// List holdings with optional equality filters.
    pub async fn list(
        pool: &PgPool,
        params: &HoldingListParams,
    ) -> Result<Vec<Holding>, sqlx::Error> {
        let query = format!(
            "SELECT {HOLDING_COLUMNS} FROM holdings \
             WHERE ($1::holding_type IS NULL OR holding_type = $1) \
               AND ($2::holding_status IS NULL OR status = $2) \
               AND ($3::bigint IS NULL OR area_id = $3) \
             ORDER BY holding_id"
        );
        sqlx::query_as::<_, Holding>(&query)
            .bind(params.holding_type)
            .bind(params.status)
            .bind(params.area_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a sparse patch. Renames re-check the name/area pair.
    ///
    /// Returns `None` when the holding does not exist.
    pub async fn update(
        pool: &PgPool,
        holding_id: DbId,
        input: &UpdateHolding,
    ) -> Result<Option<Holding>, DbError> {
        let Some(existing) = Self::find_by_id(pool, holding_id).await? else {
            return Ok(None);
        };

        if let Some(new_name) = &input.holding_name {
            if new_name != &existing.holding_name
                && Self::name_exists_in_area(pool, new_name, existing.area_id).await?
            {
                return Err(CoreError::Conflict(format!(
                    "A holding with name \"{new_name}\" already exists in this area"
                ))
                .into());
            }
        }

        let query = format!(
            "UPDATE holdings SET \
                holding_name = COALESCE($2, holding_name), \
                owner_name = COALESCE($3, owner_name), \
                contact_phone = COALESCE($4, contact_phone), \
                address = COALESCE($5, address), \
                status = COALESCE($6, status), \
                updated_at = now() \
             WHERE holding_id = $1 \
             RETURNING {HOLDING_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Holding>(&query)
            .bind(holding_id)
            .bind(&input.holding_name)
            .bind(&input.owner_name)
            .bind(&input.contact_phone)
            .bind(&input.address)
            .bind(input.status)
            .fetch_optional(pool)
            .await?;

        Ok(updated)
    }

    /// Soft-delete: flip status to Inactive. Returns `false` when the
    /// holding does not exist.
    pub async fn soft_delete(pool: &PgPool, holding_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE holdings SET status = $2, updated_at = now() WHERE holding_id = $1",
        )
        .bind(holding_id)
        .bind(HoldingStatus::Inactive)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
