//! Handlers for the holding (owner-of-record) registry.
//!
//! Name fields are sanitized *before* validation so the length rules
//! apply to the form that is actually stored.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petchip_core::error::CoreError;
use petchip_core::sanitize::{sanitize_phone, sanitize_text};
use petchip_core::types::DbId;
use petchip_db::models::holding::{CreateHolding, Holding, HoldingListParams, UpdateHolding};
use petchip_db::repositories::HoldingRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Payload for `GET /api/v1/owners`.
#[derive(Debug, Serialize)]
pub struct OwnerList {
    pub total: usize,
    pub owners: Vec<Holding>,
}

/// POST /api/v1/owners
///
/// Register a holding. The name must be unique within its administrative
/// area; the same name in a different area is allowed.
pub async fn create_holding(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateHolding>,
) -> AppResult<impl IntoResponse> {
    input.holding_name = sanitize_text(&input.holding_name);
    input.owner_name = sanitize_text(&input.owner_name);
    if let Some(phone) = &input.contact_phone {
        input.contact_phone = Some(sanitize_phone(phone));
    }
    if let Some(address) = &input.address {
        input.address = Some(sanitize_text(address));
    }
    input.validate()?;

    let holding = HoldingRepo::create(&state.pool, &input).await?;

    tracing::info!(
        holding_id = holding.holding_id,
        user_id = %auth.user_id,
        "Holding registered",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: holding })))
}

/// GET /api/v1/owners?holdingType=&status=&areaId=
pub async fn list_holdings(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HoldingListParams>,
) -> AppResult<impl IntoResponse> {
    let owners = HoldingRepo::list(&state.pool, &params).await?;

    Ok(Json(DataResponse {
        data: OwnerList {
            total: owners.len(),
            owners,
        },
    }))
}

/// GET /api/v1/owners/{id}
pub async fn get_holding(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(holding_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let holding = HoldingRepo::find_by_id(&state.pool, holding_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Holding", holding_id)))?;

    Ok(Json(DataResponse { data: holding }))
}

/// PATCH /api/v1/owners/{id}
///
/// Sparse patch; supplied name fields are re-sanitized and re-checked
/// for minimum length, and a rename re-checks the name/area pair.
pub async fn update_holding(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(holding_id): Path<DbId>,
    Json(mut input): Json<UpdateHolding>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.holding_name {
        let name = sanitize_text(name);
        if name.chars().count() < 2 {
            return Err(AppError::Core(CoreError::Validation(
                "Holding name must be at least 2 characters".into(),
            )));
        }
        input.holding_name = Some(name);
    }
    if let Some(name) = &input.owner_name {
        let name = sanitize_text(name);
        if name.chars().count() < 2 {
            return Err(AppError::Core(CoreError::Validation(
                "Owner name must be at least 2 characters".into(),
            )));
        }
        input.owner_name = Some(name);
    }
    if let Some(phone) = &input.contact_phone {
        input.contact_phone = Some(sanitize_phone(phone));
    }
    if let Some(address) = &input.address {
        input.address = Some(sanitize_text(address));
    }

    let holding = HoldingRepo::update(&state.pool, holding_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Holding", holding_id)))?;

    tracing::info!(holding_id, user_id = %auth.user_id, "Holding updated");

    Ok(Json(DataResponse { data: holding }))
}

/// DELETE /api/v1/owners/{id}
///
/// Soft delete: flips the holding to Inactive. Rows are never removed.
pub async fn delete_holding(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(holding_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deactivated = HoldingRepo::soft_delete(&state.pool, holding_id).await?;
    if !deactivated {
        return Err(AppError::Core(CoreError::not_found("Holding", holding_id)));
    }

    tracing::info!(holding_id, user_id = %auth.user_id, "Holding deactivated");

    Ok(Json(MessageResponse {
        message: "Holding deactivated successfully".to_string(),
        data: serde_json::json!({ "holdingId": holding_id }),
    }))
}
