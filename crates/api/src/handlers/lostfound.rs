//! Handlers for the lost/found alert manager.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use petchip_core::error::CoreError;
use petchip_core::sanitize::sanitize_text;
use petchip_db::models::alert::{Alert, AlertListParams, CreateAlert, UpdateAlert};
use petchip_db::repositories::{AlertRepo, AnimalRepo};
use serde::Serialize;
use validator::Validate;

use super::parse_uuid;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Payload for `GET /api/v1/lostfound`.
#[derive(Debug, Serialize)]
pub struct CaseList {
    pub total: usize,
    pub cases: Vec<Alert>,
}

/// POST /api/v1/lostfound
///
/// Open a case. The message length rule applies to the sanitized text,
/// and coordinates must be supplied as a pair when at all.
pub async fn create_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateAlert>,
) -> AppResult<impl IntoResponse> {
    input.message = sanitize_text(&input.message);
    if let Some(address) = &input.last_seen_address {
        input.last_seen_address = Some(sanitize_text(address));
    }
    input.validate()?;

    if AnimalRepo::find_by_id(&state.pool, input.animal_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::not_found(
            "Animal",
            input.animal_id,
        )));
    }

    if input.reporter_user_id.is_none() {
        input.reporter_user_id = Some(auth.user_id);
    }

    let alert = AlertRepo::create(&state.pool, &input).await?;

    tracing::info!(
        alert_id = %alert.alert_id,
        animal_id = ?alert.animal_id,
        user_id = %auth.user_id,
        "Lost/Found case opened",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: alert })))
}

/// GET /api/v1/lostfound/{id}
///
/// Case with its animal attached when the reference still resolves.
pub async fn get_alert(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let alert_id = parse_uuid(&id, "alert ID")?;

    let found = AlertRepo::find_with_animal(&state.pool, alert_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Alert", alert_id)))?;

    Ok(Json(DataResponse { data: found }))
}

/// GET /api/v1/lostfound?status=&animalId=
pub async fn list_alerts(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> AppResult<impl IntoResponse> {
    let cases = AlertRepo::list(&state.pool, &params).await?;

    Ok(Json(DataResponse {
        data: CaseList {
            total: cases.len(),
            cases,
        },
    }))
}

/// PATCH /api/v1/lostfound/{id}
///
/// Sparse patch. Transitioning into Resolved or False Alarm stamps
/// `resolved_at`; the repository handles the timestamp.
pub async fn update_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut input): Json<UpdateAlert>,
) -> AppResult<impl IntoResponse> {
    let alert_id = parse_uuid(&id, "alert ID")?;

    if let Some(message) = &input.message {
        let message = sanitize_text(message);
        if message.chars().count() < 10 {
            return Err(AppError::Core(CoreError::Validation(
                "Message must be at least 10 characters".into(),
            )));
        }
        input.message = Some(message);
    }

    let alert = AlertRepo::update(&state.pool, alert_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Alert", alert_id)))?;

    tracing::info!(alert_id = %alert_id, user_id = %auth.user_id, "Lost/Found case updated");

    Ok(Json(DataResponse { data: alert }))
}

/// DELETE /api/v1/lostfound/{id}
///
/// Hard delete.
pub async fn delete_alert(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let alert_id = parse_uuid(&id, "alert ID")?;

    let deleted = AlertRepo::delete(&state.pool, alert_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found("Alert", alert_id)));
    }

    tracing::info!(alert_id = %alert_id, user_id = %auth.user_id, "Lost/Found case deleted");

    Ok(StatusCode::NO_CONTENT)
}
