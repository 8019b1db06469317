use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use aqscreen_core::models::screening::ScreeningRecord;
use aqscreen_instruments::RawScreeningRequest;
use aqscreen_storage::records;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub async fn list_screenings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<ScreeningRecord>>, ApiError> {
    let screenings = records::list_screenings(state.store.as_ref(), &user.user_id)?;
    Ok(Json(screenings))
}

/// Score the submission server-side and keep both request and result.
pub async fn create_screening(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<RawScreeningRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScreeningRecord>), ApiError> {
    let Json(raw) = payload?;
    let request = raw.into_request(state.engine.instrument())?;
    let result = state.engine.screen(&request)?;

    let record = ScreeningRecord::new(user.user_id, &request, &result)?;
    records::save_screening(state.store.as_ref(), &record)?;
    tracing::info!(id = %record.id, risk_level = %result.risk_level, "screening saved");

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_screening(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ScreeningRecord>, ApiError> {
    let Path(id) = path?;
    let record = records::get_screening(state.store.as_ref(), &user.user_id, id)?;
    Ok(Json(record))
}

pub async fn delete_screening(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = path?;
    records::delete_screening(state.store.as_ref(), &user.user_id, id)?;
    tracing::info!(id = %id, "screening deleted");
    Ok(StatusCode::NO_CONTENT)
}
