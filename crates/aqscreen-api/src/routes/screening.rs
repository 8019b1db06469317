use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use aqscreen_instruments::narrative::{EvidenceSummary, SummaryOptions};
use aqscreen_instruments::{RawScreeningRequest, ScreeningResult};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub screening_result: ScreeningResult,
    #[serde(default)]
    pub include_recommendations: Option<bool>,
}

pub async fn screen(
    State(state): State<AppState>,
    payload: Result<Json<RawScreeningRequest>, JsonRejection>,
) -> Result<Json<ScreeningResult>, ApiError> {
    let Json(raw) = payload?;
    let request = raw.into_request(state.engine.instrument())?;
    let result = state.engine.screen(&request)?;

    tracing::info!(
        risk_level = %result.risk_level,
        fused = result.fusion_details.is_some(),
        "screening scored"
    );
    Ok(Json(result))
}

pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<EvidenceSummary>, ApiError> {
    let Json(req) = payload?;
    let options = SummaryOptions {
        include_recommendations: req
            .include_recommendations
            .unwrap_or(SummaryOptions::default().include_recommendations),
    };

    Ok(Json(state.narrative.summarize(&req.screening_result, &options)))
}
