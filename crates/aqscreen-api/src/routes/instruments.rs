use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use aqscreen_instruments::scoring::QuestionnaireItem;
use aqscreen_instruments::{all_instruments, get_instrument};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: String,
    name: String,
    item_count: usize,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: String,
    name: String,
    items: Vec<QuestionnaireItem>,
}

#[derive(Serialize)]
pub struct QuestionList {
    questions: Vec<QuestionnaireItem>,
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            item_count: i.items().len(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let Path(id) = path?;
    let instrument = get_instrument(&id)
        .ok_or_else(|| ApiError::NotFound(format!("instrument not found: {id}")))?;

    Ok(Json(InstrumentDetail {
        id: instrument.id().to_string(),
        name: instrument.name().to_string(),
        items: instrument.items().to_vec(),
    }))
}

/// The items the configured engine scores, in presentation order.
pub async fn list_questions(State(state): State<AppState>) -> Json<QuestionList> {
    Json(QuestionList {
        questions: state.engine.instrument().items().to_vec(),
    })
}
