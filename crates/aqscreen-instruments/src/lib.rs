//! aqscreen-instruments
//!
//! Screening questionnaire definitions and the risk scoring engine. Pure
//! computation: no I/O, no logging, no shared mutable state. Turns raw AQ-10
//! answers plus optional behavioral signals into a bounded, reproducible risk
//! category. It never produces a diagnosis.

pub mod classify;
pub mod engine;
pub mod error;
pub mod fusion;
pub mod importance;
pub mod instruments;
pub mod narrative;
pub mod recommendations;
pub mod scoring;
pub mod signals;

pub use engine::{RawScreeningRequest, ScreeningEngine, ScreeningRequest, ScreeningResult};

use error::InstrumentError;
use scoring::{AnswerSet, QuestionnaireItem, ValidationError};

/// Trait implemented by each screening questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "aq10").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "AQ-10").
    fn name(&self) -> &str;

    /// The items, in declaration order.
    fn items(&self) -> &[QuestionnaireItem];

    /// Check that every item is answered with 0 or 1.
    fn validate_answers(&self, answers: &AnswerSet) -> Result<(), ValidationError> {
        scoring::check_answers(self.items(), answers)?;
        Ok(())
    }

    /// Render answers as plain sentences for inclusion in an assistant prompt.
    fn formatted_answers(&self, answers: &AnswerSet) -> Vec<String> {
        self.items()
            .iter()
            .filter_map(|item| match answers.get(item.id)? {
                1 => Some(item.text.clone()),
                _ => Some(format!("User did not agree that: {}", item.text)),
            })
            .collect()
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::aq10::Aq10)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Validate answers against the named instrument.
pub fn validate_for(id: &str, answers: &AnswerSet) -> Result<(), InstrumentError> {
    let instrument =
        get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))?;
    instrument.validate_answers(answers)?;
    Ok(())
}
