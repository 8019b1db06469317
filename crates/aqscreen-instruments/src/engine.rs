//! The screening pipeline: validate, score, normalize, fuse, classify,
//! recommend.
//!
//! [`ScreeningEngine::screen`] is a pure function of its input. The engine
//! holds only immutable configuration, so one instance can be shared across
//! any number of concurrent callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::classify::{self, Confidence, RiskLevel};
use crate::fusion::{self, FusionDetails};
use crate::importance::{FeatureImportance, FlatImportance};
use crate::instruments::aq10::Aq10;
use crate::recommendations;
use crate::scoring::{self, AnswerSet, ContributingFactor, ItemId, SignalKind, ValidationError};
use crate::signals::{self, SecondarySignal, SecondarySignals};
use crate::Instrument;

/// One screening submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningRequest {
    pub answers: AnswerSet,
    #[serde(default)]
    pub secondary: SecondarySignals,
}

impl ScreeningRequest {
    pub fn questionnaire_only(answers: AnswerSet) -> Self {
        Self {
            answers,
            secondary: SecondarySignals::none(),
        }
    }
}

/// A submission as it arrives over the wire, before value checks.
///
/// Answer values and signal scores are kept as raw JSON so that a wrongly
/// typed value is reported as a [`ValidationError`] naming its field rather
/// than as a decode failure.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawScreeningRequest {
    pub answers: BTreeMap<ItemId, Value>,
    #[serde(default)]
    pub secondary: RawSecondarySignals,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSecondarySignals {
    #[serde(default)]
    pub physical: Option<RawSecondarySignal>,
    #[serde(default)]
    pub speech: Option<RawSecondarySignal>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSecondarySignal {
    pub score: Value,
    #[serde(default)]
    pub reason: String,
}

impl RawScreeningRequest {
    /// Check value types and ranges against `instrument`.
    ///
    /// Errors come in the same order as [`ScreeningEngine::screen`]: missing
    /// answers, then the first invalid answer, then the first non-numeric
    /// score.
    pub fn into_request(
        self,
        instrument: &dyn Instrument,
    ) -> Result<ScreeningRequest, ValidationError> {
        let missing: Vec<ItemId> = instrument
            .items()
            .iter()
            .map(|item| item.id)
            .filter(|id| !self.answers.contains_key(id))
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingAnswers { missing });
        }

        let mut answers = AnswerSet::new();
        for item in instrument.items() {
            let Some(raw) = self.answers.get(&item.id) else {
                continue;
            };
            let value = raw
                .as_u64()
                .and_then(|v| u8::try_from(v).ok())
                .filter(|v| *v <= 1)
                .ok_or_else(|| ValidationError::InvalidAnswer {
                    item: item.id,
                    value: raw.to_string(),
                })?;
            answers.insert(item.id, value);
        }

        let secondary = SecondarySignals {
            physical: raw_signal(SignalKind::Physical, self.secondary.physical)?,
            speech: raw_signal(SignalKind::Speech, self.secondary.speech)?,
        };

        Ok(ScreeningRequest { answers, secondary })
    }
}

fn raw_signal(
    kind: SignalKind,
    raw: Option<RawSecondarySignal>,
) -> Result<Option<SecondarySignal>, ValidationError> {
    raw.map(|raw| {
        let score = raw
            .score
            .as_f64()
            .ok_or(ValidationError::NonNumericScore { signal: kind })?;
        Ok(SecondarySignal::new(score, raw.reason))
    })
    .transpose()
}

/// Everything the engine reports for one submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScreeningResult {
    pub prediction: u8,
    pub probability: f64,
    pub risk_level: RiskLevel,
    pub confidence: Confidence,
    pub aq10_total: u8,
    pub social_score: u8,
    pub attention_score: u8,
    pub contributing_factors: Vec<ContributingFactor>,
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fusion_details: Option<FusionDetails>,
}

pub struct ScreeningEngine {
    instrument: Box<dyn Instrument>,
    importance: Box<dyn FeatureImportance>,
}

impl Default for ScreeningEngine {
    fn default() -> Self {
        Self {
            instrument: Box::new(Aq10),
            importance: Box::new(FlatImportance::default()),
        }
    }
}

impl ScreeningEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contributing-factor weight source.
    pub fn with_importance(mut self, importance: impl FeatureImportance + 'static) -> Self {
        self.importance = Box::new(importance);
        self
    }

    pub fn instrument(&self) -> &dyn Instrument {
        self.instrument.as_ref()
    }

    pub fn screen(&self, request: &ScreeningRequest) -> Result<ScreeningResult, ValidationError> {
        self.instrument.validate_answers(&request.answers)?;
        let normalized = signals::normalize_signals(&request.secondary)?;

        let score = scoring::score_answers(
            self.instrument.items(),
            &request.answers,
            self.importance.as_ref(),
        )?;
        let fused = fusion::fuse(score.aq10_total, &normalized);
        let risk_level = RiskLevel::from_probability(fused.probability);

        Ok(ScreeningResult {
            prediction: classify::prediction(fused.probability),
            probability: fused.probability,
            risk_level,
            confidence: Confidence::from_probability(fused.probability),
            aq10_total: score.aq10_total,
            social_score: score.social_score,
            attention_score: score.attention_score,
            contributing_factors: score.contributing_factors,
            recommendations: recommendations::recommendations_for(risk_level),
            fusion_details: fused.details,
        })
    }
}

/// Screen with the default AQ-10 engine.
pub fn screen(request: &ScreeningRequest) -> Result<ScreeningResult, ValidationError> {
    ScreeningEngine::default().screen(request)
}
