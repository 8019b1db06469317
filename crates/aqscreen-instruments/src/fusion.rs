//! Weighted fusion of the questionnaire with secondary signals.
//!
//! The weights depend on which signals are present:
//!
//! | signals        | AQ-10 | physical | speech |
//! |----------------|-------|----------|--------|
//! | none           | 1.0   | –        | –      |
//! | one            | 0.7   | 0.3 (the present one) |
//! | both           | 0.5   | 0.25     | 0.25   |
//!
//! The single-signal split is the legacy one-score analyzer path and is kept
//! as its own branch. It is not derived from the two-signal weights.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::SignalKind;
use crate::signals::{NormalizedSignal, NormalizedSignals};

pub const COMBINED_AQ10_WEIGHT: f64 = 0.5;
pub const COMBINED_SIGNAL_WEIGHT: f64 = 0.25;
pub const SINGLE_SIGNAL_AQ10_WEIGHT: f64 = 0.7;
pub const SINGLE_SIGNAL_WEIGHT: f64 = 0.3;

/// Number of AQ-10 items; the questionnaire probability is `total / 10`.
pub const AQ10_ITEM_COUNT: f64 = 10.0;

/// Which fusion rule produced the final probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionPath {
    QuestionnaireOnly,
    SingleSignal(SignalKind),
    Combined,
}

/// Per-term audit trail, present whenever a secondary signal contributed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FusionDetails {
    pub aq10_contribution: f64,
    pub physical_contribution: Option<f64>,
    pub speech_contribution: Option<f64>,
    pub original_aq10_prob: f64,
    pub original_physical_score: Option<f64>,
    pub original_speech_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fusion {
    pub probability: f64,
    pub path: FusionPath,
    pub details: Option<FusionDetails>,
}

pub fn questionnaire_probability(aq10_total: u8) -> f64 {
    f64::from(aq10_total) / AQ10_ITEM_COUNT
}

/// Combine the questionnaire total with whatever signals are present.
pub fn fuse(aq10_total: u8, signals: &NormalizedSignals) -> Fusion {
    let aq10_prob = questionnaire_probability(aq10_total);

    match (signals.physical, signals.speech) {
        (None, None) => Fusion {
            probability: bounded(aq10_prob),
            path: FusionPath::QuestionnaireOnly,
            details: None,
        },
        (Some(physical), Some(speech)) => {
            let aq10_term = COMBINED_AQ10_WEIGHT * aq10_prob;
            let physical_term = COMBINED_SIGNAL_WEIGHT * physical.probability;
            let speech_term = COMBINED_SIGNAL_WEIGHT * speech.probability;

            Fusion {
                probability: bounded(aq10_term + physical_term + speech_term),
                path: FusionPath::Combined,
                details: Some(FusionDetails {
                    aq10_contribution: round2(aq10_term),
                    physical_contribution: Some(round2(physical_term)),
                    speech_contribution: Some(round2(speech_term)),
                    original_aq10_prob: aq10_prob,
                    original_physical_score: Some(physical.raw_score),
                    original_speech_score: Some(speech.raw_score),
                }),
            }
        }
        (Some(only), None) | (None, Some(only)) => single_signal(aq10_prob, only),
    }
}

fn single_signal(aq10_prob: f64, signal: NormalizedSignal) -> Fusion {
    let aq10_term = SINGLE_SIGNAL_AQ10_WEIGHT * aq10_prob;
    let signal_term = SINGLE_SIGNAL_WEIGHT * signal.probability;

    let (physical_contribution, original_physical_score, speech_contribution, original_speech_score) =
        match signal.kind {
            SignalKind::Physical => (Some(round2(signal_term)), Some(signal.raw_score), None, None),
            SignalKind::Speech => (None, None, Some(round2(signal_term)), Some(signal.raw_score)),
        };

    Fusion {
        probability: bounded(aq10_term + signal_term),
        path: FusionPath::SingleSignal(signal.kind),
        details: Some(FusionDetails {
            aq10_contribution: round2(aq10_term),
            physical_contribution,
            speech_contribution,
            original_aq10_prob: aq10_prob,
            original_physical_score,
            original_speech_score,
        }),
    }
}

/// Decimal places kept in a fused probability.
pub const PROBABILITY_PRECISION: i32 = 9;

/// Snap a weighted sum to [`PROBABILITY_PRECISION`] places and clamp it to
/// [0, 1].
///
/// A sum that is exactly on a risk threshold in decimal must classify as
/// that threshold: `0.7 * 0.4 + 0.3 * 0.4` is `0.39999999999999997` in
/// binary and would otherwise read as Low.
fn bounded(probability: f64) -> f64 {
    let scale = 10f64.powi(PROBABILITY_PRECISION);
    ((probability * scale).round() / scale).clamp(0.0, 1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
