//! Secondary behavioral signals from external analyzers.
//!
//! Analyzers score physical (gesture, eye contact) and speech behavior on a
//! 0–100 scale. Their output is untrusted: scores are clamped into range
//! rather than rejected, and an absent signal stays absent instead of
//! becoming a zero.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::scoring::{SignalKind, ValidationError};

/// Upper bound of the analyzer score scale.
pub const SIGNAL_SCALE_MAX: f64 = 100.0;

/// Reason recorded when an analyzer report carries a score but no reason.
pub const UNPARSED_REASON: &str = "Unable to parse analysis.";

/// One analyzer score with its free-text rationale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SecondarySignal {
    pub score: f64,
    #[serde(default)]
    pub reason: String,
}

impl SecondarySignal {
    pub fn new(score: f64, reason: impl Into<String>) -> Self {
        Self {
            score,
            reason: reason.into(),
        }
    }
}

/// The optional physical and speech signals supplied with a screening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SecondarySignals {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<SecondarySignal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<SecondarySignal>,
}

impl SecondarySignals {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn both(physical: SecondarySignal, speech: SecondarySignal) -> Self {
        Self {
            physical: Some(physical),
            speech: Some(speech),
        }
    }

    pub fn get(&self, kind: SignalKind) -> Option<&SecondarySignal> {
        match kind {
            SignalKind::Physical => self.physical.as_ref(),
            SignalKind::Speech => self.speech.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.physical.is_none() && self.speech.is_none()
    }
}

/// A signal mapped into probability space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedSignal {
    pub kind: SignalKind,
    /// Score exactly as supplied, before clamping.
    pub raw_score: f64,
    /// `clamp(raw_score, 0, 100) / 100`.
    pub probability: f64,
}

impl NormalizedSignal {
    pub fn was_clamped(&self) -> bool {
        !(0.0..=SIGNAL_SCALE_MAX).contains(&self.raw_score)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedSignals {
    pub physical: Option<NormalizedSignal>,
    pub speech: Option<NormalizedSignal>,
}

impl NormalizedSignals {
    pub fn is_empty(&self) -> bool {
        self.physical.is_none() && self.speech.is_none()
    }
}

/// Map one analyzer score onto [0, 1].
///
/// Out-of-range scores are clamped. NaN and infinities cannot be clamped
/// meaningfully and are rejected.
pub fn normalize_signal(
    kind: SignalKind,
    signal: &SecondarySignal,
) -> Result<NormalizedSignal, ValidationError> {
    if !signal.score.is_finite() {
        return Err(ValidationError::NonNumericScore { signal: kind });
    }

    let clamped = signal.score.clamp(0.0, SIGNAL_SCALE_MAX);
    Ok(NormalizedSignal {
        kind,
        raw_score: signal.score,
        probability: clamped / SIGNAL_SCALE_MAX,
    })
}

pub fn normalize_signals(signals: &SecondarySignals) -> Result<NormalizedSignals, ValidationError> {
    let physical = signals
        .physical
        .as_ref()
        .map(|s| normalize_signal(SignalKind::Physical, s))
        .transpose()?;
    let speech = signals
        .speech
        .as_ref()
        .map(|s| normalize_signal(SignalKind::Speech, s))
        .transpose()?;

    Ok(NormalizedSignals { physical, speech })
}

#[derive(Default)]
struct SignalDraft {
    score: Option<f64>,
    reason: Option<String>,
}

impl SignalDraft {
    fn finish(self) -> Option<SecondarySignal> {
        let score = self.score?;
        Some(SecondarySignal {
            score,
            reason: self
                .reason
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| UNPARSED_REASON.to_string()),
        })
    }
}

/// Parse the free-text report returned by a video analyzer.
///
/// Recognized lines (labels are case-insensitive, markdown emphasis is
/// ignored):
///
/// ```text
/// Physical Score: 65
/// Physical Reason: Avoids direct eye contact.
/// Speech Score: 40
/// Speech Reason: Slightly monotonous.
/// ```
///
/// Older analyzers emit a single `Score:` / `Reason:` pair, which is read as
/// the physical signal. Anything unparseable is treated as not provided.
pub fn parse_analyzer_report(text: &str) -> SecondarySignals {
    let mut physical = SignalDraft::default();
    let mut speech = SignalDraft::default();
    let mut legacy = SignalDraft::default();

    for line in text.lines() {
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim().trim_matches('*').trim().to_ascii_lowercase();
        let value = value.trim().trim_start_matches('*').trim();

        match label.as_str() {
            "physical score" => physical.score = parse_score(value),
            "physical reason" => physical.reason = Some(value.to_string()),
            "speech score" => speech.score = parse_score(value),
            "speech reason" => speech.reason = Some(value.to_string()),
            "score" => legacy.score = parse_score(value),
            "reason" => legacy.reason = Some(value.to_string()),
            _ => {}
        }
    }

    SecondarySignals {
        physical: physical.finish().or_else(|| legacy.finish()),
        speech: speech.finish(),
    }
}

/// Leading number of the first token: `"72 (elevated)"` and `"72/100"`
/// both give 72.
fn parse_score(value: &str) -> Option<f64> {
    let token = value.split_whitespace().next()?;
    let start = token.find(|c: char| c.is_ascii_digit())?;
    let rest = &token[start..];

    let mut end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if let Some(fraction) = rest[end..].strip_prefix('.') {
        let digits = fraction
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(fraction.len());
        if digits > 0 {
            end += 1 + digits;
        }
    }

    rest[..end].parse().ok()
}
