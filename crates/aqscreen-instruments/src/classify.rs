//! Mapping from fused probability to the reported categories.
//!
//! Risk level and confidence use different cut points. The binary
//! prediction is positive only for `High` risk; `Medium` is still a
//! negative prediction.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const HIGH_RISK_THRESHOLD: f64 = 0.6;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;
pub const MODERATE_CONFIDENCE_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `[0.6, 1]` High, `[0.4, 0.6)` Medium, below 0.4 Low.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else if probability >= MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display-only label. Not a risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_CONFIDENCE_THRESHOLD {
            Confidence::High
        } else if probability >= MODERATE_CONFIDENCE_THRESHOLD {
            Confidence::Moderate
        } else {
            Confidence::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Moderate => "Moderate",
            Confidence::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1 when `probability >= 0.6`, else 0.
pub fn prediction(probability: f64) -> u8 {
    u8::from(probability >= HIGH_RISK_THRESHOLD)
}
