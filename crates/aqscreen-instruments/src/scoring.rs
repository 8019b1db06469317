use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::importance::FeatureImportance;

/// Maximum number of contributing factors reported per screening.
pub const MAX_CONTRIBUTING_FACTORS: usize = 5;

/// Identifier of one AQ-10 item.
///
/// Serialized as `"A1"`..`"A10"`; the legacy `"A1_Score"` form is accepted
/// on input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub enum ItemId {
    #[serde(alias = "A1_Score")]
    A1,
    #[serde(alias = "A2_Score")]
    A2,
    #[serde(alias = "A3_Score")]
    A3,
    #[serde(alias = "A4_Score")]
    A4,
    #[serde(alias = "A5_Score")]
    A5,
    #[serde(alias = "A6_Score")]
    A6,
    #[serde(alias = "A7_Score")]
    A7,
    #[serde(alias = "A8_Score")]
    A8,
    #[serde(alias = "A9_Score")]
    A9,
    #[serde(alias = "A10_Score")]
    A10,
}

impl ItemId {
    /// All items in declaration order.
    pub const ALL: [ItemId; 10] = [
        ItemId::A1,
        ItemId::A2,
        ItemId::A3,
        ItemId::A4,
        ItemId::A5,
        ItemId::A6,
        ItemId::A7,
        ItemId::A8,
        ItemId::A9,
        ItemId::A10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemId::A1 => "A1",
            ItemId::A2 => "A2",
            ItemId::A3 => "A3",
            ItemId::A4 => "A4",
            ItemId::A5 => "A5",
            ItemId::A6 => "A6",
            ItemId::A7 => "A7",
            ItemId::A8 => "A8",
            ItemId::A9 => "A9",
            ItemId::A10 => "A10",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The trait dimension an item measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Dimension {
    /// Social communication.
    Social,
    /// Attention to detail and attention switching.
    Attention,
}

/// One fixed questionnaire item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireItem {
    pub id: ItemId,
    pub text: String,
    pub dimension: Dimension,
    /// Whether "agree" indicates a neurotypical response for this item.
    /// Carried as reference data; scoring sums the raw agreement bit.
    pub reversed: bool,
}

/// Binary answers keyed by item. One entry per item is required before
/// scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AnswerSet(pub BTreeMap<ItemId, u8>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every item set to the same value.
    pub fn uniform(value: u8) -> Self {
        ItemId::ALL.iter().map(|id| (*id, value)).collect()
    }

    pub fn get(&self, id: ItemId) -> Option<u8> {
        self.0.get(&id).copied()
    }

    pub fn insert(&mut self, id: ItemId, value: u8) -> Option<u8> {
        self.0.insert(id, value)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<u8> {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ItemId, u8)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (ItemId, u8)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// An item answered "present", with the weight attributed to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContributingFactor {
    pub feature: ItemId,
    pub question: String,
    pub value: u8,
    pub importance: f64,
}

/// Output of the questionnaire scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireScore {
    pub aq10_total: u8,
    pub social_score: u8,
    pub attention_score: u8,
    pub contributing_factors: Vec<ContributingFactor>,
}

/// Secondary behavioral signal source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SignalKind {
    Physical,
    Speech,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Physical => "physical",
            SignalKind::Speech => "speech",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incomplete or malformed screening input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationError {
    #[error("missing answers for {}", join_ids(.missing))]
    MissingAnswers { missing: Vec<ItemId> },

    /// `value` is the submitted value as written in the request.
    #[error("answer {item} must be 0 or 1, got {value}")]
    InvalidAnswer { item: ItemId, value: String },

    #[error("{signal} score is not a finite number")]
    NonNumericScore { signal: SignalKind },
}

impl ValidationError {
    /// Request field paths responsible for the error.
    pub fn fields(&self) -> Vec<String> {
        match self {
            ValidationError::MissingAnswers { missing } => missing
                .iter()
                .map(|id| format!("answers.{id}"))
                .collect(),
            ValidationError::InvalidAnswer { item, .. } => vec![format!("answers.{item}")],
            ValidationError::NonNumericScore { signal } => {
                vec![format!("secondary.{signal}.score")]
            }
        }
    }
}

fn join_ids(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Pair every item with its answer.
///
/// All missing items are reported together; otherwise the first
/// out-of-range answer in table order is reported.
pub fn check_answers<'a>(
    items: &'a [QuestionnaireItem],
    answers: &AnswerSet,
) -> Result<Vec<(&'a QuestionnaireItem, u8)>, ValidationError> {
    let missing: Vec<ItemId> = items
        .iter()
        .map(|item| item.id)
        .filter(|id| answers.get(*id).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingAnswers { missing });
    }

    items
        .iter()
        .filter_map(|item| answers.get(item.id).map(|value| (item, value)))
        .map(|(item, value)| match value {
            0 | 1 => Ok((item, value)),
            _ => Err(ValidationError::InvalidAnswer {
                item: item.id,
                value: value.to_string(),
            }),
        })
        .collect()
}

/// Score an answer set against an item table.
///
/// Answers are checked first with [`check_answers`]; nothing is defaulted.
/// The total and both sub-scores sum the raw answer bits; the `reversed`
/// flag is not applied. Contributing factors are the items answered 1, in
/// table order, capped at [`MAX_CONTRIBUTING_FACTORS`].
pub fn score_answers(
    items: &[QuestionnaireItem],
    answers: &AnswerSet,
    importance: &dyn FeatureImportance,
) -> Result<QuestionnaireScore, ValidationError> {
    let values = check_answers(items, answers)?;

    let mut aq10_total = 0u8;
    let mut social_score = 0u8;
    let mut attention_score = 0u8;
    let mut contributing_factors = Vec::new();

    for (item, value) in values {
        aq10_total = aq10_total.saturating_add(value);
        match item.dimension {
            Dimension::Social => social_score = social_score.saturating_add(value),
            Dimension::Attention => attention_score = attention_score.saturating_add(value),
        }

        if value == 1 && contributing_factors.len() < MAX_CONTRIBUTING_FACTORS {
            contributing_factors.push(ContributingFactor {
                feature: item.id,
                question: item.text.clone(),
                value,
                importance: importance.importance(item.id),
            });
        }
    }

    Ok(QuestionnaireScore {
        aq10_total,
        social_score,
        attention_score,
        contributing_factors,
    })
}
