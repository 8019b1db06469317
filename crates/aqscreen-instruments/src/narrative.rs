//! Human-readable evidence summaries built over a finished result.
//!
//! Narratives run after scoring and never feed back into it. The template
//! strategy here is deterministic; an LLM-backed strategy can implement the
//! same trait and use [`PromptContext`] as its input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::classify::RiskLevel;
use crate::engine::ScreeningResult;
use crate::scoring::ItemId;

/// How many contributing factors a summary mentions.
pub const SUMMARY_FACTOR_COUNT: usize = 3;

pub const DISCLAIMER: &str = "**Disclaimer:** This is a screening support tool only and is not a \
diagnostic instrument. Please consult with a qualified healthcare professional for proper evaluation.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SummaryOptions {
    pub include_recommendations: bool,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            include_recommendations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptFactor {
    pub factor: ItemId,
    pub description: String,
    pub value: u8,
}

/// Pre-formatted figures for an external assistant prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromptContext {
    pub risk_level: RiskLevel,
    pub probability: String,
    pub aq10_total: String,
    pub social_score: String,
    pub attention_score: String,
    pub contributing_factors: Vec<PromptFactor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EvidenceSummary {
    pub summary: String,
    pub prompt_context: PromptContext,
}

pub trait NarrativeStrategy: Send + Sync {
    fn summarize(&self, result: &ScreeningResult, options: &SummaryOptions) -> EvidenceSummary;
}

/// Fixed markdown template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrative;

impl NarrativeStrategy for TemplateNarrative {
    fn summarize(&self, result: &ScreeningResult, options: &SummaryOptions) -> EvidenceSummary {
        let probability = percent(result.probability);
        let key_factors = result
            .contributing_factors
            .iter()
            .take(SUMMARY_FACTOR_COUNT);

        let mut summary = String::from("**Screening Analysis Summary**\n\n");
        summary.push_str(&format!(
            "Risk Assessment: {} ({probability} probability)\n\n",
            result.risk_level
        ));
        summary.push_str("**AQ-10 Scores:**\n");
        summary.push_str(&format!("- Total Score: {}/10\n", result.aq10_total));
        summary.push_str(&format!(
            "- Social Communication: {}/5\n",
            result.social_score
        ));
        summary.push_str(&format!(
            "- Attention to Detail: {}/5\n",
            result.attention_score
        ));

        summary.push_str("\n**Key Observations:**\n");
        for factor in key_factors.clone() {
            let presence = if factor.value == 1 { "Present" } else { "Absent" };
            summary.push_str(&format!("- {}: {presence}\n", factor.question));
        }

        if let Some(details) = &result.fusion_details {
            summary.push_str("\n**Multi-Modal Fusion:**\n");
            summary.push_str(&format!(
                "- AQ-10 contribution: {:.2} (questionnaire probability {})\n",
                details.aq10_contribution,
                percent(details.original_aq10_prob)
            ));
            if let (Some(contribution), Some(score)) =
                (details.physical_contribution, details.original_physical_score)
            {
                summary.push_str(&format!(
                    "- Physical contribution: {contribution:.2} (analyzer score {score})\n"
                ));
            }
            if let (Some(contribution), Some(score)) =
                (details.speech_contribution, details.original_speech_score)
            {
                summary.push_str(&format!(
                    "- Speech contribution: {contribution:.2} (analyzer score {score})\n"
                ));
            }
        }

        if options.include_recommendations && !result.recommendations.is_empty() {
            summary.push_str("\n**Recommendations:**\n");
            for rec in &result.recommendations {
                summary.push_str(&format!("- {rec}\n"));
            }
        }

        summary.push('\n');
        summary.push_str(DISCLAIMER);

        EvidenceSummary {
            summary,
            prompt_context: PromptContext {
                risk_level: result.risk_level,
                probability,
                aq10_total: format!("{}/10", result.aq10_total),
                social_score: format!("{}/5", result.social_score),
                attention_score: format!("{}/5", result.attention_score),
                contributing_factors: key_factors
                    .map(|f| PromptFactor {
                        factor: f.feature,
                        description: f.question.clone(),
                        value: f.value,
                    })
                    .collect(),
            },
        }
    }
}

fn percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
