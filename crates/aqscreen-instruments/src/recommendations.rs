use crate::classify::RiskLevel;

const HIGH: &[&str] = &[
    "Consider scheduling a comprehensive evaluation with a developmental specialist or psychologist",
    "Discuss findings with primary healthcare provider for referral guidance",
    "Document specific behavioral observations to share with evaluating clinician",
    "Review available early intervention programs in your area",
];

const MEDIUM: &[&str] = &[
    "Monitor for additional behavioral indicators over the coming months",
    "Discuss observations with primary healthcare provider",
    "Consider re-screening in 3-6 months if concerns persist",
    "Explore developmental resources and support groups",
];

const LOW: &[&str] = &[
    "Continue routine developmental monitoring",
    "Re-screen if new concerns arise",
    "Maintain open communication with healthcare providers about development",
];

/// Static guidance for a risk category, in display order.
pub fn recommendation_table(level: RiskLevel) -> &'static [&'static str] {
    match level {
        RiskLevel::High => HIGH,
        RiskLevel::Medium => MEDIUM,
        RiskLevel::Low => LOW,
    }
}

pub fn recommendations_for(level: RiskLevel) -> Vec<String> {
    recommendation_table(level)
        .iter()
        .map(|r| r.to_string())
        .collect()
}
