//! Classifier output and its interpretation into a risk report.

use serde::Serialize;

use super::classifier::{ClassLabel, ClassifierOutput};

/// Risk classification for heart disease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum RiskTier {
    Low = 0,
    High = 1,
}

impl RiskTier {
    pub const ALL: [RiskTier; 2] = [RiskTier::Low, RiskTier::High];

    /// Recommendation content for this tier.
    #[must_use]
    pub fn recommendation(self) -> &'static Recommendation {
        &RECOMMENDATIONS[self as usize]
    }

    /// Get the associated color for TUI display (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (16, 185, 129),  // Emerald (#10B981)
            Self::High => (244, 63, 94), // Rose (#F43F5E)
        }
    }
}

impl From<ClassLabel> for RiskTier {
    fn from(label: ClassLabel) -> Self {
        match label {
            ClassLabel::Absent => Self::Low,
            ClassLabel::Present => Self::High,
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::High => write!(f, "High"),
        }
    }
}

/// Guidance shown alongside a risk tier.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub tier: RiskTier,
    /// One-line verdict.
    pub headline: &'static str,
    pub summary: &'static str,
    /// Heading for the action list.
    pub heading: &'static str,
    pub actions: &'static [&'static str],
}

/// Recommendation table, indexed by `RiskTier as usize`.
pub static RECOMMENDATIONS: [Recommendation; 2] = [
    Recommendation {
        tier: RiskTier::Low,
        headline: "Low Risk",
        summary: "The model indicates a low likelihood of heart disease based on the provided parameters.",
        heading: "Preventive Measures",
        actions: &[
            "Maintain a heart-healthy diet",
            "Regular exercise (150 min/week)",
            "Annual health checkups",
            "Avoid smoking and excessive alcohol",
        ],
    },
    Recommendation {
        tier: RiskTier::High,
        headline: "High Risk",
        summary: "The model indicates a high likelihood of heart disease. Please consult a healthcare professional.",
        heading: "Immediate Actions",
        actions: &[
            "Schedule an appointment with a cardiologist",
            "Get comprehensive cardiac tests",
            "Review current medications with your doctor",
            "Discuss lifestyle modifications",
        ],
    },
];

/// Static disclaimer rendered with every report.
pub const MEDICAL_DISCLAIMER: &str = "This prediction is based on statistical models and should not \
replace professional medical advice, diagnosis, or treatment.";

/// Interpreted, display-ready prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskReport {
    pub risk_tier: RiskTier,
    /// `P(1) * 100`, one decimal place.
    pub risk_probability_percent: f64,
    /// `max(P(0), P(1)) * 100`, one decimal place.
    pub confidence_percent: f64,
    pub recommendation: &'static Recommendation,
}

fn round_one_decimal(percent: f64) -> f64 {
    (percent * 10.0).round() / 10.0
}

/// Turn a classifier output into a risk report.
///
/// The tier always follows the classifier's label, never the probabilities,
/// so a 0.5/0.5 tie is settled by whatever the classifier predicted.
#[must_use]
pub fn interpret(output: &ClassifierOutput) -> RiskReport {
    let [p0, p1] = output.probabilities();
    let risk_tier = RiskTier::from(output.label());

    RiskReport {
        risk_tier,
        risk_probability_percent: round_one_decimal(p1 * 100.0),
        confidence_percent: round_one_decimal(p0.max(p1) * 100.0),
        recommendation: risk_tier.recommendation(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(label: ClassLabel, p: [f64; 2]) -> ClassifierOutput {
        ClassifierOutput::new(label, p).expect("Valid output")
    }

    #[test]
    fn test_high_risk_report() {
        let report = interpret(&output(ClassLabel::Present, [0.12, 0.88]));
        assert_eq!(report.risk_tier, RiskTier::High);
        assert_eq!(report.risk_probability_percent, 88.0);
        assert_eq!(report.confidence_percent, 88.0);
        assert_eq!(report.recommendation.heading, "Immediate Actions");
    }

    #[test]
    fn test_low_risk_report() {
        let report = interpret(&output(ClassLabel::Absent, [0.73, 0.27]));
        assert_eq!(report.risk_tier, RiskTier::Low);
        assert_eq!(report.risk_probability_percent, 27.0);
        assert_eq!(report.confidence_percent, 73.0);
        assert_eq!(report.recommendation.heading, "Preventive Measures");
    }

    #[test]
    fn test_tie_follows_classifier_label() {
        let low = interpret(&output(ClassLabel::Absent, [0.5, 0.5]));
        let high = interpret(&output(ClassLabel::Present, [0.5, 0.5]));
        assert_eq!(low.risk_tier, RiskTier::Low);
        assert_eq!(high.risk_tier, RiskTier::High);
        assert_eq!(low.risk_probability_percent, 50.0);
        assert_eq!(high.confidence_percent, 50.0);
    }

    #[test]
    fn test_risk_probability_is_always_class_one() {
        for p1 in [0.0, 0.05, 0.27, 0.49, 0.51, 0.88, 1.0] {
            let label = if p1 > 0.5 { ClassLabel::Present } else { ClassLabel::Absent };
            let report = interpret(&output(label, [1.0 - p1, p1]));
            let expected = match report.risk_tier {
                RiskTier::High => report.confidence_percent,
                RiskTier::Low => 100.0 - report.confidence_percent,
            };
            assert!(
                (report.risk_probability_percent - expected).abs() < 1e-9,
                "p1={p1}: {} vs {expected}",
                report.risk_probability_percent
            );
        }
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        let report = interpret(&output(ClassLabel::Present, [0.1234, 0.8766]));
        assert_eq!(report.risk_probability_percent, 87.7);
        assert_eq!(report.confidence_percent, 87.7);
    }

    #[test]
    fn test_recommendation_table_is_total() {
        for tier in RiskTier::ALL {
            let rec = tier.recommendation();
            assert_eq!(rec.tier, tier);
            assert!(!rec.headline.is_empty());
            assert!(!rec.summary.is_empty());
            assert!(!rec.actions.is_empty());
            assert!(rec.actions.iter().all(|a| !a.is_empty()));
        }
    }
}
