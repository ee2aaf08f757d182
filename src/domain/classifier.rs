//! Classifier output contract shared by the inference port and its adapters.

use serde::Serialize;

/// Failure while invoking the classifier on a well-formed feature vector.
///
/// These indicate a contract violation between encoder and classifier, not a
/// user error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InferenceError {
    #[error("Feature dimension mismatch: classifier expects {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Classifier returned label {0}, expected 0 or 1")]
    InvalidLabel(u8),

    #[error("Classifier returned invalid probabilities [{p0}, {p1}]")]
    InvalidProbabilities { p0: f64, p1: f64 },

    #[error("Classifier evaluation failed: {0}")]
    Evaluation(String),
}

/// Tolerance for `P(0) + P(1) == 1`.
pub const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Binary class predicted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum ClassLabel {
    /// No heart disease
    Absent = 0,
    /// Heart disease present
    Present = 1,
}

impl TryFrom<u8> for ClassLabel {
    type Error = InferenceError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Self::Absent),
            1 => Ok(Self::Present),
            other => Err(InferenceError::InvalidLabel(other)),
        }
    }
}

/// Raw classifier result: predicted label plus `[P(0), P(1)]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifierOutput {
    label: ClassLabel,
    probabilities: [f64; 2],
}

impl ClassifierOutput {
    /// Build an output, checking the probability pair is a distribution.
    ///
    /// # Errors
    /// Returns `InferenceError::InvalidProbabilities` if either entry is
    /// non-finite, outside `[0, 1]`, or the pair does not sum to 1.
    pub fn new(label: ClassLabel, probabilities: [f64; 2]) -> Result<Self, InferenceError> {
        let [p0, p1] = probabilities;
        let in_unit = |p: f64| p.is_finite() && (0.0..=1.0).contains(&p);
        if !in_unit(p0) || !in_unit(p1) || ((p0 + p1) - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
            return Err(InferenceError::InvalidProbabilities { p0, p1 });
        }
        Ok(Self {
            label,
            probabilities,
        })
    }

    #[must_use]
    pub fn label(&self) -> ClassLabel {
        self.label
    }

    #[must_use]
    pub fn probabilities(&self) -> [f64; 2] {
        self.probabilities
    }

    /// Probability of heart disease, `P(class = 1)`.
    #[must_use]
    pub fn disease_probability(&self) -> f64 {
        self.probabilities[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_rejects_bad_distributions() {
        assert!(ClassifierOutput::new(ClassLabel::Present, [0.3, 0.3]).is_err());
        assert!(ClassifierOutput::new(ClassLabel::Present, [-0.1, 1.1]).is_err());
        assert!(ClassifierOutput::new(ClassLabel::Present, [f64::NAN, 0.5]).is_err());
        assert!(ClassifierOutput::new(ClassLabel::Absent, [1.0, 0.0]).is_ok());
    }

    #[test]
    fn test_label_from_u8() {
        assert_eq!(ClassLabel::try_from(0).ok(), Some(ClassLabel::Absent));
        assert_eq!(ClassLabel::try_from(1).ok(), Some(ClassLabel::Present));
        assert!(matches!(
            ClassLabel::try_from(2),
            Err(InferenceError::InvalidLabel(2))
        ));
    }
}
