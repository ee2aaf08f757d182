//! Risk pipeline: validate -> encode -> infer -> interpret.
//!
//! Each stage's output is the next stage's input and the first failure ends
//! the run. The pipeline holds no per-request state, so one instance behind an
//! `Arc` serves concurrent requests and identical input always yields an
//! identical report.

use crate::application::InferenceAdapter;
use crate::domain::{encode, interpret, validate, RawPatientRecord, RiskReport, ValidatedRecord};
use crate::ports::BinaryClassifier;
use crate::CardioRiskError;

/// End-to-end clinical risk assessment.
pub struct RiskPipeline<C>
where
    C: BinaryClassifier,
{
    inference: InferenceAdapter<C>,
}

impl<C> RiskPipeline<C>
where
    C: BinaryClassifier,
{
    pub fn new(inference: InferenceAdapter<C>) -> Self {
        Self { inference }
    }

    #[must_use]
    pub fn inference(&self) -> &InferenceAdapter<C> {
        &self.inference
    }

    /// Assess one raw patient record.
    ///
    /// # Errors
    /// Returns `CardioRiskError::Validation` with every offending field if the
    /// record is invalid (the classifier is not invoked), or
    /// `CardioRiskError::Inference` if the classifier fails.
    pub fn run_inference(&self, raw: &RawPatientRecord) -> Result<RiskReport, CardioRiskError> {
        let validated = validate(raw).map_err(|e| {
            tracing::info!("Rejected record with {} invalid field(s)", e.violations().len());
            e
        })?;
        self.assess(&validated)
    }

    /// Assess a record that already passed validation.
    ///
    /// # Errors
    /// Returns `CardioRiskError::Inference` if the classifier fails.
    pub fn assess(&self, validated: &ValidatedRecord) -> Result<RiskReport, CardioRiskError> {
        let features = encode(validated);
        let output = self.inference.infer(&features)?;
        let report = interpret(&output);

        tracing::info!(
            "Assessment complete: tier={}, confidence={:.1}%",
            report.risk_tier,
            report.confidence_percent
        );
        Ok(report)
    }
}
