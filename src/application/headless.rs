//! Non-interactive mode: one JSON record in, one JSON document out.

use std::io::{Read, Write};

use crate::application::RiskPipeline;
use crate::domain::RawPatientRecord;
use crate::ports::BinaryClassifier;
use crate::CardioRiskError;

/// How a headless run ended when it did not fail outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessOutcome {
    /// Report written to the output stream.
    Assessed,
    /// Violation list written to the error stream.
    Rejected,
}

impl HeadlessOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Assessed => 0,
            Self::Rejected => 2,
        }
    }
}

/// Read one patient record from `input` and assess it.
///
/// The report goes to `out` as pretty JSON. An invalid record writes its
/// violations to `err` and yields [`HeadlessOutcome::Rejected`].
///
/// # Errors
/// Returns `CardioRiskError::Serialization` if the input is not a JSON
/// object, `CardioRiskError::Inference` if the classifier fails, or
/// `CardioRiskError::Io` on stream failures.
pub fn run_headless<C, R, W, E>(
    pipeline: &RiskPipeline<C>,
    mut input: R,
    mut out: W,
    mut err: E,
) -> Result<HeadlessOutcome, CardioRiskError>
where
    C: BinaryClassifier,
    R: Read,
    W: Write,
    E: Write,
{
    let mut body = String::new();
    input.read_to_string(&mut body)?;
    let raw: RawPatientRecord = serde_json::from_str(&body)?;

    match pipeline.run_inference(&raw) {
        Ok(report) => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
            Ok(HeadlessOutcome::Assessed)
        }
        Err(CardioRiskError::Validation(errors)) => {
            serde_json::to_writer_pretty(&mut err, errors.violations())?;
            writeln!(err)?;
            Ok(HeadlessOutcome::Rejected)
        }
        Err(e) => Err(e),
    }
}
