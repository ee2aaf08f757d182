//! Background inference worker.
//!
//! Runs the risk pipeline off the UI thread so the main loop keeps drawing
//! while the classifier is evaluated. The pipeline is shared by `Arc`; it is
//! immutable after loading, so no lock is taken.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::RiskPipeline;
use crate::domain::{RawPatientRecord, RiskReport};
use crate::ports::BinaryClassifier;

/// Progress updates from the inference worker.
#[derive(Debug, Clone)]
pub enum InferenceProgress {
    /// Pipeline started
    Running,
    /// Pipeline finished with a report
    Complete(RiskReport),
    /// Pipeline failed
    Error(String),
}

/// Handle to a running inference worker.
pub struct InferenceWorkerHandle {
    /// Receiver for progress updates
    pub progress_rx: Receiver<InferenceProgress>,
    _handle: JoinHandle<()>,
}

impl InferenceWorkerHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<InferenceProgress> {
        self.progress_rx.try_recv().ok()
    }
}

pub struct InferenceWorker;

impl InferenceWorker {
    /// Spawn a background assessment of `raw`.
    pub fn spawn<C>(pipeline: Arc<RiskPipeline<C>>, raw: RawPatientRecord) -> InferenceWorkerHandle
    where
        C: BinaryClassifier + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run(&pipeline, &raw, &tx);
        });

        InferenceWorkerHandle {
            progress_rx: rx,
            _handle: handle,
        }
    }

    fn run<C>(pipeline: &RiskPipeline<C>, raw: &RawPatientRecord, tx: &Sender<InferenceProgress>)
    where
        C: BinaryClassifier,
    {
        // Send failures mean the UI dropped the handle; nothing left to report to.
        let _ = tx.send(InferenceProgress::Running);

        let message = match pipeline.run_inference(raw) {
            Ok(report) => InferenceProgress::Complete(report),
            Err(e) => InferenceProgress::Error(e.to_string()),
        };
        let _ = tx.send(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::InferenceAdapter;
    use crate::domain::{InferenceError, PatientRecord, RawValue, RiskTier, FEATURE_COUNT};
    use std::time::Duration;

    struct Fixed;

    impl BinaryClassifier for Fixed {
        fn n_features(&self) -> usize {
            FEATURE_COUNT
        }

        fn predict(&self, _features: &[f64]) -> Result<u8, InferenceError> {
            Ok(1)
        }

        fn predict_proba(&self, _features: &[f64]) -> Result<[f64; 2], InferenceError> {
            Ok([0.12, 0.88])
        }
    }

    fn pipeline() -> Arc<RiskPipeline<Fixed>> {
        Arc::new(RiskPipeline::new(InferenceAdapter::new(Arc::new(Fixed))))
    }

    fn final_message(handle: &InferenceWorkerHandle) -> InferenceProgress {
        let first = handle
            .progress_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("running");
        assert!(matches!(first, InferenceProgress::Running));
        handle
            .progress_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("result")
    }

    #[test]
    fn test_worker_reports_completion() {
        let raw = RawPatientRecord::from(&PatientRecord::sample());
        let handle = InferenceWorker::spawn(pipeline(), raw);

        match final_message(&handle) {
            InferenceProgress::Complete(report) => assert_eq!(report.risk_tier, RiskTier::High),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_worker_reports_errors() {
        let mut raw = RawPatientRecord::from(&PatientRecord::sample());
        raw.cholesterol = RawValue::Number(900.0);
        let handle = InferenceWorker::spawn(pipeline(), raw);

        match final_message(&handle) {
            InferenceProgress::Error(message) => assert!(message.contains("cholesterol")),
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
