//! Inference adapter: Wraps a `BinaryClassifier` behind the domain contract.
//!
//! The classifier is an opaque capability. This adapter checks its declared
//! width against the encoder, invokes it once for the label and once for the
//! probabilities, and turns whatever comes back into a checked
//! `ClassifierOutput`.

use std::sync::Arc;

use crate::domain::{ClassLabel, ClassifierOutput, FeatureVector, InferenceError, FEATURE_COUNT};
use crate::ports::BinaryClassifier;

/// Service for invoking the pre-trained classifier.
///
/// Holds the classifier by `Arc`; it is never mutated after construction, so
/// one adapter can serve any number of threads.
pub struct InferenceAdapter<C>
where
    C: BinaryClassifier,
{
    classifier: Arc<C>,
}

impl<C> Clone for InferenceAdapter<C>
where
    C: BinaryClassifier,
{
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C> InferenceAdapter<C>
where
    C: BinaryClassifier,
{
    /// Create a new adapter around a loaded classifier.
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// The wrapped classifier.
    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Run the classifier on one encoded record.
    ///
    /// # Errors
    /// Returns `InferenceError` if the classifier's width disagrees with the
    /// encoder, if it fails, or if it returns a label other than 0/1 or
    /// probabilities that are not a distribution.
    pub fn infer(&self, features: &FeatureVector) -> Result<ClassifierOutput, InferenceError> {
        let expected = self.classifier.n_features();
        if expected != FEATURE_COUNT {
            tracing::error!(
                "Classifier expects {} features, encoder produces {}",
                expected,
                FEATURE_COUNT
            );
            return Err(InferenceError::DimensionMismatch {
                expected,
                got: FEATURE_COUNT,
            });
        }

        let x = features.as_slice();
        let result = self
            .classifier
            .predict(x)
            .and_then(ClassLabel::try_from)
            .and_then(|label| {
                let probabilities = self.classifier.predict_proba(x)?;
                ClassifierOutput::new(label, probabilities)
            });

        match &result {
            Ok(output) => tracing::debug!("Classifier returned label {:?}", output.label()),
            Err(e) => tracing::error!("Inference failed: {}", e),
        }
        result
    }
}
