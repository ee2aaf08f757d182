//! Classifier port: Trait for a pre-trained binary classifier.
//!
//! This trait abstracts the concrete model artifact from the inference
//! pipeline, so a test stub can stand in for the real model.

use crate::domain::InferenceError;

/// A pre-trained binary classifier.
///
/// Implementations are read-only once loaded and must be safe to share across
/// threads without locking.
pub trait BinaryClassifier: Send + Sync {
    /// Number of features the classifier was trained on.
    fn n_features(&self) -> usize;

    /// Predict the class label (0 = no disease, 1 = disease present).
    ///
    /// # Errors
    /// Returns `InferenceError` if the classifier cannot evaluate `features`.
    fn predict(&self, features: &[f64]) -> Result<u8, InferenceError>;

    /// Predict class probabilities `[P(0), P(1)]`.
    ///
    /// # Errors
    /// Returns `InferenceError` if the classifier cannot evaluate `features`.
    fn predict_proba(&self, features: &[f64]) -> Result<[f64; 2], InferenceError>;
}
