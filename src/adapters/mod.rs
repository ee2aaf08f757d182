//! Adapters layer: Concrete implementations of ports.
//!
//! - `logistic`: signed logistic regression artifact behind `BinaryClassifier`
//! - `sanitize`: redaction of clinical values in logs

pub mod logistic;
pub mod sanitize;

pub use logistic::ModelLoadError;
