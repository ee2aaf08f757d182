//! # CardioRisk
//!
//! Clinical risk inference for heart disease from a pre-trained classifier.
//!
//! A raw patient record is validated against clinical ranges, encoded into
//! the classifier's 13-feature order, scored by the model, and interpreted
//! into a risk tier with a recommendation.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Patient record, validation, feature encoding, risk report
//! - `ports`: The `BinaryClassifier` trait
//! - `adapters`: Signed logistic regression artifact, log sanitization
//! - `application`: Inference adapter and the end-to-end pipeline
//! - `config`: Environment configuration
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use application::RiskPipeline;
pub use domain::{RawPatientRecord, RiskReport, RiskTier};

/// Result type for CardioRisk operations
pub type Result<T> = std::result::Result<T, CardioRiskError>;

/// Main error type for CardioRisk
#[derive(Debug, thiserror::Error)]
pub enum CardioRiskError {
    #[error("Invalid patient record: {0}")]
    Validation(#[from] domain::ValidationError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(#[from] adapters::ModelLoadError),

    #[error("Inference failed: {0}")]
    Inference(#[from] domain::InferenceError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
