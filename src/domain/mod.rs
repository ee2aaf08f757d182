//! Domain layer: Core business types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! Data flows one way: raw record -> validated record -> feature vector ->
//! classifier output -> risk report.

mod classifier;
mod features;
mod patient;
mod report;
mod validation;

pub use classifier::{ClassLabel, ClassifierOutput, InferenceError, PROBABILITY_SUM_TOLERANCE};
pub use features::{encode, feature_codes, FeatureVector, FEATURE_COUNT, FEATURE_ORDER};
pub use patient::{
    ChestPainType, Field, PatientRecord, RawPatientRecord, RawValue, RestingEcg, Selection, Sex,
    StSlope, Thalassemia,
};
pub use report::{interpret, Recommendation, RiskReport, RiskTier, MEDICAL_DISCLAIMER, RECOMMENDATIONS};
pub use validation::{
    numeric_rule, validate, FieldViolation, NumericRule, ValidatedRecord, ValidationError,
    NUMERIC_RULES,
};
