//! Ports layer: Trait definitions for external capabilities.
//!
//! Following Hexagonal Architecture, these traits define the boundary
//! between the inference pipeline and the concrete model artifact.

mod classifier;

pub use crate::domain::InferenceError;
pub use classifier::BinaryClassifier;
