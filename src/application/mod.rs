//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with the classifier port to
//! implement the risk assessment use case.

mod headless;
mod inference;
mod pipeline;

pub use headless::{run_headless, HeadlessOutcome};
pub use inference::InferenceAdapter;
pub use pipeline::RiskPipeline;
