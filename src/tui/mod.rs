//! TUI module: Terminal User Interface using Ratatui.
//!
//! Screens:
//! - Patient data entry form
//! - Analysis result with recommendations
//! - About (model provenance, when to see a doctor)

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::MedicalTheme;
pub use worker::{InferenceProgress, InferenceWorker, InferenceWorkerHandle};
