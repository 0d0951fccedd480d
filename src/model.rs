//! Core data model for brainscan.
//!
//! These types are the persisted shape of the application: analysis results,
//! the app state that holds them, and the raw classifier outcome a result is
//! built from.

mod outcome;
mod result;
mod state;

pub use outcome::InferenceOutcome;
pub use result::{AnalysisResult, ImageMetadata, Label};
pub use state::{AppState, HistoryStats};
