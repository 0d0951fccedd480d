//! Raw classifier output.

use super::Label;

/// What a classifier returns for one image, before it becomes a record.
///
/// Never persisted. The mock keeps the two probabilities complementary and
/// `confidence` equal to the larger of them; nothing downstream relies on
/// that.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceOutcome {
    pub tumor_probability: f64,
    pub no_tumor_probability: f64,
    pub prediction: Label,
    pub confidence: f64,
    /// Informational only.
    pub processing_time_ms: f64,
}
