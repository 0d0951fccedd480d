//! The classification boundary.
//!
//! Everything that turns an image reference into an [`InferenceOutcome`]
//! sits behind [`Classifier`]. Only [`MockClassifier`] exists today; a real
//! model plugs in behind the same trait without touching the store.

mod consensus;
mod mock;

use std::fmt;

use tracing::warn;

use crate::model::{InferenceOutcome, Label};

pub use consensus::{Views, consensus};
pub use mock::MockClassifier;

/// A typed classification failure. Callers surface these and offer a retry.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference unavailable: {0}")]
    Unavailable(String),

    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    #[error("classifier returned confidence {0} outside [0, 1]")]
    InvalidConfidence(f64),
}

/// Anything that can classify an image.
pub trait Classifier {
    /// The model behind this classifier.
    fn model(&self) -> &ModelInfo;

    fn classify(&self, image_uri: &str) -> Result<InferenceOutcome, InferenceError>;
}

/// MRI slice orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Axial,
    Sagittal,
    Coronal,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Axial => "axial",
            Self::Sagittal => "sagittal",
            Self::Coronal => "coronal",
        })
    }
}

/// Static description of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// Accuracy on the held-out test set, in [0, 1].
    pub accuracy: f64,
    pub model_type: &'static str,
    /// Height, width, channels.
    pub input_shape: [u32; 3],
    pub output_classes: [Label; 2],
    pub supported_views: [View; 3],
    pub supported_formats: [&'static str; 4],
    pub augmentation_support: bool,
    pub last_updated: &'static str,
}

impl ModelInfo {
    /// Accuracy with one decimal, e.g. `94.2%`.
    pub fn accuracy_percent(&self) -> String {
        format!("{:.1}%", self.accuracy * 100.0)
    }
}

/// The binary tumor classifier the mock stands in for.
pub const RESNET50_TUMOR: ModelInfo = ModelInfo {
    name: "ResNet50-Tumor",
    version: "1.0.0",
    accuracy: 0.942,
    model_type: "binary-classification",
    input_shape: [256, 256, 3],
    output_classes: [Label::NoTumor, Label::Tumor],
    supported_views: [View::Axial, View::Sagittal, View::Coronal],
    supported_formats: ["JPEG", "PNG", "GIF", "WebP"],
    augmentation_support: true,
    last_updated: "Feb 2026",
};

/// Classifies each image in order, pairing outcomes with their image.
/// Images that fail are logged and skipped.
pub fn classify_batch<'a>(
    classifier: &dyn Classifier,
    image_uris: &'a [String],
) -> Vec<(&'a str, InferenceOutcome)> {
    image_uris
        .iter()
        .filter_map(|uri| match classifier.classify(uri) {
            Ok(outcome) => Some((uri.as_str(), outcome)),
            Err(e) => {
                warn!(image = %uri, error = %e, "skipping image in batch");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_renders_one_decimal() {
        assert_eq!(RESNET50_TUMOR.accuracy_percent(), "94.2%");
    }

    #[test]
    fn batch_skips_failures_and_keeps_order() {
        let classifier = MockClassifier::with_seed(11);
        let uris: Vec<String> = ["a.jpg", "notes.txt", "b.png", "c.gif"]
            .into_iter()
            .map(String::from)
            .collect();

        let outcomes = classify_batch(&classifier, &uris);

        let classified: Vec<&str> = outcomes.iter().map(|(uri, _)| *uri).collect();
        assert_eq!(classified, ["a.jpg", "b.png", "c.gif"]);
        for (_, outcome) in &outcomes {
            assert!((0.75..=0.95).contains(&outcome.confidence));
        }
    }

    #[test]
    fn batch_of_nothing_is_empty() {
        let classifier = MockClassifier::with_seed(1);
        assert!(classify_batch(&classifier, &[]).is_empty());
    }
}
