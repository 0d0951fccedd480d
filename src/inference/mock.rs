//! A stand-in classifier that fabricates plausible outcomes.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::format::is_valid_image_format;
use crate::model::{InferenceOutcome, Label};

use super::{Classifier, InferenceError, ModelInfo, RESNET50_TUMOR};

/// Picks a label uniformly, draws confidence from [0.75, 0.95] and latency
/// from [1000, 3000] ms. Nothing is read from the image.
pub struct MockClassifier {
    /// Random number generator (Mutex so `classify` can take `&self`)
    rng: Mutex<StdRng>,
}

impl MockClassifier {
    pub const CONFIDENCE_RANGE: (f64, f64) = (0.75, 0.95);
    pub const LATENCY_RANGE_MS: (f64, f64) = (1000.0, 3000.0);

    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a mock with a specific seed for reproducibility.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for MockClassifier {
    fn model(&self) -> &ModelInfo {
        &RESNET50_TUMOR
    }

    fn classify(&self, image_uri: &str) -> Result<InferenceOutcome, InferenceError> {
        if !is_valid_image_format(image_uri) {
            return Err(InferenceError::UnsupportedImage(image_uri.to_string()));
        }

        let mut rng = self
            .rng
            .lock()
            .map_err(|_| InferenceError::Unavailable("mock classifier state poisoned".into()))?;

        let is_tumor = rng.gen_bool(0.5);
        let (lo, hi) = Self::CONFIDENCE_RANGE;
        let confidence = rng.gen_range(lo..=hi);
        let (lo, hi) = Self::LATENCY_RANGE_MS;
        let processing_time_ms = rng.gen_range(lo..=hi);

        let (prediction, tumor_probability) = if is_tumor {
            (Label::Tumor, confidence)
        } else {
            (Label::NoTumor, 1.0 - confidence)
        };

        debug!(image = image_uri, %prediction, confidence, "mock classification");

        Ok(InferenceOutcome {
            tumor_probability,
            no_tumor_probability: 1.0 - tumor_probability,
            prediction,
            confidence,
            processing_time_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcomes_stay_in_range() {
        let classifier = MockClassifier::with_seed(42);

        for _ in 0..200 {
            let outcome = classifier.classify("test.jpg").unwrap();

            assert!((0.75..=0.95).contains(&outcome.confidence));
            assert!((0.0..=1.0).contains(&outcome.tumor_probability));
            assert!((0.0..=1.0).contains(&outcome.no_tumor_probability));
            assert!((1000.0..=3000.0).contains(&outcome.processing_time_ms));
        }
    }

    #[test]
    fn probabilities_are_complementary_and_match_prediction() {
        let classifier = MockClassifier::with_seed(7);

        for _ in 0..100 {
            let outcome = classifier.classify("test.png").unwrap();
            let sum = outcome.tumor_probability + outcome.no_tumor_probability;
            assert!((sum - 1.0).abs() < 1e-12);

            let predicted = match outcome.prediction {
                Label::Tumor => outcome.tumor_probability,
                Label::NoTumor => outcome.no_tumor_probability,
            };
            assert!((predicted - outcome.confidence).abs() < 1e-12);
        }
    }

    #[test]
    fn produces_both_labels() {
        let classifier = MockClassifier::with_seed(3);
        let labels: Vec<Label> = (0..100)
            .map(|_| classifier.classify("x.webp").unwrap().prediction)
            .collect();

        assert!(labels.contains(&Label::Tumor));
        assert!(labels.contains(&Label::NoTumor));
    }

    #[test]
    fn same_seed_same_outcomes() {
        let a = MockClassifier::with_seed(99);
        let b = MockClassifier::with_seed(99);

        for _ in 0..10 {
            assert_eq!(a.classify("s.jpg").unwrap(), b.classify("s.jpg").unwrap());
        }
    }

    #[test]
    fn rejects_unsupported_format() {
        let err = MockClassifier::with_seed(1)
            .classify("scan.bmp")
            .unwrap_err();
        assert!(matches!(err, InferenceError::UnsupportedImage(_)));
    }

    #[test]
    fn reports_model_version() {
        assert_eq!(MockClassifier::new().model().version, "1.0.0");
    }
}
