//! Turning a classifier outcome into a history record.

use jiff::Timestamp;
use uuid::Uuid;

use crate::inference::InferenceError;
use crate::model::{AnalysisResult, InferenceOutcome};

/// A fresh result id: `analysis_<millis>_<9 lowercase alphanumerics>`.
pub fn generate_id() -> String {
    let millis = Timestamp::now().as_millisecond();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("analysis_{millis}_{}", &suffix[..9])
}

/// Builds a result stamped with a new id and the current time.
///
/// The time is truncated to milliseconds so the record round-trips through
/// storage unchanged.
pub fn create_result(
    image_uri: &str,
    image_name: &str,
    outcome: &InferenceOutcome,
    model_version: &str,
) -> Result<AnalysisResult, InferenceError> {
    let now = Timestamp::now();
    let created_at = Timestamp::from_millisecond(now.as_millisecond()).unwrap_or(now);
    build_result(
        image_uri,
        image_name,
        outcome,
        model_version,
        generate_id(),
        created_at,
    )
}

/// Builds a result with an injected id and time.
///
/// Rejects outcomes whose confidence lies outside [0, 1] (including NaN);
/// everything else is copied verbatim.
pub fn build_result(
    image_uri: &str,
    image_name: &str,
    outcome: &InferenceOutcome,
    model_version: &str,
    id: String,
    created_at: Timestamp,
) -> Result<AnalysisResult, InferenceError> {
    if !(0.0..=1.0).contains(&outcome.confidence) {
        return Err(InferenceError::InvalidConfidence(outcome.confidence));
    }

    Ok(AnalysisResult {
        id,
        image_uri: image_uri.to_string(),
        image_name: image_name.to_string(),
        created_at,
        label: outcome.prediction,
        confidence: outcome.confidence,
        model_version: model_version.to_string(),
        heatmap_uri: None,
        metadata: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use crate::inference::{Classifier, MockClassifier};
    use crate::model::Label;

    fn outcome(prediction: Label, confidence: f64) -> InferenceOutcome {
        InferenceOutcome {
            tumor_probability: confidence,
            no_tumor_probability: 1.0 - confidence,
            prediction,
            confidence,
            processing_time_ms: 1500.0,
        }
    }

    #[test]
    fn ids_are_unique_and_prefixed() {
        let ids: HashSet<String> = (0..500).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 500);

        for id in &ids {
            let parts: Vec<&str> = id.split('_').collect();
            assert_eq!(parts.len(), 3, "{id}");
            assert_eq!(parts[0], "analysis");
            assert!(parts[1].parse::<i64>().is_ok());
            assert_eq!(parts[2].len(), 9);
            assert!(
                parts[2]
                    .chars()
                    .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase())
            );
        }
    }

    #[test]
    fn build_copies_outcome_verbatim() {
        let created_at = Timestamp::from_millisecond(1_770_000_000_000).unwrap();
        let result = build_result(
            "file://test.jpg",
            "test.jpg",
            &outcome(Label::Tumor, 0.87),
            "1.0.0",
            "analysis_fixed".into(),
            created_at,
        )
        .unwrap();

        assert_eq!(result.id, "analysis_fixed");
        assert_eq!(result.image_uri, "file://test.jpg");
        assert_eq!(result.image_name, "test.jpg");
        assert_eq!(result.created_at, created_at);
        assert_eq!(result.label, Label::Tumor);
        assert!((result.confidence - 0.87).abs() < f64::EPSILON);
        assert_eq!(result.model_version, "1.0.0");
        assert!(result.heatmap_uri.is_none());
        assert!(result.metadata.is_none());
    }

    #[test]
    fn accepts_full_unit_range() {
        for confidence in [0.0, 0.5, 1.0] {
            let result = build_result(
                "a.png",
                "a.png",
                &outcome(Label::NoTumor, confidence),
                "1.0.0",
                "id".into(),
                Timestamp::UNIX_EPOCH,
            );
            assert!(result.is_ok(), "{confidence}");
        }
    }

    #[test]
    fn rejects_out_of_range_confidence() {
        for confidence in [-0.01, 1.01, f64::NAN] {
            let err = build_result(
                "a.png",
                "a.png",
                &outcome(Label::Tumor, confidence),
                "1.0.0",
                "id".into(),
                Timestamp::UNIX_EPOCH,
            )
            .unwrap_err();
            assert!(matches!(err, InferenceError::InvalidConfidence(_)));
        }
    }

    #[test]
    fn create_from_mock_outcome() {
        let classifier = MockClassifier::with_seed(5);
        let inference = classifier.classify("test.jpg").unwrap();

        let result = create_result(
            "file://test.jpg",
            "test.jpg",
            &inference,
            classifier.model().version,
        )
        .unwrap();

        assert!(result.id.starts_with("analysis_"));
        assert_eq!(result.image_uri, "file://test.jpg");
        assert_eq!(result.model_version, "1.0.0");
        assert_eq!(result.label, inference.prediction);
        assert!((result.confidence - inference.confidence).abs() < f64::EPSILON);
        assert!((0.0..=1.0).contains(&result.confidence));
        assert_eq!(result.created_at.subsec_nanosecond() % 1_000_000, 0);
    }
}
