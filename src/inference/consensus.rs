//! Multi-view consensus: one verdict from up to three MRI orientations.

use tracing::warn;

use crate::model::{InferenceOutcome, Label};

use super::{Classifier, InferenceError, View};

/// Image references for each orientation; any may be absent.
#[derive(Debug, Clone, Default)]
pub struct Views {
    pub axial: Option<String>,
    pub sagittal: Option<String>,
    pub coronal: Option<String>,
}

impl Views {
    fn iter(&self) -> impl Iterator<Item = (View, &str)> {
        [
            (View::Axial, self.axial.as_deref()),
            (View::Sagittal, self.sagittal.as_deref()),
            (View::Coronal, self.coronal.as_deref()),
        ]
        .into_iter()
        .filter_map(|(view, uri)| uri.map(|u| (view, u)))
    }
}

/// The per-view readings and the majority verdict.
#[derive(Debug, Clone)]
pub struct Consensus {
    pub readings: Vec<(View, InferenceOutcome)>,
    pub label: Label,
    /// Mean confidence of the readings.
    pub confidence: f64,
}

/// Classifies every present view and takes a majority vote.
///
/// Tumor wins only with a strict majority; ties go to no-tumor. Views that
/// fail to classify are logged and left out of the vote.
#[allow(clippy::cast_precision_loss)] // at most three readings
pub fn consensus(classifier: &dyn Classifier, views: &Views) -> Result<Consensus, InferenceError> {
    let mut readings = Vec::new();
    for (view, uri) in views.iter() {
        match classifier.classify(uri) {
            Ok(outcome) => readings.push((view, outcome)),
            Err(e) => warn!(%view, image = uri, error = %e, "view left out of consensus"),
        }
    }

    if readings.is_empty() {
        return Err(InferenceError::Unavailable(
            "no view could be classified".into(),
        ));
    }

    let tumor_votes = readings
        .iter()
        .filter(|(_, o)| o.prediction == Label::Tumor)
        .count();
    let label = if tumor_votes * 2 > readings.len() {
        Label::Tumor
    } else {
        Label::NoTumor
    };
    let confidence =
        readings.iter().map(|(_, o)| o.confidence).sum::<f64>() / readings.len() as f64;

    Ok(Consensus {
        readings,
        label,
        confidence,
    })
}
