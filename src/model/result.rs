//! Analysis results: one finished classification event.

use std::fmt;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A single, immutable record of a classification.
///
/// Field names on the wire are stable: existing state blobs use `imageUri`,
/// `timestamp` (integer milliseconds) and `result` for the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: String,

    /// Where the source image lives. Only the reference is kept, never bytes.
    pub image_uri: String,

    /// Display name for the image.
    pub image_name: String,

    /// When the analysis finished.
    #[serde(
        rename = "timestamp",
        with = "jiff::fmt::serde::timestamp::millisecond::required"
    )]
    pub created_at: Timestamp,

    /// What the classifier predicted.
    #[serde(rename = "result")]
    pub label: Label,

    /// Confidence in `label`, in [0, 1].
    pub confidence: f64,

    /// Version of the model that produced this result.
    pub model_version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heatmap_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ImageMetadata>,
}

/// The two classes a result can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Label {
    Tumor,
    NoTumor,
}

impl Label {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tumor => "tumor",
            Self::NoTumor => "no-tumor",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Facts about the source image, when known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_height: Option<u32>,

    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}
