//! Pure display helpers: percentages, dates, label styling, file checks.

use jiff::{Timestamp, Zoned};

use crate::model::Label;

/// File suffixes accepted for analysis, lowercase.
pub const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Format a confidence in [0, 1] as a whole percentage, rounding half up.
///
/// `0.956` → `"96%"`, `0.944` → `"94%"`.
#[allow(clippy::cast_possible_truncation)] // rounded, and bounded by the input range
pub fn format_confidence(confidence: f64) -> String {
    let percent = (confidence * 100.0 + 0.5).floor() as i64;
    format!("{percent}%")
}

/// Fixed styling for each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelDisplay {
    pub text: &'static str,
    pub color: &'static str,
    pub background_color: &'static str,
    pub icon: &'static str,
}

impl LabelDisplay {
    pub const TUMOR: Self = Self {
        text: "Tumor Detected",
        color: "#EF4444",
        background_color: "#FEE2E2",
        icon: "⚠️",
    };

    pub const NO_TUMOR: Self = Self {
        text: "No Tumor Detected",
        color: "#22C55E",
        background_color: "#DCFCE7",
        icon: "✓",
    };

    pub fn for_label(label: Label) -> Self {
        match label {
            Label::Tumor => Self::TUMOR,
            Label::NoTumor => Self::NO_TUMOR,
        }
    }

    /// One-line explanation shown under the label.
    pub fn summary(label: Label) -> &'static str {
        match label {
            Label::Tumor => "Potential tumor detected in the MRI scan",
            Label::NoTumor => "No tumor detected in the MRI scan",
        }
    }
}

/// Format a timestamp relative to `now`, by calendar day in `now`'s time zone.
///
/// Same day: `Today at 03:04 PM`. Previous day: `Yesterday at 11:45 PM`.
/// Anything else: `Feb 3, 2026`.
pub fn format_date(timestamp: Timestamp, now: &Zoned) -> String {
    let zoned = timestamp.to_zoned(now.time_zone().clone());
    let day = zoned.date();
    let today = now.date();

    if day == today {
        return format!("Today at {}", zoned.strftime("%I:%M %p"));
    }
    if today.yesterday().is_ok_and(|yesterday| yesterday == day) {
        return format!("Yesterday at {}", zoned.strftime("%I:%M %p"));
    }
    zoned.strftime("%b %-d, %Y").to_string()
}

/// Case-insensitive suffix check against [`IMAGE_EXTENSIONS`].
pub fn is_valid_image_format(uri: &str) -> bool {
    let lower = uri.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Render a byte count as megabytes with two decimals, or `Unknown`.
///
/// The number carries no unit; callers append `MB` when it is known.
#[allow(clippy::cast_precision_loss)] // display only
pub fn format_file_size_mb(file_size: Option<u64>) -> String {
    match file_size {
        None | Some(0) => "Unknown".to_string(),
        Some(bytes) => format!("{:.2}", bytes as f64 / (1024.0 * 1024.0)),
    }
}
