//! Output formatting for CLI display.

use std::{
    env,
    io::{self, IsTerminal},
};

use jiff::Zoned;

use crate::format::{LabelDisplay, format_confidence, format_date, format_file_size_mb};
use crate::inference::ModelInfo;
use crate::model::{AnalysisResult, AppState, HistoryStats};

pub(super) const RESULT_DISCLAIMER: &str = "⚠️ Important Disclaimer\n\
    This analysis is for informational purposes only and should not be used for \
    medical diagnosis. Always consult with qualified healthcare professionals for \
    proper diagnosis and treatment.";

pub(super) const APP_DISCLAIMER: &str = "⚠️ Medical Disclaimer\n\
    This app is for educational and informational purposes only. It should not be \
    used as a substitute for professional medical advice, diagnosis, or treatment. \
    Always consult with qualified healthcare professionals.";

/// How label badges are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Palette {
    Plain,
    Light,
    Dark,
}

impl Palette {
    /// Plain unless stdout is a terminal and `NO_COLOR` is unset.
    pub(super) fn detect(dark_mode: bool) -> Self {
        if !io::stdout().is_terminal() || env::var_os("NO_COLOR").is_some() {
            Self::Plain
        } else if dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Icon and text, in the label's color. Light mode adds its background.
    fn badge(self, display: &LabelDisplay) -> String {
        let text = format!("{} {}", display.icon, display.text);
        match self {
            Self::Plain => text,
            Self::Dark => format!("\x1b[1;38;2;{}m{text}\x1b[0m", rgb(display.color)),
            Self::Light => format!(
                "\x1b[1;38;2;{};48;2;{}m{text}\x1b[0m",
                rgb(display.color),
                rgb(display.background_color)
            ),
        }
    }
}

/// `#RRGGBB` as an SGR truecolor triple, `R;G;B`.
fn rgb(hex: &str) -> String {
    let channel = |i: usize| {
        hex.get(i..i + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .unwrap_or(0)
    };
    format!("{};{};{}", channel(1), channel(3), channel(5))
}

/// The full results screen for one analysis.
pub(super) fn result_card(result: &AnalysisResult, now: &Zoned, palette: Palette) -> String {
    let display = LabelDisplay::for_label(result.label);
    let file_size = match result.metadata.as_ref().and_then(|m| m.file_size) {
        size @ Some(bytes) if bytes > 0 => format!("{} MB", format_file_size_mb(size)),
        size => format_file_size_mb(size),
    };

    [
        format!("Analysis Results  ({})", format_date(result.created_at, now)),
        String::new(),
        format!("  {}", palette.badge(&display)),
        format!("  {}", LabelDisplay::summary(result.label)),
        String::new(),
        format!(
            "  Confidence     {}  {}",
            format_confidence(result.confidence),
            confidence_bar(result.confidence, 20)
        ),
        format!("  File Name      {}", result.image_name),
        format!("  File Size      {file_size}"),
        format!("  Image          {}", result.image_uri),
        format!("  Model Version  {}", result.model_version),
        format!("  Analysis ID    {}", result.id),
        String::new(),
        RESULT_DISCLAIMER.to_string(),
    ]
    .join("\n")
}

/// One history row: icon, label, confidence, name, then date and id.
pub(super) fn history_line(result: &AnalysisResult, now: &Zoned, palette: Palette) -> String {
    let display = LabelDisplay::for_label(result.label);
    let pad = " ".repeat(18_usize.saturating_sub(display.text.chars().count()));
    format!(
        "{}{pad} {:>4}  {}\n   {}  {}",
        palette.badge(&display),
        format_confidence(result.confidence),
        result.image_name,
        format_date(result.created_at, now),
        result.id,
    )
}

pub(super) fn count_analyses(n: usize) -> String {
    if n == 1 {
        "1 analysis".to_string()
    } else {
        format!("{n} analyses")
    }
}

pub(super) fn stats_line(stats: HistoryStats) -> String {
    format!(
        "Statistics: {} tumors detected · {} no tumor · {} total",
        stats.tumor, stats.no_tumor, stats.total
    )
}

/// Summary printed after a command changed the state.
pub(super) fn history_footer(state: &AppState) -> String {
    let stats = state.stats();
    format!(
        "History: {} ({} tumor, {} no tumor)",
        count_analyses(stats.total),
        stats.tumor,
        stats.no_tumor
    )
}

pub(super) fn model_info(model: &ModelInfo) -> String {
    let [h, w, c] = model.input_shape;
    let views: Vec<String> = model.supported_views.iter().map(ToString::to_string).collect();
    let classes: Vec<&str> = model.output_classes.iter().map(|l| l.as_str()).collect();

    [
        "Model Information".to_string(),
        format!("  Model          {}", model.name),
        format!("  Version        {}", model.version),
        format!("  Accuracy       {}", model.accuracy_percent()),
        format!("  Type           {}", model.model_type),
        format!("  Input          {h}x{w}x{c}"),
        format!("  Classes        {}", classes.join(", ")),
        format!("  Views          {}", views.join(", ")),
        format!("  Formats        {}", model.supported_formats.join(", ")),
        format!(
            "  Augmentation   {}",
            if model.augmentation_support { "yes" } else { "no" }
        ),
        format!("  Last Updated   {}", model.last_updated),
    ]
    .join("\n")
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)] // clamped to [0, width]
fn confidence_bar(confidence: f64, width: usize) -> String {
    let filled = (confidence.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
