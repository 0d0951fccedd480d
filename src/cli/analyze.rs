//! Analysis commands: analyze, consensus.

use std::fs;

use jiff::Zoned;
use tracing::info;

use crate::analysis::create_result;
use crate::format::{IMAGE_EXTENSIONS, format_confidence, is_valid_image_format};
use crate::inference::{Classifier, Views, classify_batch, consensus};
use crate::model::{AnalysisResult, ImageMetadata};
use crate::store::Store;

use super::format::{Palette, RESULT_DISCLAIMER, result_card};

pub(super) fn cmd_analyze(
    store: &mut Store,
    classifier: &dyn Classifier,
    images: &[String],
    name: Option<&str>,
) -> Result<(), String> {
    let added = analyze(store, classifier, images, name)?;

    let now = Zoned::now();
    let palette = Palette::detect(store.state().is_dark_mode);
    for (i, result) in added.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", result_card(result, &now, palette));
    }

    let skipped = images.len() - added.len();
    if skipped > 0 {
        eprintln!("Skipped {skipped} image(s) that could not be analyzed; please try again");
    }
    Ok(())
}

/// Classifies each image, builds its record and adds it to the history.
///
/// Returns the records in the order the images were given.
pub(super) fn analyze(
    store: &mut Store,
    classifier: &dyn Classifier,
    images: &[String],
    name: Option<&str>,
) -> Result<Vec<AnalysisResult>, String> {
    if name.is_some() && images.len() > 1 {
        return Err("--name applies to a single image".to_string());
    }

    let unsupported: Vec<&str> = images
        .iter()
        .map(String::as_str)
        .filter(|uri| !is_valid_image_format(uri))
        .collect();
    if !unsupported.is_empty() {
        return Err(format!(
            "unsupported image format: {} (expected one of {})",
            unsupported.join(", "),
            IMAGE_EXTENSIONS.join(" ")
        ));
    }

    let outcomes = classify_batch(classifier, images);
    if outcomes.is_empty() {
        return Err("failed to analyze image; please try again".to_string());
    }

    let mut built = Vec::with_capacity(outcomes.len());
    for (uri, outcome) in outcomes {
        let image_name = name.map_or_else(|| display_name(uri), String::from);
        let mut result = create_result(uri, &image_name, &outcome, classifier.model().version)
            .map_err(|e| format!("failed to analyze {uri}: {e}"))?;
        result.metadata = local_metadata(uri);
        built.push((result, outcome));
    }

    // Nothing reaches the store until every record is valid.
    let mut added = Vec::with_capacity(built.len());
    for (result, outcome) in built {
        info!(
            id = %result.id,
            label = %result.label,
            confidence = result.confidence,
            tumor_probability = outcome.tumor_probability,
            no_tumor_probability = outcome.no_tumor_probability,
            processing_time_ms = outcome.processing_time_ms,
            "analysis complete"
        );
        store.add_result(result.clone());
        added.push(result);
    }
    Ok(added)
}

pub(super) fn cmd_consensus(classifier: &dyn Classifier, views: &Views) -> Result<(), String> {
    if views.axial.is_none() && views.sagittal.is_none() && views.coronal.is_none() {
        return Err("specify at least one of --axial, --sagittal, --coronal".to_string());
    }

    let verdict = consensus(classifier, views).map_err(|e| format!("{e}; please try again"))?;

    for (view, outcome) in &verdict.readings {
        println!(
            "{view:<9} {:<9} {:>4}",
            outcome.prediction,
            format_confidence(outcome.confidence)
        );
    }
    println!(
        "Consensus: {} ({} mean confidence over {} view(s))",
        verdict.label,
        format_confidence(verdict.confidence),
        verdict.readings.len()
    );
    println!();
    println!("{RESULT_DISCLAIMER}");
    Ok(())
}

/// The last path segment of a path or URI.
fn display_name(uri: &str) -> String {
    uri.rsplit(['/', '\\'])
        .find(|s| !s.is_empty())
        .unwrap_or(uri)
        .to_string()
}

/// File size for local images; `None` for remote URIs or missing files.
fn local_metadata(uri: &str) -> Option<ImageMetadata> {
    let path = match uri.strip_prefix("file://") {
        Some(path) => path,
        None if uri.contains("://") => return None,
        None => uri,
    };
    let meta = fs::metadata(path).ok().filter(fs::Metadata::is_file)?;
    Some(ImageMetadata {
        file_size: Some(meta.len()),
        ..ImageMetadata::default()
    })
}
