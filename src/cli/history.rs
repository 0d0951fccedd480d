//! History commands: list, show, delete, clear, export, import.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use clap::Subcommand;
use jiff::Zoned;
use tracing::info;

use crate::model::AnalysisResult;
use crate::store::Store;

use super::format::{Palette, count_analyses, history_line, result_card, stats_line};

#[derive(Debug, Subcommand)]
pub(super) enum HistoryCommand {
    /// List past analyses, newest first.
    List {
        /// Show at most this many entries.
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the full result card for one analysis.
    Show {
        /// Analysis ID: full ID or unambiguous prefix.
        id: String,
    },

    /// Delete one analysis. Deleting an unknown ID changes nothing.
    Delete {
        /// Analysis ID: full ID or unambiguous prefix.
        id: String,
    },

    /// Delete every analysis. Preferences are kept.
    Clear {
        /// Confirm; this cannot be undone.
        #[arg(long)]
        yes: bool,
    },

    /// Print the history as a JSON array.
    Export,

    /// Replace the history with a JSON array produced by `export`.
    Import {
        /// Path to the exported JSON file.
        file: PathBuf,
    },
}

pub(super) fn run(store: &mut Store, command: HistoryCommand) -> Result<(), String> {
    match command {
        HistoryCommand::List { limit } => {
            cmd_list(store, limit);
            Ok(())
        }
        HistoryCommand::Show { id } => cmd_show(store, &id),
        HistoryCommand::Delete { id } => cmd_delete(store, &id),
        HistoryCommand::Clear { yes } => cmd_clear(store, yes),
        HistoryCommand::Export => cmd_export(store),
        HistoryCommand::Import { file } => cmd_import(store, &file),
    }
}

fn cmd_list(store: &Store, limit: Option<usize>) {
    let history = &store.state().history;
    println!("Analysis History");
    println!("{}", count_analyses(history.len()));

    if history.is_empty() {
        println!();
        println!("No Analyses Yet");
        println!("Your analysis history will appear here after you analyze your first MRI image");
        return;
    }

    let now = Zoned::now();
    let palette = Palette::detect(store.state().is_dark_mode);
    for result in history.iter().take(limit.unwrap_or(usize::MAX)) {
        println!();
        println!("{}", history_line(result, &now, palette));
    }
    println!();
    println!("{}", stats_line(store.state().stats()));
}

fn cmd_show(store: &Store, reference: &str) -> Result<(), String> {
    let result = resolve_result(store, reference)?
        .ok_or_else(|| format!("no analysis matching '{reference}'"))?;
    let palette = Palette::detect(store.state().is_dark_mode);
    println!("{}", result_card(result, &Zoned::now(), palette));
    Ok(())
}

fn cmd_delete(store: &mut Store, reference: &str) -> Result<(), String> {
    let Some(id) = resolve_result(store, reference)?.map(|r| r.id.clone()) else {
        eprintln!("No analysis matching '{reference}'; nothing deleted");
        return Ok(());
    };

    store.delete_result(&id);
    info!(id = %id, "deleted analysis");
    eprintln!("Deleted {id}");
    Ok(())
}

fn cmd_clear(store: &mut Store, yes: bool) -> Result<(), String> {
    if !yes {
        return Err(format!(
            "this deletes {}; pass --yes to confirm",
            count_analyses(store.state().history.len())
        ));
    }

    let cleared = store.state().history.len();
    store.clear_history();
    info!(cleared, "cleared history");
    eprintln!("Cleared {}", count_analyses(cleared));
    Ok(())
}

fn cmd_export(store: &Store) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&store.state().history)
        .map_err(|e| format!("failed to serialize history: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_import(store: &mut Store, file: &Path) -> Result<(), String> {
    let text = fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;
    let history = parse_history(&text)?;

    let count = history.len();
    store.set_history(history);
    info!(entries = count, path = %file.display(), "imported history");
    eprintln!("Imported {}", count_analyses(count));
    Ok(())
}

/// Parses an exported history, rejecting duplicate ids and out-of-range confidences.
fn parse_history(text: &str) -> Result<Vec<AnalysisResult>, String> {
    let history: Vec<AnalysisResult> =
        serde_json::from_str(text).map_err(|e| format!("invalid history file: {e}"))?;

    let mut seen = HashSet::new();
    for result in &history {
        if !seen.insert(result.id.as_str()) {
            return Err(format!("duplicate analysis id '{}'", result.id));
        }
        if !(0.0..=1.0).contains(&result.confidence) {
            return Err(format!(
                "analysis '{}' has confidence {} outside [0, 1]",
                result.id, result.confidence
            ));
        }
    }
    Ok(history)
}

/// Resolves an exact id or unambiguous prefix.
///
/// Returns `Ok(None)` when nothing matches and an error when several do.
/// A blank reference is an error, never a prefix of every id.
fn resolve_result<'a>(
    store: &'a Store,
    reference: &str,
) -> Result<Option<&'a AnalysisResult>, String> {
    if reference.trim().is_empty() {
        return Err("analysis ID is required".to_string());
    }

    if let Some(result) = store.find(reference) {
        return Ok(Some(result));
    }

    let matches: Vec<&AnalysisResult> = store
        .state()
        .history
        .iter()
        .filter(|r| r.id.starts_with(reference))
        .collect();

    match matches.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        many => {
            let ids: Vec<&str> = many.iter().map(|r| r.id.as_str()).collect();
            Err(format!(
                "'{reference}' is ambiguous; matches {} analyses: {}",
                many.len(),
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::config::Backend;
    use crate::model::Label;
    use crate::storage;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(storage::open(Backend::Json, dir.path()).unwrap());
        (dir, store)
    }

    fn result(id: &str) -> AnalysisResult {
        AnalysisResult {
            id: id.into(),
            image_uri: format!("file://{id}.jpg"),
            image_name: format!("{id}.jpg"),
            created_at: Timestamp::from_millisecond(1_770_000_000_000).unwrap(),
            label: Label::NoTumor,
            confidence: 0.82,
            model_version: "1.0.0".into(),
            heatmap_uri: None,
            metadata: None,
        }
    }

    fn seeded() -> (TempDir, Store) {
        let (dir, mut store) = test_store();
        store.set_history(vec![
            result("analysis_1770000000300_aaa111bbb"),
            result("analysis_1770000000200_ccc222ddd"),
            result("analysis_1770000000100_ccc333eee"),
        ]);
        (dir, store)
    }

    #[test]
    fn resolves_exact_and_prefix() {
        let (_dir, store) = seeded();

        let exact = resolve_result(&store, "analysis_1770000000200_ccc222ddd").unwrap();
        assert_eq!(exact.unwrap().id, "analysis_1770000000200_ccc222ddd");

        let prefix = resolve_result(&store, "analysis_17700000003").unwrap();
        assert_eq!(prefix.unwrap().id, "analysis_1770000000300_aaa111bbb");
    }

    #[test]
    fn unknown_reference_resolves_to_none() {
        let (_dir, store) = seeded();
        assert!(resolve_result(&store, "analysis_9").unwrap().is_none());
    }

    #[test]
    fn ambiguous_prefix_lists_candidates() {
        let (_dir, store) = seeded();

        let err = resolve_result(&store, "analysis_177").unwrap_err();
        assert!(err.contains("ambiguous"));
        assert!(err.contains("matches 3 analyses"));
        assert!(err.contains("analysis_1770000000100_ccc333eee"));
    }

    #[test]
    fn delete_by_prefix_removes_one() {
        let (_dir, mut store) = seeded();

        cmd_delete(&mut store, "analysis_1770000000200").unwrap();

        let ids: Vec<&str> = store.state().history.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "analysis_1770000000300_aaa111bbb",
                "analysis_1770000000100_ccc333eee"
            ]
        );
    }

    #[test]
    fn blank_reference_is_rejected() {
        let (_dir, mut store) = test_store();
        store.add_result(result("analysis_1770000000300_aaa111bbb"));

        assert!(cmd_delete(&mut store, "").is_err());
        assert!(cmd_delete(&mut store, "  ").is_err());
        assert!(cmd_show(&store, "").is_err());
        assert_eq!(store.state().history.len(), 1);
    }

    #[test]
    fn delete_unknown_is_a_no_op() {
        let (_dir, mut store) = seeded();
        let before = store.state().clone();

        cmd_delete(&mut store, "analysis_0").unwrap();

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn clear_requires_confirmation() {
        let (_dir, mut store) = seeded();
        store.set_dark_mode(true);

        assert!(cmd_clear(&mut store, false).is_err());
        assert_eq!(store.state().history.len(), 3);

        cmd_clear(&mut store, true).unwrap();
        assert!(store.state().history.is_empty());
        assert!(store.state().is_dark_mode);
    }

    #[test]
    fn import_replaces_history_from_export() {
        let (dir, store) = seeded();
        let exported = serde_json::to_string_pretty(&store.state().history).unwrap();
        let file = dir.path().join("export.json");
        fs::write(&file, exported).unwrap();

        let (_other, mut target) = test_store();
        target.add_result(result("analysis_1_zzz"));
        cmd_import(&mut target, &file).unwrap();

        assert_eq!(target.state().history, store.state().history);
    }

    #[test]
    fn import_rejects_duplicate_ids() {
        let text = serde_json::to_string(&vec![result("a"), result("a")]).unwrap();
        let err = parse_history(&text).unwrap_err();
        assert!(err.contains("duplicate analysis id 'a'"));
    }

    #[test]
    fn import_rejects_out_of_range_confidence() {
        let mut bad = result("a");
        bad.confidence = 1.5;
        let text = serde_json::to_string(&vec![bad]).unwrap();
        assert!(parse_history(&text).is_err());
    }

    #[test]
    fn import_rejects_malformed_json() {
        assert!(parse_history("{\"not\": \"a list\"}").is_err());
    }
}
