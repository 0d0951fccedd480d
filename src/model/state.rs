//! The single persisted application state.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, Label};

/// Everything brainscan persists: the result history plus two preferences.
///
/// `history` is newest first. Missing fields in a stored blob fall back to
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    #[serde(rename = "analysisHistory")]
    pub history: Vec<AnalysisResult>,

    pub is_dark_mode: bool,

    pub has_seen_onboarding: bool,
}

/// Counts shown under the history list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub tumor: usize,
    pub no_tumor: usize,
    pub total: usize,
}

impl AppState {
    /// Looks up a result by exact id.
    pub fn find(&self, id: &str) -> Option<&AnalysisResult> {
        self.history.iter().find(|r| r.id == id)
    }

    pub fn stats(&self) -> HistoryStats {
        let tumor = self
            .history
            .iter()
            .filter(|r| r.label == Label::Tumor)
            .count();
        HistoryStats {
            tumor,
            no_tumor: self.history.len() - tumor,
            total: self.history.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;

    fn result(id: &str, label: Label) -> AnalysisResult {
        AnalysisResult {
            id: id.into(),
            image_uri: format!("file://{id}.jpg"),
            image_name: format!("{id}.jpg"),
            created_at: Timestamp::from_millisecond(1_770_000_000_000).unwrap(),
            label,
            confidence: 0.8,
            model_version: "1.0.0".into(),
            heatmap_uri: None,
            metadata: None,
        }
    }

    #[test]
    fn default_is_empty_with_flags_off() {
        let state = AppState::default();
        assert!(state.history.is_empty());
        assert!(!state.is_dark_mode);
        assert!(!state.has_seen_onboarding);
    }

    #[test]
    fn serializes_with_stable_field_names() {
        let state = AppState {
            history: vec![result("a", Label::Tumor)],
            is_dark_mode: true,
            has_seen_onboarding: false,
        };
        let value = serde_json::to_value(&state).unwrap();

        assert!(value["analysisHistory"].is_array());
        assert_eq!(value["isDarkMode"], true);
        assert_eq!(value["hasSeenOnboarding"], false);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let state: AppState = serde_json::from_str(r#"{"isDarkMode":true}"#).unwrap();
        assert!(state.is_dark_mode);
        assert!(state.history.is_empty());
        assert!(!state.has_seen_onboarding);
    }

    #[test]
    fn find_matches_exact_id_only() {
        let state = AppState {
            history: vec![result("abc", Label::Tumor), result("abcd", Label::NoTumor)],
            ..AppState::default()
        };
        assert_eq!(state.find("abcd").unwrap().label, Label::NoTumor);
        assert!(state.find("ab").is_none());
    }

    #[test]
    fn stats_count_by_label() {
        let state = AppState {
            history: vec![
                result("a", Label::Tumor),
                result("b", Label::NoTumor),
                result("c", Label::Tumor),
            ],
            ..AppState::default()
        };
        assert_eq!(
            state.stats(),
            HistoryStats {
                tumor: 2,
                no_tumor: 1,
                total: 3
            }
        );
    }
}
