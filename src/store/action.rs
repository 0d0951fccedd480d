//! Actions: the closed set of mutations the store accepts, and the reducer
//! that applies them.

use crate::model::{AnalysisResult, AppState};

/// One mutation of the app state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Prepend a result. Ids are not deduplicated; callers supply fresh ones.
    AddResult(AnalysisResult),

    /// Remove the result with this id. Absent ids are a no-op.
    DeleteResult(String),

    /// Empty the history, leaving preferences alone.
    ClearHistory,

    /// Replace the history wholesale.
    SetHistory(Vec<AnalysisResult>),

    SetDarkMode(bool),

    SetOnboarding(bool),

    /// Replace the whole state; used once, with what storage returned.
    LoadState(AppState),
}

impl Action {
    /// Stable name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddResult(_) => "ADD_RESULT",
            Self::DeleteResult(_) => "DELETE_RESULT",
            Self::ClearHistory => "CLEAR_HISTORY",
            Self::SetHistory(_) => "SET_HISTORY",
            Self::SetDarkMode(_) => "SET_DARK_MODE",
            Self::SetOnboarding(_) => "SET_ONBOARDING",
            Self::LoadState(_) => "LOAD_STATE",
        }
    }
}

/// Computes the next state. Pure: no I/O, no clock, no randomness.
pub fn reduce(mut state: AppState, action: Action) -> AppState {
    match action {
        Action::AddResult(result) => state.history.insert(0, result),
        Action::DeleteResult(id) => state.history.retain(|r| r.id != id),
        Action::ClearHistory => state.history.clear(),
        Action::SetHistory(history) => state.history = history,
        Action::SetDarkMode(on) => state.is_dark_mode = on,
        Action::SetOnboarding(seen) => state.has_seen_onboarding = seen,
        Action::LoadState(loaded) => return loaded,
    }
    state
}
