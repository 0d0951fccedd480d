//! The history store: sole owner of the app state.
//!
//! Every mutation goes through [`reduce`]. After each transition the new
//! snapshot is sent to subscribers and queued for the background writer, so
//! reads reflect an action as soon as `dispatch` returns while the save
//! trails behind.
//!
//! ```text
//! dispatch(action) ─► reduce ─► state ─┬─► subscribers (mpsc)
//!                                      └─► writer thread ─► Persist::save
//! ```

mod action;
mod writer;

use std::{mem, sync::mpsc};

use tracing::{debug, info, warn};

use crate::model::{AnalysisResult, AppState};
use crate::storage::Persist;

pub use action::{Action, reduce};

use writer::Writer;

/// Owns the app state for the lifetime of the process.
///
/// Construct one in `main` and pass it by reference; nothing else holds state.
pub struct Store {
    state: AppState,
    subscribers: Vec<mpsc::Sender<AppState>>,
    writer: Writer,
}

impl Store {
    /// Restores the last saved state, or starts empty.
    ///
    /// A failed or corrupt load is logged and treated as "nothing saved".
    pub fn open(persist: Box<dyn Persist>) -> Self {
        let loaded = match persist.load() {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!(error = %e, "could not restore saved state; starting empty");
                None
            }
        };

        let mut store = Self {
            state: AppState::default(),
            subscribers: Vec::new(),
            writer: Writer::spawn(persist),
        };

        if let Some(state) = loaded {
            info!(entries = state.history.len(), "restored saved state");
            store.dispatch(Action::LoadState(state));
        }
        store
    }

    /// The current state. Always reflects the last dispatched action.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Looks up a result by exact id.
    pub fn find(&self, id: &str) -> Option<&AnalysisResult> {
        self.state.find(id)
    }

    /// Receives a snapshot after every subsequent action.
    ///
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> mpsc::Receiver<AppState> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Applies an action, notifies subscribers, then queues a save.
    pub fn dispatch(&mut self, action: Action) {
        let name = action.name();
        let state = mem::take(&mut self.state);
        self.state = reduce(state, action);
        debug!(
            action = name,
            entries = self.state.history.len(),
            "applied action"
        );

        self.subscribers
            .retain(|tx| tx.send(self.state.clone()).is_ok());
        self.writer.submit(self.state.clone());
    }

    pub fn add_result(&mut self, result: AnalysisResult) {
        self.dispatch(Action::AddResult(result));
    }

    pub fn delete_result(&mut self, id: &str) {
        self.dispatch(Action::DeleteResult(id.to_string()));
    }

    pub fn clear_history(&mut self) {
        self.dispatch(Action::ClearHistory);
    }

    pub fn set_history(&mut self, history: Vec<AnalysisResult>) {
        self.dispatch(Action::SetHistory(history));
    }

    pub fn set_dark_mode(&mut self, on: bool) {
        self.dispatch(Action::SetDarkMode(on));
    }

    pub fn set_onboarding_complete(&mut self) {
        self.dispatch(Action::SetOnboarding(true));
    }

    /// Waits for every queued save, then shuts the writer down.
    /// Returns the number of saves that failed.
    pub fn close(mut self) -> usize {
        self.writer.finish()
    }
}
