//! Background writer: saves snapshots in the order they were dispatched.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use crate::model::AppState;
use crate::storage::Persist;

pub(super) struct Writer {
    tx: Option<mpsc::Sender<AppState>>,
    handle: Option<JoinHandle<usize>>,
}

impl Writer {
    /// Moves the backend onto a dedicated thread.
    pub(super) fn spawn(persist: Box<dyn Persist>) -> Self {
        let (tx, rx) = mpsc::channel::<AppState>();

        let handle = thread::spawn(move || {
            let mut failures = 0;
            for state in rx {
                match persist.save(&state) {
                    Ok(()) => debug!(entries = state.history.len(), "state saved"),
                    Err(e) => {
                        failures += 1;
                        error!(error = %e, "failed to save state; memory remains authoritative");
                    }
                }
            }
            failures
        });

        Self {
            tx: Some(tx),
            handle: Some(handle),
        }
    }

    pub(super) fn submit(&self, state: AppState) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(state).is_err() {
            error!("state writer has stopped; snapshot dropped");
        }
    }

    /// Closes the queue and waits for every pending save.
    /// Returns how many saves failed over the writer's lifetime.
    pub(super) fn finish(&mut self) -> usize {
        drop(self.tx.take());
        let Some(handle) = self.handle.take() else {
            return 0;
        };
        handle.join().unwrap_or_else(|_| {
            error!("state writer panicked");
            1
        })
    }
}

impl Drop for Writer {
    fn drop(&mut self) {
        self.finish();
    }
}
