//! In-memory mirror of the remote appointment list.
//!
//! The store is the single source of truth for rendering. Only poll results
//! change the collection; a command sent through the conversation never
//! touches it directly.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::appointment::Appointment;

/// Everything the UI renders, read in one go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreSnapshot {
    pub appointments: Arc<Vec<Appointment>>,
    /// Cause of the most recent failed poll, cleared by the next success
    pub error: Option<String>,
    /// When a poll last replaced the collection
    pub last_synced: Option<DateTime<Utc>>,
}

/// Shared appointment state.
///
/// State lives in a `watch` channel: writers swap the whole snapshot under
/// the channel's lock, so `current()` never observes a half-replaced list,
/// and the presentation layer can `subscribe()` to re-render on change.
pub struct AppointmentStore {
    state: watch::Sender<StoreSnapshot>,
    seeded: AtomicBool,
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        AppointmentStore {
            state,
            seeded: AtomicBool::new(false),
        }
    }

    /// Establish the state shown before the first poll completes.
    ///
    /// Only the first call counts, and only if no poll has landed yet.
    /// Returns whether the seed was applied.
    pub fn seed(&self, initial: Vec<Appointment>) -> bool {
        if self.seeded.swap(true, Ordering::SeqCst) {
            tracing::warn!("Appointment store already seeded, ignoring");
            return false;
        }

        let count = initial.len();
        let applied = self.state.send_if_modified(|s| {
            if s.last_synced.is_some() {
                return false;
            }
            s.appointments = Arc::new(initial);
            true
        });

        if applied {
            tracing::debug!(count, "Seeded appointments from cache");
        }
        applied
    }

    /// Replace the whole collection with a poll result.
    pub fn replace(&self, appointments: Vec<Appointment>) {
        self.state.send_modify(|s| {
            s.appointments = Arc::new(appointments);
            s.last_synced = Some(Utc::now());
        });
    }

    pub fn current(&self) -> Arc<Vec<Appointment>> {
        self.state.borrow().appointments.clone()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.borrow().clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.state.borrow().last_synced
    }

    pub fn mark_error(&self, cause: impl Into<String>) {
        let cause = cause.into();
        self.state.send_modify(|s| s.error = Some(cause));
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Receive a notification each time the snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.state.subscribe()
    }
}
