//! Periodic read synchronization.
//!
//! `SyncLoop` polls the remote store on a fixed interval and funnels every
//! result into the `AppointmentStore` and the `DurableCache`. Each tick's
//! poll runs as its own task: a poll that outlives the interval overlaps the
//! next one, and the store keeps whichever response lands last.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::cache::DurableCache;
use crate::constants::DEFAULT_POLL_INTERVAL;
use crate::error::SyncError;
use crate::remote::RemoteSyncClient;
use crate::store::AppointmentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// One poll: fetch, then update store and cache.
#[derive(Clone)]
struct PollCycle {
    client: Arc<dyn RemoteSyncClient>,
    store: Arc<AppointmentStore>,
    cache: Arc<dyn DurableCache>,
}

impl PollCycle {
    async fn run(&self) -> Result<usize, SyncError> {
        let result = self.client.fetch_appointments().await;

        let outcome = match result {
            Ok(appointments) => {
                let count = appointments.len();
                self.store.replace(appointments);
                self.store.clear_error();
                tracing::debug!(count, "Poll succeeded");
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Poll failed, keeping last known appointments");
                self.store.mark_error(e.to_string());
                Err(e)
            }
        };

        // Written after every attempt; on failure this rewrites the stale state
        self.cache.save(&self.store.current());
        outcome
    }
}

pub struct SyncLoop {
    cycle: PollCycle,
    interval: Duration,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl SyncLoop {
    pub fn new(
        client: Arc<dyn RemoteSyncClient>,
        store: Arc<AppointmentStore>,
        cache: Arc<dyn DurableCache>,
    ) -> Self {
        Self::with_interval(client, store, cache, DEFAULT_POLL_INTERVAL)
    }

    /// A zero interval falls back to the default.
    pub fn with_interval(
        client: Arc<dyn RemoteSyncClient>,
        store: Arc<AppointmentStore>,
        cache: Arc<dyn DurableCache>,
        interval: Duration,
    ) -> Self {
        let interval = if interval.is_zero() {
            tracing::warn!("Poll interval of zero requested, using default");
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };

        SyncLoop {
            cycle: PollCycle {
                client,
                store,
                cache,
            },
            interval,
            ticker: Mutex::new(None),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> LoopState {
        match self.ticker().as_ref() {
            Some(handle) if !handle.is_finished() => LoopState::Running,
            _ => LoopState::Stopped,
        }
    }

    /// Stopped → Running: poll now, then every `interval` until `stop()`.
    ///
    /// Must be called from within a tokio runtime. No-op while running.
    pub fn start(&self) {
        let mut ticker = self.ticker();
        if matches!(ticker.as_ref(), Some(handle) if !handle.is_finished()) {
            return;
        }

        let cycle = self.cycle.clone();
        let period = self.interval;

        *ticker = Some(tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                // First tick completes immediately
                ticks.tick().await;

                let cycle = cycle.clone();
                tokio::spawn(async move {
                    let _ = cycle.run().await;
                });
            }
        }));

        tracing::info!(interval = ?period, "Sync loop started");
    }

    /// Running → Stopped: cancel future ticks.
    ///
    /// A poll already in flight is not aborted and still lands in the store.
    pub fn stop(&self) {
        if let Some(handle) = self.ticker().take() {
            handle.abort();
            tracing::info!("Sync loop stopped");
        }
    }

    /// Run a single poll cycle inline, outside the timer.
    pub async fn poll_once(&self) -> Result<usize, SyncError> {
        self.cycle.run().await
    }

    fn ticker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.ticker.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for SyncLoop {
    fn drop(&mut self) {
        if let Some(handle) = self.ticker().take() {
            handle.abort();
        }
    }
}
