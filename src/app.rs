//! Wiring between config, remote, cache, store and the session.

use std::sync::Arc;

use anyhow::Result;
use apptsync_core::{
    ApptsyncConfig, AppointmentStore, ConversationSession, DirStore, DurableCache, HttpRemote,
    KvCache, SyncLoop,
};

pub struct App {
    pub config: ApptsyncConfig,
    pub remote: Arc<HttpRemote>,
    pub cache: Arc<KvCache<DirStore>>,
    pub store: Arc<AppointmentStore>,
}

impl App {
    /// Load config and seed the store from the on-disk cache.
    pub fn load(server_override: Option<String>) -> Result<Self> {
        let mut config = ApptsyncConfig::load()?;
        if let Some(url) = server_override {
            config.server_url = url;
        }

        let remote = Arc::new(HttpRemote::new(&config.server_url));
        let cache = Arc::new(config.cache());
        let store = Arc::new(AppointmentStore::new());

        if let Some(cached) = cache.load() {
            store.seed(cached);
        }

        tracing::debug!(server = %config.server_url, session = %config.session_id, "Client ready");

        Ok(App {
            config,
            remote,
            cache,
            store,
        })
    }

    pub fn sync_loop(&self) -> Result<SyncLoop> {
        Ok(SyncLoop::with_interval(
            self.remote.clone(),
            self.store.clone(),
            self.cache.clone(),
            self.config.poll_interval()?,
        ))
    }

    pub fn session(&self) -> ConversationSession {
        ConversationSession::new(self.remote.clone(), self.config.session_id())
    }
}
