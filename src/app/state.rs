use std::{sync::Arc, time::Duration};

use crate::{
    config::Config,
    managers::session::{MemorySessionStore, SessionStore},
    services::{backend::BackendClient, poster::PosterAssembler, session::SessionService},
    utils::clock::{Clock, SystemClock},
};

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub sessions: SessionService,
    pub posters: PosterAssembler,
}

impl AppState {
    /// Wires the in-process session store and the system clock.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let ttl = chrono::Duration::try_seconds(config.session.ttl_secs)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .ok_or_else(|| {
                anyhow::anyhow!("Invalid session TTL: {}s", config.session.ttl_secs)
            })?;
        let store = MemorySessionStore::new(ttl, clock.clone());
        Self::with_store(config, Arc::new(store), clock)
    }

    pub fn with_store(
        config: &Config,
        store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.backend.request_timeout_secs))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        let backend = BackendClient::new(http.clone(), &config.backend);
        let sessions = SessionService::new(store, backend.clone(), clock);
        let posters = PosterAssembler::new(
            http,
            backend.clone(),
            sessions.clone(),
            config.scannable.clone(),
        );

        Ok(Self {
            backend,
            sessions,
            posters,
        })
    }
}
