use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::{DashMap, mapref::entry::Entry};
use thiserror::Error;

use crate::{
    models::session::{PosterSession, SessionUpdate},
    utils::clock::Clock,
};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("session already exists: {0}")]
    AlreadyExists(String),

    #[error("session not found: {0}")]
    NotFound(String),
}

/// TTL-bounded storage for poster sessions.
///
/// Reads return clones; every mutation goes through `update`. An expired
/// record behaves exactly like a missing one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: PosterSession) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<PosterSession, StoreError>;

    /// Merges `update` into the live record and restarts its expiry window.
    async fn update(&self, id: &str, update: SessionUpdate) -> Result<PosterSession, StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Drops expired records, returning how many were removed. Backends with
    /// native per-key expiry have nothing to do here.
    async fn purge_expired(&self) -> Result<usize, StoreError> {
        Ok(0)
    }
}

#[derive(Debug, Clone)]
struct StoredSession {
    session: PosterSession,
    expires_at: DateTime<Utc>,
}

impl StoredSession {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Single-instance store backed by a `DashMap`.
#[derive(Clone)]
pub struct MemorySessionStore {
    sessions: Arc<DashMap<String, StoredSession>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl MemorySessionStore {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
            clock,
        }
    }

    /// Entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: PosterSession) -> Result<(), StoreError> {
        let now = self.clock.now();
        let stored = StoredSession {
            expires_at: now + self.ttl,
            session,
        };

        match self.sessions.entry(stored.session.id.clone()) {
            Entry::Occupied(mut entry) => {
                if !entry.get().is_expired(now) {
                    return Err(StoreError::AlreadyExists(entry.key().clone()));
                }
                entry.insert(stored);
            }
            Entry::Vacant(entry) => {
                entry.insert(stored);
            }
        }

        Ok(())
    }

    async fn get(&self, id: &str) -> Result<PosterSession, StoreError> {
        let now = self.clock.now();

        match self.sessions.get(id) {
            Some(entry) if !entry.is_expired(now) => Ok(entry.session.clone()),
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn update(&self, id: &str, update: SessionUpdate) -> Result<PosterSession, StoreError> {
        let now = self.clock.now();

        match self.sessions.get_mut(id) {
            Some(mut entry) if !entry.is_expired(now) => {
                entry.session.apply(update, now);
                entry.expires_at = now + self.ttl;
                Ok(entry.session.clone())
            }
            _ => Err(StoreError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.sessions.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, StoreError> {
        let now = self.clock.now();
        let before = self.sessions.len();
        self.sessions.retain(|_, stored| !stored.is_expired(now));
        Ok(before.saturating_sub(self.sessions.len()))
    }
}
