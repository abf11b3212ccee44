use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppError,
    managers::session::SessionStore,
    models::session::{AlbumData, PosterSession, SessionUpdate},
    services::backend::BackendClient,
    utils::clock::Clock,
};

/// Creates, reads, updates and deletes poster sessions.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    backend: BackendClient,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: BackendClient,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            backend,
            clock,
        }
    }

    /// Looks the album up and stores a fresh session for it.
    pub async fn start_session(&self, album_id: &str) -> Result<PosterSession, AppError> {
        if album_id.trim().is_empty() {
            return Err(AppError::Validation("albumId is required".to_string()));
        }

        let info = self.backend.album_info(album_id).await.map_err(|e| {
            tracing::warn!(album_id, error = %e, "Album lookup failed");
            AppError::UpstreamLookupFailed(e.to_string())
        })?;

        let session = PosterSession::new(
            Uuid::new_v4().to_string(),
            AlbumData::from_info(album_id, info),
            self.clock.now(),
        );

        self.store.create(session.clone()).await?;

        tracing::info!(session_id = %session.id, album_id, "Session created");
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<PosterSession, AppError> {
        let session = self.store.get(session_id).await?;
        tracing::debug!(session_id, "Session fetched");
        Ok(session)
    }

    pub async fn update_session(
        &self,
        session_id: &str,
        update: SessionUpdate,
    ) -> Result<PosterSession, AppError> {
        let session = self.store.update(session_id, update).await?;
        tracing::info!(session_id, "Session updated");
        Ok(session)
    }

    pub async fn delete_session(&self, session_id: &str) -> Result<(), AppError> {
        self.store.delete(session_id).await?;
        tracing::info!(session_id, "Session deleted");
        Ok(())
    }

    pub async fn purge_expired(&self) -> Result<usize, AppError> {
        Ok(self.store.purge_expired().await?)
    }
}
