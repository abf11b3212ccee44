use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use futures_util::future::try_join;

use crate::{
    config::ScannableConfig,
    error::AppError,
    services::{
        backend::{BackendClient, RenderRequest, RenderedPoster},
        session::SessionService,
    },
};

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Builds the final poster for a session: fetches the cover and scannable
/// code, then hands everything to the renderer.
#[derive(Clone)]
pub struct PosterAssembler {
    http: reqwest::Client,
    backend: BackendClient,
    sessions: SessionService,
    scannable: ScannableConfig,
}

impl PosterAssembler {
    pub fn new(
        http: reqwest::Client,
        backend: BackendClient,
        sessions: SessionService,
        scannable: ScannableConfig,
    ) -> Self {
        Self {
            http,
            backend,
            sessions,
            scannable,
        }
    }

    pub async fn assemble(&self, session_id: &str) -> Result<RenderedPoster, AppError> {
        let session = self.sessions.get_session(session_id).await?;
        let album = &session.album_data;

        let (cover, scannable) = try_join(
            self.fetch_cover(&album.cover_url),
            self.fetch_scannable(&album.id),
        )
        .await?;

        tracing::debug!(
            session_id,
            cover_bytes = cover.len(),
            scannable_bytes = scannable.len(),
            "Poster assets fetched"
        );

        let request = RenderRequest {
            album_name: &album.album_name,
            artist_name: &album.artist_name,
            tracklist: &album.tracklist,
            copyright_text: &album.copyright_text,
            scannable: BASE64.encode(&scannable),
            image: BASE64.encode(&cover),
        };

        let poster = self.backend.render_poster(&request).await?;

        tracing::info!(
            session_id,
            content_type = %poster.content_type,
            bytes = poster.bytes.len(),
            "Poster rendered"
        );
        Ok(poster)
    }

    pub fn scannable_url(&self, album_id: &str) -> String {
        format!(
            "{}/uri/plain/{}/{}/{}/{}/spotify:album:{}",
            self.scannable.base_url.trim_end_matches('/'),
            self.scannable.format,
            self.scannable.bg_color,
            self.scannable.code_color,
            self.scannable.size,
            album_id
        )
    }

    async fn fetch_cover(&self, cover_url: &str) -> Result<Vec<u8>, AppError> {
        if cover_url.trim().is_empty() {
            return Err(AppError::AssetFetchFailed(
                "album has no cover image".to_string(),
            ));
        }

        self.fetch_bytes(cover_url, "cover image").await
    }

    async fn fetch_scannable(&self, album_id: &str) -> Result<Vec<u8>, AppError> {
        let bytes = self
            .fetch_bytes(&self.scannable_url(album_id), "scannable code")
            .await?;

        if !has_png_signature(&bytes) {
            tracing::warn!(album_id, "Scannable image failed PNG signature check");
            return Err(AppError::InvalidScannableImage);
        }

        Ok(bytes)
    }

    async fn fetch_bytes(&self, url: &str, what: &str) -> Result<Vec<u8>, AppError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamUnavailable(format!("timed out fetching {}", what))
            } else {
                AppError::AssetFetchFailed(format!("{}: {}", what, e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::AssetFetchFailed(format!(
                "{} returned {}",
                what, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::AssetFetchFailed(format!("{}: {}", what, e)))?;

        Ok(bytes.to_vec())
    }
}

pub fn has_png_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
}
