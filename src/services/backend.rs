use reqwest::header::CONTENT_TYPE;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    config::BackendConfig,
    error::AppError,
    models::album::{AlbumInfo, SearchResults},
};

/// Image returned by the renderer, untouched.
#[derive(Debug, Clone)]
pub struct RenderedPoster {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload accepted by the backend's `POST /poster`.
#[derive(Debug, Serialize)]
pub struct RenderRequest<'a> {
    pub album_name: &'a str,
    pub artist_name: &'a str,
    pub tracklist: &'a [String],
    pub copyright_text: &'a str,
    /// Base64 PNG.
    pub scannable: String,
    /// Base64 cover image.
    pub image: String,
}

/// HTTP client for the album search and poster rendering service.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(http: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search(&self, query: &str, quantity: u32) -> Result<SearchResults, AppError> {
        let quantity = quantity.to_string();
        let payload = self
            .get_search(&[("type", "search"), ("query", query), ("quantity", quantity.as_str())])
            .await?;

        if payload.get("albums").is_none() {
            if let Some(error) = payload.get("error") {
                tracing::debug!(query, error = %error, "Backend reported no search results");
                return Ok(SearchResults::default());
            }
        }

        decode_into(payload)
    }

    pub async fn album_info(&self, album_id: &str) -> Result<AlbumInfo, AppError> {
        let payload = self
            .get_search(&[("type", "get-info"), ("id", album_id)])
            .await?;

        if !payload.is_object() {
            return Err(AppError::UpstreamMalformed(format!(
                "expected album object, got {}",
                kind_of(&payload)
            )));
        }

        if let Some(error) = payload.get("error") {
            return Err(AppError::UpstreamMalformed(format!(
                "backend reported an error for album {}: {}",
                album_id, error
            )));
        }

        decode_into(payload)
    }

    pub async fn render_poster(
        &self,
        request: &RenderRequest<'_>,
    ) -> Result<RenderedPoster, AppError> {
        let response = self
            .http
            .post(format!("{}/poster", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("renderer: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::RenderFailed(if detail.is_empty() {
                format!("renderer returned {}", status)
            } else {
                detail
            }));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string())
            .unwrap_or_else(|| "image/png".to_string());

        if !content_type.starts_with("image/") {
            return Err(AppError::RenderFailed(format!(
                "renderer returned unexpected content type {}",
                content_type
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("renderer: {}", e)))?;

        Ok(RenderedPoster {
            content_type,
            bytes: bytes.to_vec(),
        })
    }

    async fn get_search(&self, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamUnavailable(format!(
                "backend returned {}: {}",
                status, detail
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        decode_payload(&body)
    }
}

/// Parses a backend body that may be JSON or a JSON string wrapping JSON.
pub fn decode_payload(body: &str) -> Result<Value, AppError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| AppError::UpstreamMalformed(e.to_string()))?;

    // Search results can arrive as `json.dumps` output wrapped in a JSON string.
    match value {
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| AppError::UpstreamMalformed(e.to_string()))
        }
        other => Ok(other),
    }
}

fn decode_into<T: DeserializeOwned>(value: Value) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|e| AppError::UpstreamMalformed(e.to_string()))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
