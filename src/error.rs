use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{managers::session::StoreError, models::responses::ErrorResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("Too many requests from {0}")]
    RateLimited(String),

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream returned malformed data: {0}")]
    UpstreamMalformed(String),

    #[error("Album lookup failed: {0}")]
    UpstreamLookupFailed(String),

    #[error("Failed to fetch poster asset: {0}")]
    AssetFetchFailed(String),

    #[error("Scannable image is not a valid PNG")]
    InvalidScannableImage,

    #[error("Poster rendering failed: {0}")]
    RenderFailed(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamUnavailable(_)
            | AppError::UpstreamMalformed(_)
            | AppError::UpstreamLookupFailed(_)
            | AppError::AssetFetchFailed(_)
            | AppError::InvalidScannableImage
            | AppError::RenderFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::NotFound(_) => "not_found",
            AppError::AlreadyExists(_) => "already_exists",
            AppError::RateLimited(_) => "rate_limited",
            AppError::UpstreamUnavailable(_) => "upstream_unavailable",
            AppError::UpstreamMalformed(_) => "upstream_malformed",
            AppError::UpstreamLookupFailed(_) => "upstream_lookup_failed",
            AppError::AssetFetchFailed(_) => "asset_fetch_failed",
            AppError::InvalidScannableImage => "invalid_scannable_image",
            AppError::RenderFailed(_) => "render_failed",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => AppError::NotFound(format!("Session not found: {}", id)),
            StoreError::AlreadyExists(id) => {
                AppError::AlreadyExists(format!("Session already exists: {}", id))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, code, error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, code, error = %message, "Request rejected");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
