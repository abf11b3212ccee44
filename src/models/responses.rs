use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    album::{AlbumInfo, SearchResults},
    session::PosterSession,
};

/// Body of every failed request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Session not found: 3f1c...")]
    pub error: String,
    #[schema(example = "not_found")]
    pub code: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SearchResponse {
    pub result: SearchResults,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AlbumInfoResponse {
    pub result: AlbumInfo,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub session: PosterSession,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}
