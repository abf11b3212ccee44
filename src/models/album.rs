use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::session::null_as_default;

/// One search hit as returned by the backend's `type=search` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AlbumSummary {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub album_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_name: String,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub albums: Vec<AlbumSummary>,
}

/// Album metadata in the backend's `type=get-info` wire shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AlbumInfo {
    #[serde(rename = "album-name", deserialize_with = "null_as_default")]
    pub album_name: String,
    #[serde(rename = "artist-name", deserialize_with = "null_as_default")]
    pub artist_name: String,
    #[serde(rename = "cover-url", deserialize_with = "null_as_default")]
    pub cover_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tracklist: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub copyright: String,
}
