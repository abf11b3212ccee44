use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::models::album::AlbumInfo;

pub const DEFAULT_FONT_SIZE: u32 = 16;
pub const DEFAULT_COLOR_SCHEME: u32 = 1;

/// In-flight poster customisation for one album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PosterSession {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub album_data: AlbumData,
    pub customization: Customization,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AlbumData {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub album_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub artist_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cover_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tracklist: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub copyright_text: String,
}

impl AlbumData {
    pub fn from_info(album_id: impl Into<String>, info: AlbumInfo) -> Self {
        Self {
            id: album_id.into(),
            album_name: info.album_name,
            artist_name: info.artist_name,
            cover_url: info.cover_url,
            tracklist: info.tracklist,
            copyright_text: info.copyright,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Customization {
    pub font_size: u32,
    pub color_scheme: u32,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color_scheme: DEFAULT_COLOR_SCHEME,
        }
    }
}

/// Field-level changes to a session. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SessionUpdate {
    pub album_data: Option<AlbumDataUpdate>,
    pub customization: Option<CustomizationUpdate>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AlbumDataUpdate {
    pub id: Option<String>,
    pub album_name: Option<String>,
    pub artist_name: Option<String>,
    pub cover_url: Option<String>,
    pub tracklist: Option<Vec<String>>,
    pub copyright_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CustomizationUpdate {
    pub font_size: Option<u32>,
    pub color_scheme: Option<u32>,
}

impl PosterSession {
    pub fn new(id: String, album_data: AlbumData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at: now,
            last_modified: now,
            album_data,
            customization: Customization::default(),
        }
    }

    /// Merges `update` one level deep and stamps `last_modified`.
    ///
    /// `last_modified` never moves backwards, even if `now` does.
    pub fn apply(&mut self, update: SessionUpdate, now: DateTime<Utc>) {
        if let Some(album) = update.album_data {
            let target = &mut self.album_data;
            if let Some(id) = album.id {
                target.id = id;
            }
            if let Some(album_name) = album.album_name {
                target.album_name = album_name;
            }
            if let Some(artist_name) = album.artist_name {
                target.artist_name = artist_name;
            }
            if let Some(cover_url) = album.cover_url {
                target.cover_url = cover_url;
            }
            if let Some(tracklist) = album.tracklist {
                target.tracklist = tracklist;
            }
            if let Some(copyright_text) = album.copyright_text {
                target.copyright_text = copyright_text;
            }
        }

        if let Some(custom) = update.customization {
            if let Some(font_size) = custom.font_size {
                self.customization.font_size = font_size;
            }
            if let Some(color_scheme) = custom.color_scheme {
                self.customization.color_scheme = color_scheme;
            }
        }

        self.last_modified = now.max(self.last_modified);
    }
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
