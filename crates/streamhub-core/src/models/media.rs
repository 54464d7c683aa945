use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

use super::TIMESTAMP_FORMAT;

/// Persisted metadata row describing one uploaded file and its owner.
///
/// `filename` holds the stored-object key (`{user_id}/{original filename}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct MediaRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub filename: String,
    pub file_size: i64,
    pub file_type: String,
    pub genre: String,
    pub tags: String,
    pub duration: i32,
    pub storage_url: String,
    pub thumbnail_url: Option<String>,
    pub is_public: bool,
    pub view_count: i64,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owner's username, present when the row was loaded with the users join.
    #[cfg_attr(feature = "sqlx", sqlx(default))]
    pub owner_username: Option<String>,
}

/// Fields for a new media row. Id and timestamps are assigned on insert.
#[derive(Debug, Clone)]
pub struct NewMedia {
    pub title: String,
    pub description: String,
    pub filename: String,
    pub file_size: i64,
    pub file_type: String,
    pub genre: String,
    pub tags: String,
    pub duration: i32,
    pub storage_url: String,
    pub thumbnail_url: Option<String>,
    pub is_public: bool,
    pub user_id: Uuid,
}

/// Descriptive fields supplied with an upload.
#[derive(Debug, Clone, Default)]
pub struct MediaMetadata {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub tags: String,
    pub duration: i32,
}

/// Owner-issued partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct MediaUpdate {
    #[validate(length(min = 1, max = 255, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub genre: Option<String>,
    pub tags: Option<String>,
    #[validate(url)]
    pub thumbnail_url: Option<String>,
    pub is_public: Option<bool>,
}

impl MediaUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.genre.is_none()
            && self.tags.is_none()
            && self.thumbnail_url.is_none()
            && self.is_public.is_none()
    }
}

/// Filters and pagination for public listings. Pages are 1-indexed.
#[derive(Debug, Clone)]
pub struct MediaFilter {
    pub page: i64,
    pub limit: i64,
    pub genre: Option<String>,
    pub search: Option<String>,
}

impl MediaFilter {
    /// Rows to skip. Saturates instead of overflowing, so an absurd page is just empty.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).max(0).saturating_mul(self.limit)
    }

    /// Case-insensitive substring match on title, description or tags.
    pub fn matches_search(&self, record: &MediaRecord) -> bool {
        match self.search.as_deref() {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                record.title.to_lowercase().contains(&term)
                    || record.description.to_lowercase().contains(&term)
                    || record.tags.to_lowercase().contains(&term)
            }
        }
    }

    pub fn matches_genre(&self, record: &MediaRecord) -> bool {
        self.genre.as_deref().map_or(true, |g| record.genre == g)
    }
}

/// Media as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub filename: String,
    pub file_size: i64,
    pub file_type: String,
    pub genre: String,
    pub tags: String,
    pub duration: i32,
    pub storage_url: String,
    pub thumbnail_url: Option<String>,
    pub is_public: bool,
    pub view_count: i64,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// `%Y-%m-%dT%H:%M:%SZ`
    pub created_at: String,
}

impl From<MediaRecord> for MediaResponse {
    fn from(record: MediaRecord) -> Self {
        MediaResponse {
            id: record.id,
            title: record.title,
            description: record.description,
            filename: record.filename,
            file_size: record.file_size,
            file_type: record.file_type,
            genre: record.genre,
            tags: record.tags,
            duration: record.duration,
            storage_url: record.storage_url,
            thumbnail_url: record.thumbnail_url,
            is_public: record.is_public,
            view_count: record.view_count,
            user_id: record.user_id,
            username: record.owner_username,
            created_at: record.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MediaListResponse {
    pub media: Vec<MediaResponse>,
    pub pagination: Pagination,
}
