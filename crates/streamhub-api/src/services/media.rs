//! Media service: upload, read, list, update, delete and streaming URLs.
//!
//! Storage writes always come before metadata writes, and storage deletes before
//! metadata deletes. A failed storage call aborts the operation and leaves the
//! database untouched.

use std::sync::Arc;
use std::time::Duration;

use streamhub_core::constants::{
    DIRECT_STREAM_URL_TTL_SECS, MAX_PAGE_SIZE, STREAM_URL_TTL_SECS,
};
use streamhub_core::models::{MediaFilter, MediaMetadata, MediaRecord, MediaUpdate, NewMedia};
use streamhub_core::validation::{storage_filename, validate_media_extension, validate_title};
use streamhub_core::AppError;
use streamhub_db::MediaStore;
use streamhub_storage::{media_key, ByteReader, StorageGateway};
use uuid::Uuid;
use validator::Validate;

/// The file part of an upload.
pub struct MediaUpload {
    pub reader: ByteReader,
    /// Filename as sent by the client. Its last path segment becomes the last
    /// segment of the storage key.
    pub filename: String,
    pub content_type: String,
    pub size: i64,
}

#[derive(Clone)]
pub struct MediaService {
    repository: Arc<dyn MediaStore>,
    storage: StorageGateway,
}

impl MediaService {
    pub fn new(repository: Arc<dyn MediaStore>, storage: StorageGateway) -> Self {
        Self {
            repository,
            storage,
        }
    }

    /// Validate, store the object, then persist its record.
    ///
    /// The key is `{owner_id}/{filename}`: uploading the same filename twice replaces
    /// the stored object but still inserts a second record.
    #[tracing::instrument(
        skip(self, upload, metadata),
        fields(owner_id = %owner_id, filename = %upload.filename, operation = "upload_media")
    )]
    pub async fn upload_media(
        &self,
        upload: MediaUpload,
        owner_id: Uuid,
        metadata: MediaMetadata,
        is_public: bool,
    ) -> Result<MediaRecord, AppError> {
        let file_type = validate_media_extension(&upload.filename)?;
        validate_title(&metadata.title)?;
        let filename = storage_filename(&upload.filename)?;

        let key = media_key(owner_id, &filename);
        let storage_url = self
            .storage
            .upload(upload.reader, &key, &upload.content_type)
            .await?;

        let record = self
            .repository
            .create(NewMedia {
                title: metadata.title,
                description: metadata.description,
                filename: key,
                file_size: upload.size,
                file_type,
                genre: metadata.genre,
                tags: metadata.tags,
                duration: metadata.duration,
                storage_url,
                thumbnail_url: None,
                is_public,
                user_id: owner_id,
            })
            .await?;

        tracing::info!(media_id = %record.id, key = %record.filename, "Media uploaded");
        Ok(record)
    }

    /// Load a record and count the view in the background.
    ///
    /// The returned record carries the count as read. The increment runs detached;
    /// its failure is logged and otherwise dropped.
    #[tracing::instrument(skip(self), fields(media_id = %id, operation = "get_media"))]
    pub async fn get_media(&self, id: Uuid) -> Result<MediaRecord, AppError> {
        let record = self.find(id).await?;

        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            if let Err(e) = repository.increment_view_count(id).await {
                tracing::warn!(media_id = %id, error = %e, "Failed to increment view count");
            }
        });

        Ok(record)
    }

    /// Public records, newest first, with the total number of matches.
    ///
    /// `page` and `page_size` must be at least 1; `page_size` is capped at
    /// [`MAX_PAGE_SIZE`]. Empty filter strings are treated as absent.
    #[tracing::instrument(skip(self), fields(operation = "list_public_media"))]
    pub async fn list_public_media(
        &self,
        page: i64,
        page_size: i64,
        genre: Option<String>,
        search: Option<String>,
    ) -> Result<(Vec<MediaRecord>, i64), AppError> {
        if page < 1 {
            return Err(AppError::InvalidInput("page must be at least 1".to_string()));
        }
        if page_size < 1 {
            return Err(AppError::InvalidInput(
                "limit must be at least 1".to_string(),
            ));
        }

        let filter = MediaFilter {
            page,
            limit: page_size.min(MAX_PAGE_SIZE),
            genre: genre.filter(|g| !g.trim().is_empty()),
            search: search.filter(|s| !s.trim().is_empty()),
        };

        self.repository.find_public(&filter).await
    }

    /// Owner-only partial update. Existence is checked before ownership.
    #[tracing::instrument(
        skip(self, update),
        fields(media_id = %id, user_id = %requester_id, operation = "update_media")
    )]
    pub async fn update_media(
        &self,
        id: Uuid,
        requester_id: Uuid,
        update: MediaUpdate,
    ) -> Result<MediaRecord, AppError> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }
        update.validate()?;

        let record = self.find(id).await?;
        ensure_owner(&record, requester_id)?;

        if update.is_empty() {
            return Ok(record);
        }

        self.repository
            .update(id, requester_id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media {} not found", id)))
    }

    /// Owner-only delete: the stored object goes first, then the record.
    #[tracing::instrument(
        skip(self),
        fields(media_id = %id, user_id = %requester_id, operation = "delete_media")
    )]
    pub async fn delete_media(&self, id: Uuid, requester_id: Uuid) -> Result<(), AppError> {
        let record = self.find(id).await?;
        ensure_owner(&record, requester_id)?;

        self.storage.delete(&record.filename).await?;

        // A concurrent delete may have removed the row after the object went.
        if !self
            .repository
            .delete_by_id_and_owner(id, requester_id)
            .await?
        {
            return Err(AppError::NotFound(format!("Media {} not found", id)));
        }

        tracing::info!(key = %record.filename, "Media deleted");
        Ok(())
    }

    /// Presigned URL valid for [`STREAM_URL_TTL_SECS`].
    #[tracing::instrument(skip(self), fields(media_id = %id, operation = "generate_stream_url"))]
    pub async fn generate_stream_url(&self, id: Uuid) -> Result<String, AppError> {
        let record = self.find(id).await?;
        self.presign(&record, STREAM_URL_TTL_SECS).await
    }

    /// Presigned URL valid for [`DIRECT_STREAM_URL_TTL_SECS`], with the record it points at.
    #[tracing::instrument(skip(self), fields(media_id = %id, operation = "direct_stream_url"))]
    pub async fn direct_stream_url(&self, id: Uuid) -> Result<(String, MediaRecord), AppError> {
        let record = self.find(id).await?;
        let url = self.presign(&record, DIRECT_STREAM_URL_TTL_SECS).await?;
        Ok((url, record))
    }

    async fn find(&self, id: Uuid) -> Result<MediaRecord, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Media {} not found", id)))
    }

    async fn presign(&self, record: &MediaRecord, ttl_secs: u64) -> Result<String, AppError> {
        let url = self
            .storage
            .presigned_url(&record.filename, Duration::from_secs(ttl_secs))
            .await?;
        Ok(url)
    }
}

fn ensure_owner(record: &MediaRecord, requester_id: Uuid) -> Result<(), AppError> {
    if record.user_id != requester_id {
        return Err(AppError::AccessDenied(
            "You can only modify your own media".to_string(),
        ));
    }
    Ok(())
}
