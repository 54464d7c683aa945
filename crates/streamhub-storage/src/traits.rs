//! Storage abstraction trait
//!
//! Every vendor adapter implements [`StorageProvider`]. The capability set is
//! deliberately small: upload, delete, public URL and presigned URL.

use crate::StorageBackend;
use async_trait::async_trait;
use std::pin::Pin;
use std::time::Duration;
use streamhub_core::AppError;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Presign failed: {0}")]
    PresignFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte stream handed to [`StorageProvider::upload`].
pub type ByteReader = Pin<Box<dyn AsyncRead + Send + Unpin>>;

/// Vendor failures surface as `AppError::Storage` with the message intact;
/// provider construction failures are configuration errors.
impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(msg) => AppError::Configuration(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Storage provider trait
///
/// One implementation per backing vendor. Keys are owner-scoped
/// (`{owner_id}/{filename}`); see the crate root documentation.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Upload the stream under `key` and return a durable reference URL.
    ///
    /// The URL is not necessarily publicly readable. An existing object with the
    /// same key is overwritten.
    async fn upload(
        &self,
        reader: ByteReader,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Delete the object stored under `key`.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Build the public URL for `key` locally, without a network call.
    fn public_url(&self, key: &str) -> String;

    /// Generate a time-limited GET URL for `key`. No bounds are applied to `expires_in`.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
