use crate::signing;
use crate::traits::{ByteReader, StorageError, StorageProvider, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

/// Local filesystem storage provider, for development and tests.
///
/// Presigned URLs point back at the API's file route and carry an HMAC signature.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    signing_secret: Vec<u8>,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/streamhub/media")
    /// * `base_url` - Base URL files are served from (e.g., "http://localhost:8080/files")
    /// * `signing_secret` - Key for presigned URL signatures
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        signing_secret: impl Into<Vec<u8>>,
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
            signing_secret: signing_secret.into(),
        })
    }

    /// Convert a storage key to a filesystem path under the base directory.
    ///
    /// Keys with a `.` or `..` segment, an empty segment or a leading `/` are rejected.
    /// Dots inside a name (`song..final.mp3`) are fine.
    pub fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        let bad_segment = key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if key.is_empty() || bad_segment || key.contains('\\') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        Ok(self.base_path.join(key))
    }

    /// Verify a signature issued by [`StorageProvider::presigned_url`].
    pub fn verify_signature(&self, key: &str, expires: u64, signature: &str) -> bool {
        signing::verify(&self.signing_secret, key, expires, signature)
    }

    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorage {
    async fn upload(
        &self,
        mut reader: ByteReader,
        key: &str,
        _content_type: &str,
    ) -> StorageResult<String> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        let bytes_copied = tokio::io::copy(&mut reader, &mut file).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write stream to file {}: {}",
                path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = bytes_copied,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = %key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.key_to_path(key)?;
        let expires = signing::now_unix().saturating_add(expires_in.as_secs());
        let signature = signing::sign(&self.signing_secret, key, expires);
        Ok(format!(
            "{}?expires={}&signature={}",
            self.public_url(key),
            expires,
            signature
        ))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn storage(dir: &Path) -> LocalStorage {
        LocalStorage::new(dir, "http://localhost:8080/files".to_string(), "secret")
            .await
            .unwrap()
    }

    fn reader(data: &'static [u8]) -> ByteReader {
        Box::pin(std::io::Cursor::new(data))
    }

    #[tokio::test]
    async fn test_local_storage_upload_writes_file() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let url = storage
            .upload(reader(b"test data"), "owner/song.mp3", "audio/mpeg")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:8080/files/owner/song.mp3");
        let written = fs::read(dir.path().join("owner/song.mp3")).await.unwrap();
        assert_eq!(written, b"test data");
    }

    #[tokio::test]
    async fn test_upload_same_key_overwrites() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload(reader(b"first"), "owner/song.mp3", "audio/mpeg")
            .await
            .unwrap();
        storage
            .upload(reader(b"second"), "owner/song.mp3", "audio/mpeg")
            .await
            .unwrap();

        let written = fs::read(dir.path().join("owner/song.mp3")).await.unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let result = storage
            .upload(reader(b"x"), "../../../etc/passwd", "text/plain")
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage
            .presigned_url("/etc/passwd", Duration::from_secs(60))
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_dots_inside_names_are_allowed() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload(reader(b"mix"), "owner/song..final.mp3", "audio/mpeg")
            .await
            .unwrap();
        assert!(dir.path().join("owner/song..final.mp3").exists());

        for key in ["owner/../x.mp3", "owner/./x.mp3", "owner//x.mp3", "owner/.."] {
            assert!(
                matches!(storage.key_to_path(key), Err(StorageError::InvalidKey(_))),
                "{}",
                key
            );
        }
    }

    #[tokio::test]
    async fn test_local_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        storage
            .upload(reader(b"bytes"), "owner/clip.mp4", "video/mp4")
            .await
            .unwrap();
        storage.delete("owner/clip.mp4").await.unwrap();
        assert!(!dir.path().join("owner/clip.mp4").exists());
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let result = storage.delete("nonexistent/file.mp3").await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_presigned_url_verifies() {
        let dir = tempdir().unwrap();
        let storage = storage(dir.path()).await;

        let url = storage
            .presigned_url("owner/song.mp3", Duration::from_secs(3600))
            .await
            .unwrap();
        assert!(url.starts_with("http://localhost:8080/files/owner/song.mp3?expires="));

        let query = url.split_once('?').unwrap().1;
        let mut expires = 0u64;
        let mut signature = String::new();
        for pair in query.split('&') {
            match pair.split_once('=').unwrap() {
                ("expires", v) => expires = v.parse().unwrap(),
                ("signature", v) => signature = v.to_string(),
                _ => {}
            }
        }
        assert!(expires >= signing::now_unix() + 3599);
        assert!(storage.verify_signature("owner/song.mp3", expires, &signature));
        assert!(!storage.verify_signature("owner/other.mp3", expires, &signature));
    }
}
