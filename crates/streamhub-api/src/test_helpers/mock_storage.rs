//! Mock storage provider for testing
//!
//! Objects live in a `HashMap` keyed by storage key. URLs use a `mock://` scheme;
//! presigned URLs carry the requested TTL as `?ttl=<seconds>`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use streamhub_storage::{ByteReader, StorageBackend, StorageError, StorageProvider, StorageResult};
use tokio::io::AsyncReadExt;

#[derive(Default)]
pub struct MockStorageProvider {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    uploads: AtomicUsize,
    deletes: AtomicUsize,
    presigns: AtomicUsize,
    fail_upload: AtomicBool,
    fail_delete: AtomicBool,
    fail_presign: AtomicBool,
}

impl MockStorageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_uploads(&self) {
        self.fail_upload.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn fail_presigns(&self) {
        self.fail_presign.store(true, Ordering::SeqCst);
    }

    pub fn upload_calls(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    pub fn presign_calls(&self) -> usize {
        self.presigns.load(Ordering::SeqCst)
    }

    /// Seed an object without counting an upload.
    pub fn put_object(&self, key: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Vec::new());
    }

    pub fn has_object(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageProvider for MockStorageProvider {
    async fn upload(
        &self,
        mut reader: ByteReader,
        key: &str,
        _content_type: &str,
    ) -> StorageResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed("injected upload failure".into()));
        }

        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        self.objects.lock().unwrap().insert(key.to_string(), data);
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(StorageError::DeleteFailed("injected delete failure".into()));
        }

        match self.objects.lock().unwrap().remove(key) {
            Some(_) => Ok(()),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("mock://{}", key)
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.presigns.fetch_add(1, Ordering::SeqCst);
        if self.fail_presign.load(Ordering::SeqCst) {
            return Err(StorageError::PresignFailed("injected presign failure".into()));
        }
        Ok(format!("mock://{}?ttl={}", key, expires_in.as_secs()))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
