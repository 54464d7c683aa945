use crate::cloud::CloudObjectStore;
use crate::traits::{ByteReader, StorageError, StorageProvider, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use object_store::gcp::GoogleCloudStorageBuilder;
use std::sync::Arc;
use std::time::Duration;
use streamhub_core::config::GcpConfig;

/// Google Cloud Storage provider
#[derive(Clone)]
pub struct GcsStorage {
    inner: CloudObjectStore,
    bucket: String,
}

impl GcsStorage {
    /// Credentials come from `credentials_file` when set, otherwise from the
    /// ambient Google environment. Signing URLs needs a service account key.
    pub fn new(config: &GcpConfig) -> StorageResult<Self> {
        let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(config.bucket.clone());

        if let Some(ref path) = config.credentials_file {
            builder = builder.with_service_account_path(path.clone());
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        tracing::debug!(
            bucket = %config.bucket,
            project_id = ?config.project_id,
            "GCS client built"
        );

        Ok(GcsStorage {
            inner: CloudObjectStore::new(Arc::new(store), "gcs", config.bucket.clone()),
            bucket: config.bucket.clone(),
        })
    }
}

#[async_trait]
impl StorageProvider for GcsStorage {
    async fn upload(
        &self,
        reader: ByteReader,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        self.inner.put(reader, key, content_type).await?;
        Ok(self.public_url(key))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://storage.googleapis.com/{}/{}", self.bucket, key)
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.inner.signed_get_url(key, expires_in).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcp
    }
}
