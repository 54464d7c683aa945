use crate::cloud::CloudObjectStore;
use crate::traits::{ByteReader, StorageError, StorageProvider, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use object_store::aws::AmazonS3Builder;
use std::sync::Arc;
use std::time::Duration;
use streamhub_core::config::AwsConfig;

/// AWS S3 (and S3-compatible) storage provider
#[derive(Clone)]
pub struct S3Storage {
    inner: CloudObjectStore,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance.
    ///
    /// Explicit credentials win over the ambient AWS environment. `endpoint` selects
    /// an S3-compatible service (e.g. "http://localhost:9000" for MinIO).
    pub fn new(config: &AwsConfig) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(config.region.clone())
            .with_bucket_name(config.bucket.clone());

        if let (Some(key_id), Some(secret)) = (&config.access_key_id, &config.secret_access_key) {
            builder = builder
                .with_access_key_id(key_id.clone())
                .with_secret_access_key(secret.clone());
        }

        if let Some(ref endpoint) = config.endpoint {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            inner: CloudObjectStore::new(Arc::new(store), "s3", config.bucket.clone()),
            bucket: config.bucket.clone(),
            region: config.region.clone(),
            endpoint_url: config.endpoint.clone(),
        })
    }
}

/// `https://{bucket}.s3.{region}.amazonaws.com/{key}`, or path-style
/// `{endpoint}/{bucket}/{key}` for S3-compatible endpoints.
fn s3_url(bucket: &str, region: &str, endpoint: Option<&str>, key: &str) -> String {
    match endpoint {
        Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), bucket, key),
        None => format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key),
    }
}

#[async_trait]
impl StorageProvider for S3Storage {
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
        s3_url(&self.bucket, &self.region, self.endpoint_url.as_deref(), key)
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.inner.signed_get_url(key, expires_in).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Aws
    }
}
