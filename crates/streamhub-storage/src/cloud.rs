//! Shared upload/delete/presign plumbing for the `object_store` backed vendors.

use crate::traits::{ByteReader, StorageError, StorageResult};
use bytes::Bytes;
use http::Method;
use object_store::path::Path;
use object_store::signer::Signer;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::AsyncReadExt;

/// An object store plus its URL signer, labelled for logging.
#[derive(Clone)]
pub(crate) struct CloudObjectStore {
    store: Arc<dyn ObjectStore>,
    signer: Arc<dyn Signer>,
    vendor: &'static str,
    container: String,
}

impl CloudObjectStore {
    pub(crate) fn new<S>(store: Arc<S>, vendor: &'static str, container: String) -> Self
    where
        S: ObjectStore + Signer + 'static,
    {
        CloudObjectStore {
            store: store.clone(),
            signer: store,
            vendor,
            container,
        }
    }

    pub(crate) async fn put(
        &self,
        mut reader: ByteReader,
        key: &str,
        content_type: &str,
    ) -> StorageResult<u64> {
        let start = Instant::now();

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to read upload stream: {}", e))
        })?;
        let size = buffer.len() as u64;

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        let location = Path::from(key);
        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(Bytes::from(buffer)), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                vendor = self.vendor,
                container = %self.container,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            vendor = self.vendor,
            container = %self.container,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(size)
    }

    pub(crate) async fn delete(&self, key: &str) -> StorageResult<()> {
        let start = Instant::now();
        let location = Path::from(key);

        let result: ObjectResult<_> = self.store.delete(&location).await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                vendor = self.vendor,
                container = %self.container,
                key = %key,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object delete failed"
            );
            match e {
                object_store::Error::NotFound { .. } => StorageError::NotFound(key.to_string()),
                other => StorageError::DeleteFailed(other.to_string()),
            }
        })?;

        tracing::info!(
            vendor = self.vendor,
            container = %self.container,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object delete successful"
        );

        Ok(())
    }

    pub(crate) async fn signed_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> StorageResult<String> {
        let location = Path::from(key);
        let url_result: ObjectResult<_> = self
            .signer
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    vendor = self.vendor,
                    key = %key,
                    "Failed to sign URL"
                );
                StorageError::PresignFailed(e.to_string())
            })?
            .to_string();

        Ok(url)
    }
}
