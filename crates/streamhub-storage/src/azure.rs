use crate::cloud::CloudObjectStore;
use crate::traits::{ByteReader, StorageError, StorageProvider, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use object_store::azure::MicrosoftAzureBuilder;
use std::sync::Arc;
use std::time::Duration;
use streamhub_core::config::AzureConfig;

/// Azure Blob Storage provider
#[derive(Clone)]
pub struct AzureBlobStorage {
    inner: CloudObjectStore,
    account: String,
    container: String,
}

impl AzureBlobStorage {
    pub fn new(config: &AzureConfig) -> StorageResult<Self> {
        let mut builder = MicrosoftAzureBuilder::from_env()
            .with_account(config.account_name.clone())
            .with_container_name(config.container.clone());

        if let Some(ref key) = config.account_key {
            builder = builder.with_access_key(key.clone());
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(AzureBlobStorage {
            inner: CloudObjectStore::new(Arc::new(store), "azure", config.container.clone()),
            account: config.account_name.clone(),
            container: config.container.clone(),
        })
    }
}

#[async_trait]
impl StorageProvider for AzureBlobStorage {
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
        format!(
            "https://{}.blob.core.windows.net/{}/{}",
            self.account, self.container, key
        )
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.inner.signed_get_url(key, expires_in).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Azure
    }
}
