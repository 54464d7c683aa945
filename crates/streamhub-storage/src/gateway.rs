//! The single entry point the rest of the system uses to reach storage.

use crate::factory::create_provider;
use crate::traits::{ByteReader, StorageProvider, StorageResult};
use crate::StorageBackend;
use std::sync::Arc;
use std::time::Duration;
use streamhub_core::config::StorageConfig;
use streamhub_core::AppError;

/// Wraps exactly one [`StorageProvider`], chosen once at startup.
#[derive(Clone)]
pub struct StorageGateway {
    provider: Arc<dyn StorageProvider>,
}

impl StorageGateway {
    /// Select and build the provider named by `config.provider`.
    ///
    /// Unknown provider names and provider construction failures are
    /// [`AppError::Configuration`]; callers treat them as fatal.
    pub async fn from_config(config: &StorageConfig) -> Result<Self, AppError> {
        let profile = config.profile()?;
        let provider = create_provider(&profile).await?;

        tracing::info!(provider = %provider.backend_type(), "Storage gateway initialized");

        Ok(StorageGateway { provider })
    }

    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        StorageGateway { provider }
    }

    pub async fn upload(
        &self,
        reader: ByteReader,
        key: &str,
        content_type: &str,
    ) -> StorageResult<String> {
        self.provider.upload(reader, key, content_type).await
    }

    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        self.provider.delete(key).await
    }

    pub fn public_url(&self, key: &str) -> String {
        self.provider.public_url(key)
    }

    pub async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.provider.presigned_url(key, expires_in).await
    }

    pub fn backend_type(&self) -> StorageBackend {
        self.provider.backend_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamhub_core::config::LocalConfig;

    fn local_config(dir: &std::path::Path, provider: &str) -> StorageConfig {
        StorageConfig {
            provider: provider.to_string(),
            local: LocalConfig {
                base_path: dir.display().to_string(),
                base_url: "http://localhost:8080/files".to_string(),
                signing_secret: "secret".to_string(),
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn unknown_provider_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StorageGateway::from_config(&local_config(dir.path(), "dropbox")).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn missing_bucket_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StorageGateway::from_config(&local_config(dir.path(), "aws")).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn gateway_delegates_to_selected_provider() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = StorageGateway::from_config(&local_config(dir.path(), "LOCAL"))
            .await
            .unwrap();
        assert_eq!(gateway.backend_type(), StorageBackend::Local);

        let url = gateway
            .upload(
                Box::pin(std::io::Cursor::new(b"abc".to_vec())),
                "owner/a.wav",
                "audio/wav",
            )
            .await
            .unwrap();
        assert_eq!(url, gateway.public_url("owner/a.wav"));
        assert!(dir.path().join("owner/a.wav").exists());

        gateway.delete("owner/a.wav").await.unwrap();
        assert!(gateway.delete("owner/a.wav").await.is_err());
    }
}
