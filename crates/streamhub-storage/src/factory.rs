#[cfg(feature = "storage-cloud")]
use crate::{AzureBlobStorage, GcsStorage, S3Storage};
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{StorageError, StorageProvider, StorageResult};
use std::sync::Arc;
use streamhub_core::ProviderProfile;

/// Create the storage provider for the selected vendor profile.
pub async fn create_provider(profile: &ProviderProfile) -> StorageResult<Arc<dyn StorageProvider>> {
    match profile {
        #[cfg(feature = "storage-cloud")]
        ProviderProfile::Aws(config) => Ok(Arc::new(S3Storage::new(config)?)),

        #[cfg(feature = "storage-cloud")]
        ProviderProfile::Gcp(config) => Ok(Arc::new(GcsStorage::new(config)?)),

        #[cfg(feature = "storage-cloud")]
        ProviderProfile::Azure(config) => Ok(Arc::new(AzureBlobStorage::new(config)?)),

        #[cfg(not(feature = "storage-cloud"))]
        ProviderProfile::Aws(_) | ProviderProfile::Gcp(_) | ProviderProfile::Azure(_) => {
            Err(StorageError::ConfigError(format!(
                "{} storage provider not available (storage-cloud feature not enabled)",
                profile.backend()
            )))
        }

        #[cfg(feature = "storage-local")]
        ProviderProfile::Local(config) => {
            if config.signing_secret.is_empty() {
                return Err(StorageError::ConfigError(
                    "local storage requires a signing secret".to_string(),
                ));
            }
            let storage = LocalStorage::new(
                config.base_path.clone(),
                config.base_url.clone(),
                config.signing_secret.as_bytes(),
            )
            .await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        ProviderProfile::Local(_) => Err(StorageError::ConfigError(
            "Local storage provider not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
