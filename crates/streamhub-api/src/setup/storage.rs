//! Storage provider selection

use anyhow::{Context, Result};
use streamhub_core::{Config, ProviderProfile};
use streamhub_storage::{LocalStorage, StorageGateway};

/// Build the gateway for the configured provider.
///
/// With the local provider a second handle on the same directory is returned for
/// the signed `/files` route.
pub async fn setup_storage(config: &Config) -> Result<(StorageGateway, Option<LocalStorage>)> {
    let gateway = StorageGateway::from_config(config.storage())
        .await
        .context("Failed to initialize storage provider")?;

    let local_files = match config.storage().profile()? {
        ProviderProfile::Local(local) => Some(
            LocalStorage::new(
                local.base_path,
                local.base_url,
                local.signing_secret.into_bytes(),
            )
            .await
            .context("Failed to open local storage directory")?,
        ),
        _ => None,
    };

    tracing::info!(
        backend = %gateway.backend_type(),
        serves_files = local_files.is_some(),
        "Storage configured"
    );

    Ok((gateway, local_files))
}
