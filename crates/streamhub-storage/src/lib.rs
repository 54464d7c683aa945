//! StreamHub Storage Library
//!
//! Storage provider abstraction plus one adapter per vendor: AWS S3, Google Cloud
//! Storage, Azure Blob Storage and the local filesystem. The rest of the system
//! talks to storage only through [`StorageGateway`], which wraps the single provider
//! selected at startup.
//!
//! # Storage key format
//!
//! Keys are namespaced by owner: `{owner_id}/{filename}`. Key generation lives in
//! the `keys` module so every caller builds them the same way.

#[cfg(feature = "storage-cloud")]
pub mod azure;
#[cfg(feature = "storage-cloud")]
mod cloud;
pub mod factory;
pub mod gateway;
#[cfg(feature = "storage-cloud")]
pub mod gcs;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-cloud")]
pub mod s3;
pub mod signing;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-cloud")]
pub use azure::AzureBlobStorage;
pub use factory::create_provider;
pub use gateway::StorageGateway;
#[cfg(feature = "storage-cloud")]
pub use gcs::GcsStorage;
pub use keys::media_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-cloud")]
pub use s3::S3Storage;
pub use streamhub_core::StorageBackend;
pub use traits::{ByteReader, StorageError, StorageProvider, StorageResult};
