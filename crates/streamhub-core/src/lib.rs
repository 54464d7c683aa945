//! StreamHub Core Library
//!
//! Domain models, error types, configuration and validation shared by the
//! storage, database and API crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::{Config, ProviderProfile};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
// Storage traits and errors live in the streamhub-storage crate
