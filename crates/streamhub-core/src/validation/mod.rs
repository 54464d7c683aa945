//! Validation modules

pub mod media;

pub use media::{file_extension, storage_filename, validate_media_extension, validate_title};
