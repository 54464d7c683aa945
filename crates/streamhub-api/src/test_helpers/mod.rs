//! Test helpers for service and router tests
//!
//! In-memory implementations of the storage provider and repository traits,
//! with call counters and failure injection. No database or bucket is needed.

pub mod mock_repositories;
pub mod mock_storage;

pub use mock_repositories::{sample_record, MockMediaStore, MockUserStore};
pub use mock_storage::MockStorageProvider;
