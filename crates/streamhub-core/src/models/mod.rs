pub mod media;
pub mod user;

pub use media::{
    MediaFilter, MediaListResponse, MediaMetadata, MediaRecord, MediaResponse, MediaUpdate,
    NewMedia, Pagination,
};
pub use user::{NewUser, ProfileUpdate, User, UserResponse};

/// Timestamp layout used in every JSON response (`2024-01-31T12:00:00Z`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
