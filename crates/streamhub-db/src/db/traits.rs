//! Repository traits consumed by the API services.

use async_trait::async_trait;
use streamhub_core::models::{
    MediaFilter, MediaRecord, MediaUpdate, NewMedia, NewUser, ProfileUpdate, User,
};
use streamhub_core::AppError;
use uuid::Uuid;

/// Media persistence contract.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Insert a new row; id and timestamps are assigned here.
    async fn create(&self, media: NewMedia) -> Result<MediaRecord, AppError>;

    /// Load one record with its owner's username.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError>;

    /// Public records matching `filter`, newest first, plus the total match count.
    async fn find_public(&self, filter: &MediaFilter)
        -> Result<(Vec<MediaRecord>, i64), AppError>;

    /// Apply an owner-issued update. `None` when no row matches id and owner.
    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &MediaUpdate,
    ) -> Result<Option<MediaRecord>, AppError>;

    /// Single conditional delete. Returns whether a row was removed.
    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<bool, AppError>;

    /// Atomic `view_count + 1`.
    async fn increment_view_count(&self, id: Uuid) -> Result<(), AppError>;

    /// Connectivity check for health probes.
    async fn ping(&self) -> Result<(), AppError>;
}

/// User persistence contract.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Apply a profile update. Duplicate username or email is `AppError::Conflict`.
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
