//! Application state shared across handlers.
//!
//! `AppState` is split into sub-states so handlers can take only what they need
//! via Axum's `FromRef`.

use crate::auth::JwtService;
use crate::services::{MediaService, UserService};
use std::sync::Arc;
use streamhub_core::Config;
use streamhub_db::{MediaStore, UserStore};
use streamhub_storage::{LocalStorage, StorageGateway};

/// Repositories, behind their traits so tests can substitute in-memory stores.
#[derive(Clone)]
pub struct DbState {
    pub media_repository: Arc<dyn MediaStore>,
    pub user_repository: Arc<dyn UserStore>,
}

#[derive(Clone)]
pub struct MediaState {
    pub service: MediaService,
    pub storage: StorageGateway,
    /// Set only when the local provider is active; backs the `/files` route.
    pub local_files: Option<LocalStorage>,
}

#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub media: MediaState,
    pub users: UserService,
    pub jwt: JwtService,
    pub config: Config,
}

impl AppState {
    pub fn new(
        config: Config,
        db: DbState,
        storage: StorageGateway,
        local_files: Option<LocalStorage>,
    ) -> Self {
        let jwt = JwtService::new(config.jwt_secret(), config.jwt_expiry_hours());
        let media = MediaState {
            service: MediaService::new(db.media_repository.clone(), storage.clone()),
            storage,
            local_files,
        };
        let users = UserService::new(db.user_repository.clone(), jwt.clone());

        Self {
            db,
            media,
            users,
            jwt,
            config,
        }
    }
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for MediaState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.media.clone()
    }
}
