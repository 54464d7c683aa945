//! Mock repository implementations for testing
//!
//! These follow the PostgreSQL repositories' observable behavior: public listings
//! are ordered newest first, deletes are conditional on the owner and profile
//! updates reject duplicate usernames and emails.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use streamhub_core::models::{
    MediaFilter, MediaRecord, MediaUpdate, NewMedia, NewUser, ProfileUpdate, User,
};
use streamhub_core::AppError;
use streamhub_db::{MediaStore, UserStore};
use uuid::Uuid;

fn injected_failure() -> AppError {
    AppError::Database(sqlx::Error::PoolClosed)
}

/// A public or private record owned by `owner_id`, stored under `{owner_id}/{id}.mp3`.
pub fn sample_record(owner_id: Uuid, is_public: bool) -> MediaRecord {
    let id = Uuid::new_v4();
    let now = Utc::now();
    MediaRecord {
        id,
        title: "Sample".to_string(),
        description: "Sample description".to_string(),
        filename: format!("{}/{}.mp3", owner_id, id),
        file_size: 1024,
        file_type: "mp3".to_string(),
        genre: "ambient".to_string(),
        tags: "sample".to_string(),
        duration: 0,
        storage_url: format!("mock://{}/{}.mp3", owner_id, id),
        thumbnail_url: None,
        is_public,
        view_count: 0,
        user_id: owner_id,
        created_at: now,
        updated_at: now,
        owner_username: None,
    }
}

/// Mock media repository for testing without database
#[derive(Clone, Default)]
pub struct MockMediaStore {
    media: Arc<Mutex<HashMap<Uuid, MediaRecord>>>,
    fail_create: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
    fail_increment: Arc<AtomicBool>,
    fail_ping: Arc<AtomicBool>,
    concurrent_delete: Arc<AtomicBool>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, record: MediaRecord) -> MediaRecord {
        self.media
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        record
    }

    pub fn get(&self, id: Uuid) -> Option<MediaRecord> {
        self.media.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.media.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fail_creates(&self) {
        self.fail_create.store(true, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self) {
        self.fail_delete.store(true, Ordering::SeqCst);
    }

    pub fn fail_increments(&self) {
        self.fail_increment.store(true, Ordering::SeqCst);
    }

    pub fn fail_pings(&self) {
        self.fail_ping.store(true, Ordering::SeqCst);
    }

    /// Make the next record delete find its row already gone, as if another
    /// request deleted it first.
    pub fn race_next_delete(&self) {
        self.concurrent_delete.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn create(&self, media: NewMedia) -> Result<MediaRecord, AppError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        let now = Utc::now();
        let record = MediaRecord {
            id: Uuid::new_v4(),
            title: media.title,
            description: media.description,
            filename: media.filename,
            file_size: media.file_size,
            file_type: media.file_type,
            genre: media.genre,
            tags: media.tags,
            duration: media.duration,
            storage_url: media.storage_url,
            thumbnail_url: media.thumbnail_url,
            is_public: media.is_public,
            view_count: 0,
            user_id: media.user_id,
            created_at: now,
            updated_at: now,
            owner_username: None,
        };
        Ok(self.insert(record))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError> {
        Ok(self.get(id))
    }

    async fn find_public(
        &self,
        filter: &MediaFilter,
    ) -> Result<(Vec<MediaRecord>, i64), AppError> {
        let mut matches: Vec<MediaRecord> = self
            .media
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.is_public && filter.matches_genre(r) && filter.matches_search(r))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matches.len() as i64;
        let page = matches
            .into_iter()
            .skip(usize::try_from(filter.offset()).unwrap_or(usize::MAX))
            .take(filter.limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        update: &MediaUpdate,
    ) -> Result<Option<MediaRecord>, AppError> {
        let mut media = self.media.lock().unwrap();
        let Some(record) = media.get_mut(&id).filter(|r| r.user_id == owner_id) else {
            return Ok(None);
        };
        if let Some(title) = &update.title {
            record.title = title.clone();
        }
        if let Some(description) = &update.description {
            record.description = description.clone();
        }
        if let Some(genre) = &update.genre {
            record.genre = genre.clone();
        }
        if let Some(tags) = &update.tags {
            record.tags = tags.clone();
        }
        if let Some(thumbnail_url) = &update.thumbnail_url {
            record.thumbnail_url = Some(thumbnail_url.clone());
        }
        if let Some(is_public) = update.is_public {
            record.is_public = is_public;
        }
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        let mut media = self.media.lock().unwrap();
        if self.concurrent_delete.swap(false, Ordering::SeqCst) {
            media.remove(&id);
        }
        if media.get(&id).is_some_and(|r| r.user_id == owner_id) {
            media.remove(&id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<(), AppError> {
        if self.fail_increment.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        if let Some(record) = self.media.lock().unwrap().get_mut(&id) {
            record.view_count += 1;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(injected_failure());
        }
        Ok(())
    }
}

/// Mock user repository for testing without database
#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl MockUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) -> User {
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    fn taken(&self, except: Uuid, username: Option<&str>, email: Option<&str>) -> bool {
        self.users.lock().unwrap().values().any(|u| {
            u.id != except
                && (username.is_some_and(|n| n == u.username)
                    || email.is_some_and(|e| e == u.email))
        })
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        if self.taken(Uuid::nil(), Some(&user.username), Some(&user.email)) {
            return Err(AppError::Conflict(
                "username or email already in use".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(self.insert(User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, AppError> {
        if self.taken(id, update.username.as_deref(), update.email.as_deref()) {
            return Err(AppError::Conflict(
                "username or email already in use".to_string(),
            ));
        }
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(username) = &update.username {
            user.username = username.clone();
        }
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}
