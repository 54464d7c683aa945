//! Login, profile management and first-start host seeding.

use std::sync::Arc;

use streamhub_core::config::HostUserConfig;
use streamhub_core::models::{NewUser, ProfileUpdate, User};
use streamhub_core::AppError;
use streamhub_db::UserStore;
use tokio::sync::OnceCell;
use uuid::Uuid;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::JwtService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
/// Hashed once and verified against for unknown usernames.
const UNKNOWN_USER_PASSWORD: &str = "streamhub-unknown-user";

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserStore>,
    jwt: JwtService,
    unknown_user_hash: Arc<OnceCell<String>>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserStore>, jwt: JwtService) -> Self {
        Self {
            repository,
            jwt,
            unknown_user_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Check the password and issue a token. Unknown users and wrong passwords
    /// fail the same way, and both pay for a bcrypt verification.
    #[tracing::instrument(skip(self, password), fields(username = %username, operation = "login"))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, User), AppError> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            let hash = self
                .unknown_user_hash
                .get_or_try_init(|| hash_password(UNKNOWN_USER_PASSWORD))
                .await?;
            verify_password(password, hash).await?;
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token = self.jwt.create_token(user.id, &user.username)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok((token, user))
    }

    pub async fn get_profile(&self, user_id: Uuid) -> Result<User, AppError> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    #[tracing::instrument(skip(self, update), fields(user_id = %user_id, operation = "update_profile"))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        update.validate()?;

        if update.username.is_none() && update.email.is_none() {
            return self.get_profile(user_id).await;
        }

        self.repository
            .update_profile(user_id, &update)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    /// Create the configured host user when no user exists yet.
    ///
    /// Returns the created user, or `None` when seeding was skipped.
    pub async fn seed_host_user(&self, host: &HostUserConfig) -> Result<Option<User>, AppError> {
        let (Some(username), Some(password)) = (&host.username, &host.password) else {
            tracing::debug!("No host user configured, skipping seed");
            return Ok(None);
        };

        if self.repository.count().await? > 0 {
            tracing::debug!("Users already exist, skipping host seed");
            return Ok(None);
        }

        let email = host
            .email
            .clone()
            .unwrap_or_else(|| format!("{}@localhost", username));
        let password_hash = hash_password(password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: username.clone(),
                email,
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Host user created");
        Ok(Some(user))
    }
}
