use super::TestApp;
use streamhub_core::config::HostUserConfig;
use uuid::Uuid;

/// Seeded user and a bearer token for it.
pub struct TestUser {
    pub user_id: Uuid,
    pub username: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Seed the host user (first user only) and issue a token without going through login.
pub async fn seed_host(app: &TestApp, username: &str, password: &str) -> TestUser {
    let user = app
        .state
        .users
        .seed_host_user(&HostUserConfig {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
            email: None,
        })
        .await
        .expect("Failed to seed host user")
        .expect("Host user already exists");

    let token = app
        .state
        .jwt
        .create_token(user.id, &user.username)
        .expect("Failed to sign token");

    TestUser {
        user_id: user.id,
        username: user.username,
        password: password.to_string(),
        token,
    }
}

/// A second account, inserted straight into the user store.
pub async fn create_other_user(app: &TestApp, username: &str) -> TestUser {
    use streamhub_core::models::NewUser;
    use streamhub_db::UserStore;

    let user = app
        .users
        .create(NewUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: "unused".to_string(),
        })
        .await
        .expect("Failed to create user");
    let token = app
        .state
        .jwt
        .create_token(user.id, &user.username)
        .expect("Failed to sign token");

    TestUser {
        user_id: user.id,
        username: user.username,
        password: String::new(),
        token,
    }
}
