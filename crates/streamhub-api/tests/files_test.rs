//! Local provider round trip: upload over HTTP, fetch through the signed `/files` route.
//!
//! Run with: `cargo test -p streamhub-api --test files_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use helpers::{api_path, test_config};
use serde_json::Value;
use std::sync::Arc;
use streamhub_api::setup::routes;
use streamhub_api::state::{AppState, DbState};
use streamhub_api::test_helpers::{MockMediaStore, MockUserStore};
use streamhub_core::config::HostUserConfig;
use streamhub_storage::{LocalStorage, StorageGateway};
use tempfile::TempDir;

const BASE_URL: &str = "http://localhost:8080/files";

struct LocalApp {
    server: TestServer,
    state: Arc<AppState>,
    _temp_dir: TempDir,
}

async fn setup_local_app() -> LocalApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let local = LocalStorage::new(
        temp_dir.path().to_path_buf(),
        BASE_URL.to_string(),
        helpers::TEST_JWT_SECRET,
    )
    .await
    .expect("Failed to create local storage");

    let config = test_config();
    let db = DbState {
        media_repository: Arc::new(MockMediaStore::new()),
        user_repository: Arc::new(MockUserStore::new()),
    };
    let state = Arc::new(AppState::new(
        config.clone(),
        db,
        StorageGateway::new(Arc::new(local.clone())),
        Some(local),
    ));
    let router = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");

    LocalApp {
        server: TestServer::new(router).expect("Failed to start test server"),
        state,
        _temp_dir: temp_dir,
    }
}

/// Upload `clip.mp4` as a fresh host user and return the media id.
async fn upload_clip(app: &LocalApp, payload: &'static [u8]) -> String {
    let user = app
        .state
        .users
        .seed_host_user(&HostUserConfig {
            username: Some("host".to_string()),
            password: Some("hunter22".to_string()),
            email: None,
        })
        .await
        .unwrap()
        .unwrap();
    let token = app.state.jwt.create_token(user.id, &user.username).unwrap();

    let form = MultipartForm::new().add_text("title", "Clip").add_part(
        "file",
        Part::bytes(bytes::Bytes::from_static(payload))
            .file_name("clip.mp4")
            .mime_type("video/mp4"),
    );
    let response = app
        .server
        .post(&api_path("/media/upload"))
        .add_header("Authorization", format!("Bearer {}", token))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    body["media"]["id"].as_str().unwrap().to_string()
}

fn strip_base(url: &str) -> String {
    url.strip_prefix("http://localhost:8080")
        .expect("presigned URL outside the local base")
        .to_string()
}

#[tokio::test]
async fn test_signed_url_serves_uploaded_bytes() {
    let app = setup_local_app().await;
    let id = upload_clip(&app, b"fake-mp4-bytes").await;

    let body: Value = app
        .server
        .get(&api_path(&format!("/media/{}/stream-url", id)))
        .await
        .json();
    let path = strip_base(body["stream_url"].as_str().unwrap());
    assert!(path.starts_with("/files/"));

    let response = app.server.get(&path).await;
    assert_eq!(response.status_code(), 200);
    assert_eq!(response.header("content-type"), "video/mp4");
    assert_eq!(&response.as_bytes()[..], b"fake-mp4-bytes");
}

#[tokio::test]
async fn test_signed_url_rejects_tampering() {
    let app = setup_local_app().await;
    let id = upload_clip(&app, b"fake-mp4-bytes").await;

    let body: Value = app
        .server
        .get(&api_path(&format!("/media/{}/stream", id)))
        .await
        .json();
    let path = strip_base(body["stream_url"].as_str().unwrap());
    let unsigned = path.split('?').next().unwrap().to_string();

    let response = app.server.get(&unsigned).await;
    assert_eq!(response.status_code(), 403);

    let tampered = path.replace("signature=", "signature=00");
    let response = app.server.get(&tampered).await;
    assert_eq!(response.status_code(), 403);
}
