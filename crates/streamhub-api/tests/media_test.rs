//! Media API tests over in-memory stores.
//!
//! Run with: `cargo test -p streamhub-api --test media_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{create_other_user, seed_host};
use helpers::{api_path, setup_test_app};
use serde_json::Value;
use streamhub_api::test_helpers::sample_record;

fn upload_form(filename: &str, title: &str) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from_static(b"ID3-fake-audio"))
        .file_name(filename.to_string())
        .mime_type("audio/mpeg");
    MultipartForm::new()
        .add_text("title", title.to_string())
        .add_text("genre", "jazz")
        .add_text("tags", "piano,late-night")
        .add_part("file", part)
}

#[tokio::test]
async fn test_upload_then_get_media() {
    let app = setup_test_app();
    let user = seed_host(&app, "host", "hunter22").await;

    let response = app
        .client()
        .post(&api_path("/media/upload"))
        .add_header("Authorization", user.bearer())
        .multipart(upload_form("song.mp3", "Test"))
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    assert_eq!(body["message"], "Media uploaded successfully");
    let media = &body["media"];
    assert_eq!(media["file_type"], "mp3");
    assert_eq!(media["view_count"], 0);
    assert_eq!(media["is_public"], true);
    assert_eq!(media["user_id"], user.user_id.to_string());
    assert_eq!(media["filename"], format!("{}/song.mp3", user.user_id));
    assert_eq!(app.storage.upload_calls(), 1);

    let id = media["id"].as_str().unwrap().to_string();
    let response = app.client().get(&api_path(&format!("/media/{}", id))).await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["media"]["id"], id);
}

#[tokio::test]
async fn test_upload_requires_auth() {
    let app = setup_test_app();
    let response = app
        .client()
        .post(&api_path("/media/upload"))
        .multipart(upload_form("song.mp3", "Test"))
        .await;
    assert_eq!(response.status_code(), 401);
    assert_eq!(app.storage.upload_calls(), 0);
}

#[tokio::test]
async fn test_upload_rejects_unsupported_type() {
    let app = setup_test_app();
    let user = seed_host(&app, "host", "hunter22").await;

    let response = app
        .client()
        .post(&api_path("/media/upload"))
        .add_header("Authorization", user.bearer())
        .multipart(upload_form("notes.txt", "Test"))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_FILE_TYPE");
    assert_eq!(app.storage.upload_calls(), 0);
}

#[tokio::test]
async fn test_upload_private_media_is_not_listed() {
    let app = setup_test_app();
    let user = seed_host(&app, "host", "hunter22").await;

    let form = upload_form("secret.mp4", "Hidden").add_text("is_public", "false");
    let response = app
        .client()
        .post(&api_path("/media/upload"))
        .add_header("Authorization", user.bearer())
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = app.client().get(&api_path("/media")).await.json();
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["media"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_list_media_falls_back_on_bad_paging() {
    let app = setup_test_app();
    for _ in 0..3 {
        app.media.insert(sample_record(uuid::Uuid::new_v4(), true));
    }

    let response = app
        .client()
        .get(&api_path("/media?page=abc&limit=xyz"))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["pagination"]["total"], 3);
}

#[tokio::test]
async fn test_list_media_huge_page_is_empty() {
    let app = setup_test_app();
    app.media.insert(sample_record(uuid::Uuid::new_v4(), true));

    let response = app
        .client()
        .get(&api_path("/media?page=9223372036854775807"))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["media"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total"], 1);
}

#[tokio::test]
async fn test_list_media_search_and_genre() {
    let app = setup_test_app();
    let owner = uuid::Uuid::new_v4();

    let mut jazz = sample_record(owner, true);
    jazz.title = "Jazz Mix".to_string();
    jazz.tags = "piano".to_string();
    jazz.genre = "jazz".to_string();
    app.media.insert(jazz);

    let mut rock = sample_record(owner, true);
    rock.title = "Loud".to_string();
    rock.genre = "rock".to_string();
    app.media.insert(rock);

    let body: Value = app
        .client()
        .get(&api_path("/media?search=PIANO"))
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["media"][0]["title"], "Jazz Mix");

    let body: Value = app
        .client()
        .get(&api_path("/media?genre=rock"))
        .await
        .json();
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["media"][0]["genre"], "rock");
}

#[tokio::test]
async fn test_get_media_invalid_and_missing_id() {
    let app = setup_test_app();

    let response = app.client().get(&api_path("/media/not-a-uuid")).await;
    assert_eq!(response.status_code(), 400);

    let response = app
        .client()
        .get(&api_path(&format!("/media/{}", uuid::Uuid::new_v4())))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_stream_endpoints_use_fixed_ttls() {
    let app = setup_test_app();
    let record = app.media.insert(sample_record(uuid::Uuid::new_v4(), true));

    let body: Value = app
        .client()
        .get(&api_path(&format!("/media/{}/stream", record.id)))
        .await
        .json();
    assert!(body["stream_url"].as_str().unwrap().ends_with("ttl=3600"));
    assert_eq!(body["media"]["id"], record.id.to_string());

    let body: Value = app
        .client()
        .get(&api_path(&format!("/media/{}/stream-url", record.id)))
        .await
        .json();
    assert!(body["stream_url"].as_str().unwrap().ends_with("ttl=10800"));
    assert_eq!(body["expires_in"], 10800);
}

#[tokio::test]
async fn test_delete_media_owner_only() {
    let app = setup_test_app();
    let owner = seed_host(&app, "host", "hunter22").await;
    let other = create_other_user(&app, "intruder").await;

    let record = app.media.insert(sample_record(owner.user_id, true));
    app.storage.put_object(&record.filename);
    let path = api_path(&format!("/media/{}", record.id));

    let response = app
        .client()
        .delete(&path)
        .add_header("Authorization", other.bearer())
        .await;
    assert_eq!(response.status_code(), 403);
    assert!(app.storage.has_object(&record.filename));
    assert!(app.media.get(record.id).is_some());

    let response = app
        .client()
        .delete(&path)
        .add_header("Authorization", owner.bearer())
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Media deleted successfully");
    assert!(!app.storage.has_object(&record.filename));
    assert!(app.media.get(record.id).is_none());

    let response = app
        .client()
        .delete(&path)
        .add_header("Authorization", owner.bearer())
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_delete_storage_failure_keeps_record() {
    let app = setup_test_app();
    let owner = seed_host(&app, "host", "hunter22").await;
    let record = app.media.insert(sample_record(owner.user_id, true));
    app.storage.fail_deletes();

    let response = app
        .client()
        .delete(&api_path(&format!("/media/{}", record.id)))
        .add_header("Authorization", owner.bearer())
        .await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");

    let response = app
        .client()
        .get(&api_path(&format!("/media/{}", record.id)))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_update_media() {
    let app = setup_test_app();
    let owner = seed_host(&app, "host", "hunter22").await;
    let record = app.media.insert(sample_record(owner.user_id, true));

    let response = app
        .client()
        .patch(&api_path(&format!("/media/{}", record.id)))
        .add_header("Authorization", owner.bearer())
        .json(&serde_json::json!({ "title": "Renamed", "is_public": false }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["media"]["title"], "Renamed");
    assert_eq!(body["media"]["is_public"], false);

    let response = app
        .client()
        .patch(&api_path(&format!("/media/{}", record.id)))
        .add_header("Authorization", owner.bearer())
        .json(&serde_json::json!({ "title": "" }))
        .await;
    assert_eq!(response.status_code(), 400);
}
