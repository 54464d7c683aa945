//! Signed file route for the local provider.
//!
//! Presigned URLs issued by the local provider point here. The signature and
//! expiry are checked before anything is read from disk.

use crate::error::HttpAppError;
use crate::state::MediaState;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::Response,
};
use serde::Deserialize;
use streamhub_core::constants::DEFAULT_CONTENT_TYPE;
use streamhub_core::validation::file_extension;
use streamhub_core::AppError;
use tokio_util::io::ReaderStream;

#[derive(Debug, Deserialize)]
pub struct SignedFileQuery {
    pub expires: Option<u64>,
    pub signature: Option<String>,
}

fn content_type_for(key: &str) -> &'static str {
    match file_extension(key).map(|e| e.to_lowercase()).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

#[tracing::instrument(skip(media, query), fields(key = %key, operation = "get_signed_file"))]
pub async fn get_signed_file(
    State(media): State<MediaState>,
    Path(key): Path<String>,
    Query(query): Query<SignedFileQuery>,
) -> Result<Response, HttpAppError> {
    let local = media
        .local_files
        .as_ref()
        .ok_or_else(|| AppError::NotFound("File not found".to_string()))?;

    let (Some(expires), Some(signature)) = (query.expires, query.signature.as_deref()) else {
        return Err(AppError::AccessDenied("Missing URL signature".to_string()).into());
    };
    if !local.verify_signature(&key, expires, signature) {
        return Err(AppError::AccessDenied("Invalid or expired URL signature".to_string()).into());
    }

    let path = local
        .key_to_path(&key)
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;
    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::NotFound("File not found".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type_for(&key))
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build response");
            HttpAppError::from(AppError::Internal(e.to_string()))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("u/song.MP3"), "audio/mpeg");
        assert_eq!(content_type_for("u/clip.mkv"), "video/x-matroska");
        assert_eq!(content_type_for("u/blob"), DEFAULT_CONTENT_TYPE);
    }
}
