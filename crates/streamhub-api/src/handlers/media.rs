use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::parse_media_id;
use crate::services::MediaUpload;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use streamhub_core::constants::{
    DEFAULT_CONTENT_TYPE, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, STREAM_URL_TTL_SECS,
};
use streamhub_core::models::{
    MediaListResponse, MediaMetadata, MediaResponse, MediaUpdate, Pagination,
};
use streamhub_core::AppError;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub media: MediaResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MediaEnvelope {
    pub media: MediaResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreamResponse {
    pub stream_url: String,
    pub media: MediaResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreamUrlResponse {
    pub stream_url: String,
    /// Seconds until the URL stops working
    pub expires_in: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Raw listing parameters. Values that do not parse fall back to the defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMediaQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub genre: Option<String>,
    pub search: Option<String>,
}

impl ListMediaQuery {
    fn page(&self) -> i64 {
        parse_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    fn limit(&self) -> i64 {
        parse_or(self.limit.as_deref(), DEFAULT_PAGE_SIZE)
    }
}

fn parse_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Boolean form values: 1/t/true and 0/f/false in any case.
fn parse_form_bool(field: &str, value: &str) -> Result<bool, AppError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        other => Err(AppError::InvalidInput(format!(
            "{} must be a boolean, got '{}'",
            field, other
        ))),
    }
}

struct UploadForm {
    data: Vec<u8>,
    filename: String,
    content_type: String,
    fields: HashMap<String, String>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut file: Option<(Vec<u8>, String, String)> = None;
    let mut fields = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == "file" {
            if file.is_some() {
                return Err(AppError::InvalidInput(
                    "Send exactly one field named 'file'".to_string(),
                ));
            }
            let filename = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_default();
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;
            file = Some((data.to_vec(), filename, content_type));
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read field: {}", e)))?;
            fields.insert(field_name, value);
        }
    }

    let (data, filename, content_type) =
        file.ok_or_else(|| AppError::InvalidInput("File is required".to_string()))?;

    Ok(UploadForm {
        data,
        filename,
        content_type,
        fields,
    })
}

#[utoipa::path(
    post,
    path = "/api/v1/media/upload",
    tag = "media",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Fields: file (required), title (required), description, genre, tags, is_public, duration"),
    responses(
        (status = 201, description = "Media uploaded successfully", body = UploadResponse),
        (status = 400, description = "Missing fields or unsupported file type", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, multipart), fields(user_id = %auth.user_id, operation = "upload_media"))]
pub async fn upload_media(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let mut form = read_upload_form(multipart).await?;
    let mut take = |name: &str| form.fields.remove(name).unwrap_or_default();

    let metadata = MediaMetadata {
        title: take("title"),
        description: take("description"),
        genre: take("genre"),
        tags: take("tags"),
        duration: match take("duration").trim() {
            "" => 0,
            raw => raw
                .parse::<i32>()
                .ok()
                .filter(|d| *d >= 0)
                .ok_or_else(|| {
                    AppError::InvalidInput("duration must be a non-negative integer".to_string())
                })?,
        },
    };
    let is_public = match take("is_public").trim() {
        "" => true,
        raw => parse_form_bool("is_public", raw)?,
    };

    let size = form.data.len() as i64;
    let upload = MediaUpload {
        reader: Box::pin(std::io::Cursor::new(form.data)),
        filename: form.filename,
        content_type: form.content_type,
        size,
    };

    let record = state
        .media
        .service
        .upload_media(upload, auth.user_id, metadata, is_public)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "Media uploaded successfully".to_string(),
            media: record.into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}",
    tag = "media",
    params(("id" = String, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media record", body = MediaEnvelope),
        (status = 400, description = "Invalid media ID", body = ErrorResponse),
        (status = 404, description = "Media not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_media"))]
pub async fn get_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_media_id(&id)?;
    let record = state.media.service.get_media(id).await?;
    Ok(Json(MediaEnvelope {
        media: record.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/media",
    tag = "media",
    params(ListMediaQuery),
    responses(
        (status = 200, description = "Public media, newest first", body = MediaListResponse),
        (status = 400, description = "Page or limit below 1", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_media"))]
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListMediaQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let page = query.page();
    let limit = query.limit();

    let (records, total) = state
        .media
        .service
        .list_public_media(page, limit, query.genre, query.search)
        .await?;

    Ok(Json(MediaListResponse {
        media: records.into_iter().map(MediaResponse::from).collect(),
        pagination: Pagination {
            page,
            limit: limit.min(MAX_PAGE_SIZE),
            total,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}/stream",
    tag = "media",
    params(("id" = String, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Presigned URL valid for one hour, with the record", body = StreamResponse),
        (status = 404, description = "Media not found", body = ErrorResponse),
        (status = 500, description = "Signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "stream_media"))]
pub async fn stream_media(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_media_id(&id)?;
    let (stream_url, record) = state.media.service.direct_stream_url(id).await?;
    Ok(Json(StreamResponse {
        stream_url,
        media: record.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}/stream-url",
    tag = "media",
    params(("id" = String, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Presigned URL valid for three hours", body = StreamUrlResponse),
        (status = 404, description = "Media not found", body = ErrorResponse),
        (status = 500, description = "Signing failed", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "stream_url"))]
pub async fn stream_url(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_media_id(&id)?;
    let stream_url = state.media.service.generate_stream_url(id).await?;
    Ok(Json(StreamUrlResponse {
        stream_url,
        expires_in: STREAM_URL_TTL_SECS,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/v1/media/{id}",
    tag = "media",
    params(("id" = String, Path, description = "Media ID")),
    request_body = MediaUpdate,
    responses(
        (status = 200, description = "Updated record", body = MediaEnvelope),
        (status = 400, description = "Invalid update", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Media not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state, update), fields(user_id = %auth.user_id, operation = "update_media"))]
pub async fn update_media(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(update): ValidatedJson<MediaUpdate>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_media_id(&id)?;
    let record = state
        .media
        .service
        .update_media(id, auth.user_id, update)
        .await?;
    Ok(Json(MediaEnvelope {
        media: record.into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    tag = "media",
    params(("id" = String, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media deleted successfully", body = MessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Media not found", body = ErrorResponse),
        (status = 500, description = "Storage or database failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(state), fields(user_id = %auth.user_id, operation = "delete_media"))]
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let id = parse_media_id(&id)?;
    state.media.service.delete_media(id, auth.user_id).await?;
    Ok(Json(MessageResponse {
        message: "Media deleted successfully".to_string(),
    }))
}
