//! OpenAPI documentation.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use streamhub_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "StreamHub API",
        version = "0.1.0",
        description = "Media hosting API: upload audio and video to the configured storage provider, browse public media and hand out time-limited streaming URLs. All endpoints are versioned under /api/v1/."
    ),
    paths(
        handlers::health::health_check,
        handlers::auth::login,
        handlers::profile::get_profile,
        handlers::profile::update_profile,
        handlers::media::upload_media,
        handlers::media::list_media,
        handlers::media::get_media,
        handlers::media::stream_media,
        handlers::media::stream_url,
        handlers::media::update_media,
        handlers::media::delete_media,
    ),
    components(
        schemas(
            models::MediaResponse,
            models::MediaListResponse,
            models::MediaUpdate,
            models::Pagination,
            models::ProfileUpdate,
            models::UserResponse,
            handlers::auth::LoginRequest,
            handlers::auth::LoginResponse,
            handlers::profile::ProfileResponse,
            handlers::media::UploadResponse,
            handlers::media::MediaEnvelope,
            handlers::media::StreamResponse,
            handlers::media::StreamUrlResponse,
            handlers::media::MessageResponse,
            handlers::health::HealthResponse,
            error::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness and dependency checks"),
        (name = "auth", description = "Login"),
        (name = "profile", description = "Current user profile"),
        (name = "media", description = "Upload, browse, stream and delete media"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
