//! Route configuration and setup.

use crate::auth::{auth_middleware, AuthState};
use crate::constants::{API_PREFIX, FILES_PREFIX};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use streamhub_core::Config;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = AuthState {
        jwt: state.jwt.clone(),
        user_repository: state.db.user_repository.clone(),
    };

    let protected = protected_routes().layer(axum::middleware::from_fn_with_state(
        Arc::new(auth_state),
        auth_middleware,
    ));

    let app = public_routes()
        .merge(protected)
        .route("/api/openapi.json", get(openapi_json))
        .nest(
            "/docs",
            utoipa_rapidoc::RapiDoc::new("/api/openapi.json")
                .path("/docs")
                .into(),
        )
        .layer(ConcurrencyLimitLayer::new(config.http_concurrency_limit()))
        .layer(RequestBodyLimitLayer::new(config.max_upload_size_bytes()))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            &format!("{}/auth/login", API_PREFIX),
            post(handlers::auth::login),
        )
        .route(
            &format!("{}/media", API_PREFIX),
            get(handlers::media::list_media),
        )
        .route(
            &format!("{}/media/{{id}}", API_PREFIX),
            get(handlers::media::get_media),
        )
        .route(
            &format!("{}/media/{{id}}/stream", API_PREFIX),
            get(handlers::media::stream_media),
        )
        .route(
            &format!("{}/media/{{id}}/stream-url", API_PREFIX),
            get(handlers::media::stream_url),
        )
        .route(
            &format!("{}/{{*key}}", FILES_PREFIX),
            get(handlers::files::get_signed_file),
        )
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/profile", API_PREFIX),
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route(
            &format!("{}/media/upload", API_PREFIX),
            post(handlers::media::upload_media),
        )
        .route(
            &format!("{}/media/{{id}}", API_PREFIX),
            axum::routing::patch(handlers::media::update_media)
                .delete(handlers::media::delete_media),
        )
}

async fn openapi_json() -> impl IntoResponse {
    Json(crate::api_doc::get_openapi_spec())
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
