use crate::auth::jwt::JwtService;
use crate::auth::models::AuthUser;
use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use streamhub_core::AppError;
use streamhub_db::UserStore;

#[derive(Clone)]
pub struct AuthState {
    pub jwt: JwtService,
    pub user_repository: Arc<dyn UserStore>,
}

fn unauthorized(message: &str) -> Response {
    HttpAppError(AppError::Unauthorized(message.to_string())).into_response()
}

/// Require `Authorization: Bearer <jwt>` whose subject is an existing user.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
    {
        Some(h) => h,
        None => return unauthorized("Missing authorization header"),
    };

    if !auth_header.starts_with("Bearer ") {
        return unauthorized("Invalid authorization header format");
    }
    let token = &auth_header[7..];

    let claims = match auth_state.jwt.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => return HttpAppError(e).into_response(),
    };

    match auth_state.user_repository.find_by_id(claims.sub).await {
        Ok(Some(user)) => {
            tracing::debug!(user_id = %user.id, "Request authenticated");
            request.extensions_mut().insert(AuthUser {
                user_id: user.id,
                username: user.username,
            });
            next.run(request).await
        }
        Ok(None) => unauthorized("User no longer exists"),
        Err(e) => HttpAppError(e).into_response(),
    }
}
