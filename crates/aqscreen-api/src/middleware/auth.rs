use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use aqscreen_core::models::user::UserId;

use crate::error::ApiError;

/// Bearer token middleware.
///
/// The token is the caller's stable user id as issued by the identity
/// provider. On success, inserts `AuthUser` into request extensions for
/// handlers to use.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let user_id = bearer_user(req.headers())?;
    req.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(req).await)
}

fn bearer_user(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    UserId::parse(token).map_err(|_| ApiError::Unauthorized("invalid bearer token".to_string()))
}

/// Authenticated caller.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
}
