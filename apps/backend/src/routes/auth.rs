//! Authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::AppState;

/// Authenticated user info stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub token: String,
}

/// Auth middleware. Resolves the bearer token to a user (touching
/// last_seen_at in the same query) and stores it in request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    if is_public(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())?.to_string();

    let user = state
        .db
        .touch_user_by_token(&token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        token,
    });

    Ok(next.run(request).await)
}

/// Routes reachable without a token.
fn is_public(path: &str) -> bool {
    matches!(path, "/health" | "/api/users/register")
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization format".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn public_paths_skip_auth() {
        assert!(is_public("/health"));
        assert!(is_public("/api/users/register"));
        assert!(!is_public("/api/flashcards/due"));
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with("Bearer abc-123");
        assert_eq!(bearer_token(&headers).unwrap(), "abc-123");
    }

    #[test]
    fn rejects_missing_header() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with("Basic abc-123");
        assert!(bearer_token(&headers).is_err());
    }
}
