use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use service::access::repository::CallerRepository;
use service::access::token::verify_token;
use service::comment::CommentService;
use service::geo::GeoService;
use service::upload::UploadService;

use crate::errors::JsonApiError;

pub const AUTH_COOKIE: &str = "auth_token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub auth: ServerAuthConfig,
    pub callers: Arc<dyn CallerRepository>,
    pub comments: Arc<CommentService>,
    pub geo: Arc<GeoService>,
    pub uploads: Arc<UploadService>,
}

/// Token from `Authorization: Bearer`, else from the `auth_token` cookie.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    if let Some(h) = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        return h.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty()).map(str::to_string);
    }
    let cookies = headers.get(header::COOKIE).and_then(|v| v.to_str().ok())?;
    cookies
        .split(';')
        .filter_map(|kv| kv.trim().strip_prefix(AUTH_COOKIE).and_then(|rest| rest.strip_prefix('=')))
        .find(|t| !t.is_empty())
        .map(str::to_string)
}

/// Resolve the bearer token into a `Caller` stored in request extensions.
///
/// Missing, malformed or expired tokens and unknown users are all 401.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = bearer_token(req.headers()) else {
        tracing::warn!(path = %path, "missing Authorization header and auth_token cookie");
        return Err(JsonApiError::unauthorized());
    };
    let user_id = verify_token(&state.auth.jwt_secret, &token).map_err(|e| {
        tracing::warn!(path = %path, err = %e, "token validation failed");
        JsonApiError::from(e)
    })?;
    let caller = state.callers.find_caller(user_id).await?.ok_or_else(|| {
        tracing::warn!(path = %path, user_id, "token subject not found");
        JsonApiError::unauthorized()
    })?;
    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn header_then_cookie() {
        let mut h = HeaderMap::new();
        h.insert(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token=from-cookie"));
        assert_eq!(bearer_token(&h).as_deref(), Some("from-cookie"));
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        assert_eq!(bearer_token(&h).as_deref(), Some("from-header"));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut h = HeaderMap::new();
        h.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        h.insert(header::COOKIE, HeaderValue::from_static("auth_token=x"));
        assert_eq!(bearer_token(&h), None);
    }
}
