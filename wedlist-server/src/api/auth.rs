//! Caller identity
//!
//! Authentication happens upstream; this service trusts the `X-User-Id`
//! header (plus optional `X-User-Email`, `X-User-First-Name` and
//! `X-User-Last-Name`). [`require_user`] rejects requests without it, upserts
//! the user row and stores a [`CurrentUser`] extension for the handlers.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    routing::get,
    Extension, Json, Router,
};
use tracing::debug;
use wedlist_common::db::{User, UserIdentity};
use wedlist_common::Error;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";
pub const USER_FIRST_NAME_HEADER: &str = "x-user-first-name";
pub const USER_LAST_NAME_HEADER: &str = "x-user-last-name";

/// Authenticated caller, inserted by [`require_user`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

/// Read the identity headers; `None` when `X-User-Id` is absent or blank
pub fn identity_from_headers(headers: &HeaderMap) -> Option<UserIdentity> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    Some(UserIdentity {
        id: header(USER_ID_HEADER)?,
        email: header(USER_EMAIL_HEADER),
        first_name: header(USER_FIRST_NAME_HEADER),
        last_name: header(USER_LAST_NAME_HEADER),
    })
}

/// Middleware guarding every owner-scoped route
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = identity_from_headers(request.headers()).ok_or_else(|| {
        debug!("Rejected {} {}: no caller identity", request.method(), request.uri().path());
        Error::Unauthorized("Unauthorized".to_string())
    })?;

    let user = state.repo.upsert_user(&identity).await?;
    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// GET /api/auth/user
pub async fn current_user(Extension(user): Extension<CurrentUser>) -> ApiResult<Json<User>> {
    Ok(Json(user.0))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/auth/user", get(current_user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_identity_requires_user_id() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_EMAIL_HEADER, HeaderValue::from_static("a@example.com"));
        assert!(identity_from_headers(&headers).is_none());

        headers.insert(USER_ID_HEADER, HeaderValue::from_static("   "));
        assert!(identity_from_headers(&headers).is_none());
    }

    #[test]
    fn test_identity_reads_optional_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("user-1"));
        headers.insert(USER_FIRST_NAME_HEADER, HeaderValue::from_static("Sarah"));

        let identity = identity_from_headers(&headers).unwrap();
        assert_eq!(identity.id, "user-1");
        assert_eq!(identity.first_name.as_deref(), Some("Sarah"));
        assert_eq!(identity.email, None);
    }
}
