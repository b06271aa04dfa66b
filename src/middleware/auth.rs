use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::auth::{TokenAuthority, TokenClaims};
use crate::error::ApiError;

/// The admin identity proven by a valid bearer token
#[derive(Clone, Debug, Serialize)]
pub struct AdminSession {
    pub username: String,
    pub expires_at: i64,
}

impl From<TokenClaims> for AdminSession {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.username,
            expires_at: claims.expires_at,
        }
    }
}

/// Methods that change state and therefore need a token
pub fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::DELETE)
}

/// Auth stage of the request gate. POST/PUT/DELETE must carry a valid
/// `Authorization: Bearer <token>`; everything else passes straight through.
pub async fn require_admin_middleware(
    State(authority): State<Arc<TokenAuthority>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !is_mutating(request.method()) {
        return next.run(request).await;
    }

    match authenticate_headers(&authority, request.headers()) {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(err) => {
            tracing::warn!(
                "Rejected {} {}: {}",
                request.method(),
                request.uri().path(),
                err.message()
            );
            err.into_response()
        }
    }
}

/// Handlers that need the admin identity outside the gate (e.g. a GET)
/// extract it directly; the same header rules apply.
#[async_trait]
impl<S> FromRequestParts<S> for AdminSession
where
    Arc<TokenAuthority>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AdminSession>() {
            return Ok(session.clone());
        }
        let authority = Arc::<TokenAuthority>::from_ref(state);
        authenticate_headers(&authority, &parts.headers)
    }
}

fn authenticate_headers(
    authority: &TokenAuthority,
    headers: &HeaderMap,
) -> Result<AdminSession, ApiError> {
    let token = extract_bearer_token(headers).ok_or_else(ApiError::unauthorized)?;
    let claims = authority.verify(token)?;
    Ok(claims.into())
}

/// Exact `Bearer <token>` form only; any other shape yields `None`.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(extract_bearer_token(&headers("bearer abc.def")), None);
        assert_eq!(extract_bearer_token(&headers("Token abc.def")), None);
        assert_eq!(extract_bearer_token(&headers("abc.def")), None);
        assert_eq!(extract_bearer_token(&headers("Bearer ")), None);
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn only_writes_are_gated() {
        assert!(is_mutating(&Method::POST));
        assert!(is_mutating(&Method::PUT));
        assert!(is_mutating(&Method::DELETE));
        assert!(!is_mutating(&Method::GET));
        assert!(!is_mutating(&Method::OPTIONS));
        assert!(!is_mutating(&Method::HEAD));
    }
}
