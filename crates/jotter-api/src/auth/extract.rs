//! Request extractors for authenticated handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{header, HeaderMap};
use uuid::Uuid;

use jotter_core::defaults::ACCESS_COOKIE;
use jotter_core::TokenKind;

use super::cookies::read_cookie;
use crate::error::ApiError;
use crate::state::AppState;

/// Access token from the `auth_token` cookie, or a `Bearer` header.
fn access_token(headers: &HeaderMap) -> Option<&str> {
    read_cookie(headers, ACCESS_COOKIE).or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

fn authenticate(headers: &HeaderMap, state: &AppState) -> Result<Uuid, ApiError> {
    let token = access_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Token is missing".to_string()))?;

    let claims = state.tokens.verify_token(token)?;
    if claims.kind != TokenKind::Access {
        return Err(ApiError::Unauthorized("Token is invalid".to_string()));
    }
    Ok(claims.user_id)
}

/// Optional authentication.
///
/// Never rejects; `user_id` is `None` when no valid access token was sent.
#[derive(Debug, Clone, Copy)]
pub struct Auth {
    pub user_id: Option<Uuid>,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Auth {
            user_id: authenticate(&parts.headers, state).ok(),
        })
    }
}

/// Extractor that requires a valid access token.
#[derive(Debug, Clone, Copy)]
pub struct RequireAuth {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = authenticate(&parts.headers, state)?;
        Ok(RequireAuth { user_id })
    }
}
