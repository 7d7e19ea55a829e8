//! Login, token refresh, logout, and session inspection.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{AppendHeaders, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use jotter_core::defaults::{ACCESS_COOKIE, REFRESH_COOKIE};
use jotter_core::{TokenKind, User};

use crate::auth::{read_cookie, Auth, RequireAuth};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    pub token: Option<String>,
}

fn user_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "username": user.display_name(),
        "email": user.email,
        "name": user.name,
        "picture": user.picture,
    })
}

/// Exchange a Google ID token for a session.
///
/// Creates the user on first login and sets both session cookies.
pub async fn google_auth(
    State(state): State<AppState>,
    body: Result<Json<GoogleAuthRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    // a missing or unreadable body is reported the same as a missing token
    let token = body
        .ok()
        .and_then(|Json(body)| body.token)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Token not provided".to_string()))?;

    let profile = state.identity.exchange_code_for_profile(&token).await?;
    let user = state.users.upsert_from_profile(&profile).await?;

    let access = state.tokens.issue_token(user.id, TokenKind::Access)?;
    let refresh = state.tokens.issue_token(user.id, TokenKind::Refresh)?;

    info!(
        subsystem = "api",
        component = "auth",
        op = "google_auth",
        user_id = %user.id,
        "Session started"
    );

    Ok((
        AppendHeaders([
            (SET_COOKIE, state.cookies.set(ACCESS_COOKIE, &access)?),
            (SET_COOKIE, state.cookies.set(REFRESH_COOKIE, &refresh)?),
        ]),
        Json(json!({ "user": user_json(&user) })),
    ))
}

/// Issue a new access token from the refresh cookie.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = read_cookie(&headers, REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Refresh token is missing".to_string()))?;

    let claims = state
        .tokens
        .verify_token(token)
        .ok()
        .filter(|claims| claims.kind == TokenKind::Refresh)
        .ok_or_else(|| ApiError::Unauthorized("Invalid refresh token".to_string()))?;

    let access = state.tokens.issue_token(claims.user_id, TokenKind::Access)?;
    debug!(
        subsystem = "api",
        component = "auth",
        op = "refresh",
        user_id = %claims.user_id,
        "Access token refreshed"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, state.cookies.set(ACCESS_COOKIE, &access)?)]),
        Json(json!({ "message": "Token refreshed" })),
    ))
}

/// Expire both session cookies.
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok((
        AppendHeaders([
            (SET_COOKIE, state.cookies.clear(ACCESS_COOKIE)?),
            (SET_COOKIE, state.cookies.clear(REFRESH_COOKIE)?),
        ]),
        Json(json!({ "message": "Logged out" })),
    ))
}

/// Report whether the request carries a valid access token.
pub async fn check(auth: Auth) -> impl IntoResponse {
    Json(json!({ "authenticated": auth.user_id.is_some() }))
}

/// Profile of the signed-in user.
pub async fn get_user(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.users.fetch(auth.user_id).await?;
    Ok(Json(user_json(&user)))
}
