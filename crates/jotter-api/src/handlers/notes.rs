//! Note CRUD handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use jotter_core::{CreateNoteRequest, UpdateNoteRequest};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiPath};
use crate::state::AppState;

/// The caller's notes, newest first.
pub async fn list_notes(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let notes = state.notes.list(auth.user_id).await?;
    Ok(Json(notes))
}

/// One of the caller's notes.
pub async fn get_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let note = state.notes.fetch(auth.user_id, id).await?;
    Ok(Json(note))
}

pub async fn create_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiJson(body): ApiJson<CreateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    body.validate()?;
    let note = state.notes.create(auth.user_id, body).await?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "create",
        user_id = %auth.user_id,
        note_id = %note.id,
        "Note created"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": note.id,
            "message": "Note created successfully",
            "note": note,
        })),
    ))
}

pub async fn update_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateNoteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    body.validate()?;
    let note = state.notes.update(auth.user_id, id, body).await?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "update",
        user_id = %auth.user_id,
        note_id = %id,
        "Note updated"
    );

    Ok(Json(json!({
        "message": "Note updated successfully",
        "note": note,
    })))
}

pub async fn delete_note(
    State(state): State<AppState>,
    auth: RequireAuth,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.notes.delete(auth.user_id, id).await?;

    info!(
        subsystem = "api",
        component = "notes",
        op = "delete",
        user_id = %auth.user_id,
        note_id = %id,
        "Note deleted"
    );

    Ok(Json(json!({ "message": "Note deleted successfully" })))
}
