//! Note search.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use jotter_search::{NoteFilter, SearchMode};

use crate::auth::RequireAuth;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    /// `"true"` (any case) selects strict substring search.
    pub strict: Option<String>,
}

/// Search the caller's notes by title and content.
///
/// An empty `q` returns every note.
pub async fn search_notes(
    State(state): State<AppState>,
    auth: RequireAuth,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let start = Instant::now();
    let mode = SearchMode::from_strict_flag(query.strict.as_deref());

    let notes = state.notes.list(auth.user_id).await?;
    let candidate_count = notes.len();
    let results = NoteFilter::new(mode, state.matcher).filter(notes, &query.q);

    info!(
        subsystem = "api",
        component = "search",
        op = "search_notes",
        user_id = %auth.user_id,
        search_mode = mode.as_str(),
        candidate_count,
        result_count = results.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Search completed"
    );

    Ok(Json(results))
}
