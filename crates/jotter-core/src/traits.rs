//! Core traits for jotter abstractions.
//!
//! These traits define the capabilities the HTTP layer consumes, so storage,
//! identity, and token backends can be swapped out in tests.

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use crate::defaults::{CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
use crate::error::{Error, Result};
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Request for creating a new note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Request for replacing a note's title and content.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: String,
    pub content: String,
}

/// Check title and content against the note limits.
pub fn validate_note_fields(title: &str, content: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::InvalidInput("Title is required".to_string()));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Title exceeds {} characters",
            TITLE_MAX_CHARS
        )));
    }
    if content.chars().count() > CONTENT_MAX_CHARS {
        return Err(Error::InvalidInput(format!(
            "Content exceeds {} characters",
            CONTENT_MAX_CHARS
        )));
    }
    Ok(())
}

impl CreateNoteRequest {
    pub fn validate(&self) -> Result<()> {
        validate_note_fields(&self.title, &self.content)
    }
}

impl UpdateNoteRequest {
    pub fn validate(&self) -> Result<()> {
        validate_note_fields(&self.title, &self.content)
    }
}

/// Repository for note CRUD operations.
///
/// Every operation is scoped by the owning user: a note belonging to another
/// user behaves exactly like a missing one.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List the user's notes, newest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<Note>>;

    /// Fetch a single note.
    async fn fetch(&self, user_id: Uuid, id: Uuid) -> Result<Note>;

    /// Insert a new note and return it.
    async fn create(&self, user_id: Uuid, req: CreateNoteRequest) -> Result<Note>;

    /// Replace title and content of an existing note.
    async fn update(&self, user_id: Uuid, id: Uuid, req: UpdateNoteRequest) -> Result<Note>;

    /// Permanently delete a note.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()>;
}

// =============================================================================
// USER REPOSITORY TRAITS
// =============================================================================

/// Repository for users created through external login.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create the user on first login, otherwise refresh the stored profile
    /// and last-login timestamp.
    async fn upsert_from_profile(&self, profile: &UserProfile) -> Result<User>;

    /// Fetch a user by id.
    async fn fetch(&self, id: Uuid) -> Result<User>;
}

// =============================================================================
// AUTH CAPABILITIES
// =============================================================================

/// External identity provider (e.g. Google Sign-In).
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange a provider-issued credential for the user's profile.
    ///
    /// Returns `Error::Unauthorized` when the credential is rejected.
    async fn exchange_code_for_profile(&self, code: &str) -> Result<UserProfile>;
}

/// Issues and verifies the service's own session tokens.
pub trait TokenIssuer: Send + Sync {
    fn issue_token(&self, user_id: Uuid, kind: TokenKind) -> Result<String>;

    /// Returns `Error::Unauthorized` for malformed, forged, or expired tokens.
    fn verify_token(&self, token: &str) -> Result<Claims>;
}
