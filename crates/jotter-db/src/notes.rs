//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use jotter_core::{
    CreateNoteRequest, Error, Note, NoteRepository, Result, UpdateNoteRequest,
};

const NOTE_COLUMNS: &str = "id, user_id, title, content, created_at, updated_at";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn note_from_row(row: &PgRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let rows = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let notes = rows.iter().map(note_from_row).collect::<Result<Vec<_>>>()?;
        debug!(
            subsystem = "database",
            component = "notes",
            op = "list",
            user_id = %user_id,
            result_count = notes.len(),
            "Listed notes"
        );
        Ok(notes)
    }

    async fn fetch(&self, user_id: Uuid, id: Uuid) -> Result<Note> {
        let row = sqlx::query(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NoteNotFound(id))?;

        note_from_row(&row)
    }

    async fn create(&self, user_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;

        let id = Uuid::now_v7();
        let now = Utc::now();
        let row = sqlx::query(&format!(
            "INSERT INTO notes (id, user_id, title, content, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            subsystem = "database",
            component = "notes",
            op = "create",
            user_id = %user_id,
            note_id = %id,
            "Created note"
        );
        note_from_row(&row)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        req.validate()?;

        let row = sqlx::query(&format!(
            "UPDATE notes SET title = $1, content = $2, updated_at = $3
             WHERE id = $4 AND user_id = $5
             RETURNING {NOTE_COLUMNS}"
        ))
        .bind(&req.title)
        .bind(&req.content)
        .bind(Utc::now())
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(Error::NoteNotFound(id))?;

        note_from_row(&row)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NoteNotFound(id));
        }

        debug!(
            subsystem = "database",
            component = "notes",
            op = "delete",
            user_id = %user_id,
            note_id = %id,
            "Deleted note"
        );
        Ok(())
    }
}
