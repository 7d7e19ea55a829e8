//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::info;
use uuid::Uuid;

use jotter_core::{Error, Result, User, UserProfile, UserRepository};

const USER_COLUMNS: &str = "id, google_id, email, name, picture, created_at, last_login_at";

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        google_id: row.try_get("google_id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        picture: row.try_get("picture")?,
        created_at: row.try_get("created_at")?,
        last_login_at: row.try_get("last_login_at")?,
    })
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn upsert_from_profile(&self, profile: &UserProfile) -> Result<User> {
        if profile.subject.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Identity profile has no subject".to_string(),
            ));
        }

        let now = Utc::now();
        let row = sqlx::query(&format!(
            "INSERT INTO users (id, google_id, email, name, picture, created_at, last_login_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             ON CONFLICT (google_id) DO UPDATE SET
                 email = EXCLUDED.email,
                 name = EXCLUDED.name,
                 picture = EXCLUDED.picture,
                 last_login_at = EXCLUDED.last_login_at
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::now_v7())
        .bind(&profile.subject)
        .bind(&profile.email)
        .bind(&profile.name)
        .bind(&profile.picture)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        let user = user_from_row(&row)?;
        info!(
            subsystem = "database",
            component = "users",
            op = "upsert",
            user_id = %user.id,
            first_login = user.created_at == user.last_login_at,
            "User logged in"
        );
        Ok(user)
    }

    async fn fetch(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))?;

        user_from_row(&row)
    }
}
