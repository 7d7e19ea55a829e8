//! Shared harness for API tests: in-memory repositories, a stub identity
//! provider, and a server bound to an ephemeral port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{HeaderMap, SET_COOKIE};
use uuid::Uuid;

use jotter_api::auth::{CookiePolicy, JwtIssuer};
use jotter_api::{build_router, AppState};
use jotter_core::{
    CreateNoteRequest, Error, IdentityProvider, Note, NoteRepository, Result, UpdateNoteRequest,
    User, UserProfile, UserRepository,
};
use jotter_search::FuzzyMatcher;

pub const TEST_SECRET: &str = "test-secret-test-secret-test-secret";

/// Google token accepted by [`StubIdentity`]; the suffix becomes the subject.
pub const GOOGLE_TOKEN_PREFIX: &str = "google-id-token:";

#[derive(Default)]
pub struct InMemoryNotes {
    notes: Mutex<Vec<Note>>,
}

#[async_trait]
impl NoteRepository for InMemoryNotes {
    async fn list(&self, user_id: Uuid) -> Result<Vec<Note>> {
        let notes = self.notes.lock().unwrap();
        Ok(notes
            .iter()
            .rev()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn fetch(&self, user_id: Uuid, id: Uuid) -> Result<Note> {
        self.notes
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id && n.user_id == user_id)
            .cloned()
            .ok_or(Error::NoteNotFound(id))
    }

    async fn create(&self, user_id: Uuid, req: CreateNoteRequest) -> Result<Note> {
        req.validate()?;
        let now = Utc::now();
        let note = Note {
            id: Uuid::now_v7(),
            user_id,
            title: req.title,
            content: req.content,
            created_at: now,
            updated_at: now,
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn update(&self, user_id: Uuid, id: Uuid, req: UpdateNoteRequest) -> Result<Note> {
        req.validate()?;
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user_id)
            .ok_or(Error::NoteNotFound(id))?;
        note.title = req.title;
        note.content = req.content;
        note.updated_at = Utc::now();
        Ok(note.clone())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<()> {
        let mut notes = self.notes.lock().unwrap();
        let before = notes.len();
        notes.retain(|n| !(n.id == id && n.user_id == user_id));
        if notes.len() == before {
            return Err(Error::NoteNotFound(id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn upsert_from_profile(&self, profile: &UserProfile) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        if let Some(user) = users.iter_mut().find(|u| u.google_id == profile.subject) {
            user.email = profile.email.clone();
            user.name = profile.name.clone();
            user.picture = profile.picture.clone();
            user.last_login_at = now;
            return Ok(user.clone());
        }
        let user = User {
            id: Uuid::now_v7(),
            google_id: profile.subject.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            picture: profile.picture.clone(),
            created_at: now,
            last_login_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn fetch(&self, id: Uuid) -> Result<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("User {} not found", id)))
    }
}

pub struct StubIdentity;

#[async_trait]
impl IdentityProvider for StubIdentity {
    async fn exchange_code_for_profile(&self, code: &str) -> Result<UserProfile> {
        let subject = code
            .strip_prefix(GOOGLE_TOKEN_PREFIX)
            .ok_or_else(|| Error::Unauthorized("Invalid Google token".to_string()))?;
        Ok(UserProfile {
            subject: subject.to_string(),
            email: Some(format!("{}@example.com", subject)),
            name: Some(subject.to_string()),
            picture: None,
        })
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub tokens: JwtIssuer,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in through `/auth/google` and return the `Cookie` header value.
    pub async fn login(&self, subject: &str) -> String {
        let response = self
            .client
            .post(self.url("/auth/google"))
            .json(&serde_json::json!({ "token": format!("{GOOGLE_TOKEN_PREFIX}{subject}") }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        cookie_header(response.headers())
    }

    pub async fn create_note(&self, cookie: &str, title: &str, content: &str) -> Uuid {
        let response = self
            .client
            .post(self.url("/api/notes"))
            .header(reqwest::header::COOKIE, cookie)
            .json(&serde_json::json!({ "title": title, "content": content }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 201);
        let body: serde_json::Value = response.json().await.unwrap();
        body["id"].as_str().unwrap().parse().unwrap()
    }
}

/// Find the value a response sets for cookie `name`.
pub fn set_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

/// Turn every `Set-Cookie` in a response into one `Cookie` request header.
pub fn cookie_header(headers: &HeaderMap) -> String {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

pub async fn spawn_test_server() -> TestServer {
    let tokens = JwtIssuer::new(TEST_SECRET.as_bytes());
    let state = AppState::new(
        Arc::new(InMemoryNotes::default()),
        Arc::new(InMemoryUsers::default()),
        Arc::new(StubIdentity),
        Arc::new(tokens.clone()),
    )
    .with_matcher(FuzzyMatcher::default().with_max_token_chars(64))
    .with_cookies(CookiePolicy::new(false));

    let router = build_router(state, &["http://localhost:3000".to_string()]);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    // Give server a moment to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    TestServer {
        base_url,
        client: reqwest::Client::new(),
        tokens,
    }
}
