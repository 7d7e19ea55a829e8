//! Shared handler state.

use std::sync::Arc;

use jotter_core::{IdentityProvider, NoteRepository, TokenIssuer, UserRepository};
use jotter_db::Database;
use jotter_search::FuzzyMatcher;

use crate::auth::{CookiePolicy, GoogleIdentityProvider, JwtIssuer};
use crate::config::Config;

/// Everything a handler needs, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    pub users: Arc<dyn UserRepository>,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub matcher: FuzzyMatcher,
    pub cookies: CookiePolicy,
}

impl AppState {
    pub fn new(
        notes: Arc<dyn NoteRepository>,
        users: Arc<dyn UserRepository>,
        identity: Arc<dyn IdentityProvider>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            notes,
            users,
            identity,
            tokens,
            matcher: FuzzyMatcher::default(),
            cookies: CookiePolicy::default(),
        }
    }

    pub fn with_matcher(mut self, matcher: FuzzyMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_cookies(mut self, cookies: CookiePolicy) -> Self {
        self.cookies = cookies;
        self
    }

    /// Wire the production components from validated configuration.
    pub fn from_config(config: &Config, db: Database) -> Self {
        Self::new(
            Arc::new(db.notes),
            Arc::new(db.users),
            Arc::new(GoogleIdentityProvider::new(config.google_client_id.clone())),
            Arc::new(JwtIssuer::new(config.jwt_secret.as_bytes())),
        )
        .with_matcher(
            FuzzyMatcher::new(config.fuzzy_threshold).with_max_token_chars(config.max_token_chars),
        )
        .with_cookies(CookiePolicy::new(config.cookie_secure))
    }
}
