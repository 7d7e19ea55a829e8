//! Google Sign-In identity provider.
//!
//! The client sends the ID token obtained from Google Sign-In. Google's
//! `tokeninfo` endpoint checks the signature and expiry; this module checks
//! that the token was minted for our client id by Google's issuer.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use jotter_core::defaults::GOOGLE_TOKENINFO_URL;
use jotter_core::{Error, IdentityProvider, Result, UserProfile};

const GOOGLE_ISSUERS: [&str; 2] = ["accounts.google.com", "https://accounts.google.com"];

/// Fields of the `tokeninfo` response we rely on.
#[derive(Debug, Deserialize)]
struct TokenInfo {
    aud: String,
    sub: String,
    iss: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl TokenInfo {
    fn into_profile(self, client_id: &str) -> Result<UserProfile> {
        if self.aud != client_id {
            return Err(Error::Unauthorized(
                "Token was issued for a different client".to_string(),
            ));
        }
        if !GOOGLE_ISSUERS.contains(&self.iss.as_str()) {
            return Err(Error::Unauthorized("Wrong token issuer".to_string()));
        }
        if self.sub.is_empty() {
            return Err(Error::Unauthorized("Token has no subject".to_string()));
        }
        Ok(UserProfile {
            subject: self.sub,
            email: self.email,
            name: self.name,
            picture: self.picture,
        })
    }
}

/// Verifies Google ID tokens through the `tokeninfo` endpoint.
#[derive(Clone)]
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    client_id: String,
    tokeninfo_url: String,
}

impl GoogleIdentityProvider {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: client_id.into(),
            tokeninfo_url: GOOGLE_TOKENINFO_URL.to_string(),
        }
    }

    /// Point the provider at a different verification endpoint.
    pub fn with_tokeninfo_url(mut self, url: impl Into<String>) -> Self {
        self.tokeninfo_url = url.into();
        self
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn exchange_code_for_profile(&self, code: &str) -> Result<UserProfile> {
        let response = self
            .client
            .get(&self.tokeninfo_url)
            .query(&[("id_token", code)])
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            debug!(
                subsystem = "api",
                component = "google",
                status = status.as_u16(),
                "Google rejected ID token"
            );
            return Err(Error::Unauthorized("Invalid Google token".to_string()));
        }
        if !status.is_success() {
            warn!(
                subsystem = "api",
                component = "google",
                status = status.as_u16(),
                "Google token verification unavailable"
            );
            return Err(Error::Request(format!(
                "Google token verification failed with status {}",
                status
            )));
        }

        let info: TokenInfo = response.json().await?;
        info.into_profile(&self.client_id)
    }
}
