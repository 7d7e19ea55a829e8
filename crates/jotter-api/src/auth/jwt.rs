//! HS256 session tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

use jotter_core::{Claims, Error, Result, TokenIssuer, TokenKind};

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct JwtIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtIssuer {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
    }
}

impl TokenIssuer for JwtIssuer {
    fn issue_token(&self, user_id: Uuid, kind: TokenKind) -> Result<String> {
        let now = Utc::now().timestamp();
        self.sign(&Claims {
            user_id,
            kind,
            iat: now,
            exp: now + kind.ttl_secs(),
        })
    }

    fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(subsystem = "api", component = "auth", error = %e, "Token rejected");
                Error::Unauthorized("Token is invalid".to_string())
            })
    }
}
