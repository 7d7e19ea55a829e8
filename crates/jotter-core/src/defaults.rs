//! Centralized default constants for jotter.
//!
//! All crates reference these constants instead of defining their own magic
//! numbers. Organized by domain area.

// =============================================================================
// FUZZY SEARCH
// =============================================================================

/// Maximum edit distance at which a query word and a document word match.
pub const FUZZY_THRESHOLD: usize = 3;

/// Tokens longer than this many chars are truncated before edit distance is
/// computed by the service. Bounds the quadratic cost of a single comparison.
pub const MAX_TOKEN_CHARS: usize = 64;

// =============================================================================
// NOTES
// =============================================================================

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 500;

/// Maximum content length in characters.
pub const CONTENT_MAX_CHARS: usize = 100_000;

// =============================================================================
// AUTH
// =============================================================================

/// Access token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Refresh token lifetime in seconds (30 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// Max-Age of the auth cookies in seconds (30 days).
pub const COOKIE_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// Cookie carrying the access token.
pub const ACCESS_COOKIE: &str = "auth_token";

/// Cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Minimum accepted length of the token signing secret, in bytes.
pub const JWT_SECRET_MIN_LEN: usize = 32;

/// Google endpoint used to verify ID tokens.
pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 5000;

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default database URL.
pub const DATABASE_URL: &str = "postgres://localhost/jotter";

// =============================================================================
// DATABASE POOL
// =============================================================================

/// Default pool size. Each request holds a connection for one short query.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Seconds to wait for a pooled connection before failing the request.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Seconds an idle pooled connection is kept open.
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;

/// Default CORS origins when `ALLOWED_ORIGINS` is unset.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000";
