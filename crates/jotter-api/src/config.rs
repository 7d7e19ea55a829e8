//! Server configuration.
//!
//! Configuration is read once at startup from environment variables (after
//! loading an optional `.env` file), validated, and then passed explicitly to
//! the components that need it.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | `postgres://localhost/jotter` |
//! | `DATABASE_MAX_CONNECTIONS` | `10` |
//! | `DATABASE_CONNECT_TIMEOUT_SECS` | `30` |
//! | `HOST` / `PORT` | `0.0.0.0` / `5000` |
//! | `GOOGLE_CLIENT_ID` | required |
//! | `JWT_SECRET` | required, at least 32 bytes |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `COOKIE_SECURE` | `true` |
//! | `FUZZY_THRESHOLD` | `3` |
//! | `FUZZY_MAX_TOKEN_CHARS` | `64` |
//! | `LOG_FORMAT` / `LOG_FILE` / `LOG_ANSI` | `text` / stdout / auto |

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use jotter_core::defaults;
use jotter_db::PoolConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid {
                name: "LOG_FORMAT",
                reason: format!("expected \"text\" or \"json\", got {:?}", other),
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Log file path; logs go to stdout when unset.
    pub file: Option<String>,
    /// Force ANSI colors on or off; auto-detected when unset.
    pub ansi: Option<bool>,
}

/// Validated server configuration.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_connect_timeout_secs: u64,
    pub host: String,
    pub port: u16,
    pub google_client_id: String,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    /// Whether auth cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    pub fuzzy_threshold: usize,
    pub max_token_chars: usize,
    pub log: LogConfig,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"<redacted>")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_connect_timeout_secs", &self.db_connect_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("google_client_id", &self.google_client_id)
            .field("jwt_secret", &"<redacted>")
            .field("allowed_origins", &self.allowed_origins)
            .field("cookie_secure", &self.cookie_secure)
            .field("fuzzy_threshold", &self.fuzzy_threshold)
            .field("max_token_chars", &self.max_token_chars)
            .field("log", &self.log)
            .finish()
    }
}

fn parse_bool(name: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: &str) -> ConfigResult<T>
where
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        reason: e.to_string(),
    })
}

/// Split a comma-separated origin list, dropping blank entries.
pub fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(v) => parse_number("PORT", &v)?,
            None => defaults::SERVER_PORT,
        };
        let db_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse_number("DATABASE_MAX_CONNECTIONS", &v)?,
            None => defaults::DB_MAX_CONNECTIONS,
        };
        let db_connect_timeout_secs = match get("DATABASE_CONNECT_TIMEOUT_SECS") {
            Some(v) => parse_number("DATABASE_CONNECT_TIMEOUT_SECS", &v)?,
            None => defaults::DB_CONNECT_TIMEOUT_SECS,
        };
        let cookie_secure = match get("COOKIE_SECURE") {
            Some(v) => parse_bool("COOKIE_SECURE", &v)?,
            None => true,
        };
        let fuzzy_threshold = match get("FUZZY_THRESHOLD") {
            Some(v) => parse_number("FUZZY_THRESHOLD", &v)?,
            None => defaults::FUZZY_THRESHOLD,
        };
        let max_token_chars = match get("FUZZY_MAX_TOKEN_CHARS") {
            Some(v) => parse_number("FUZZY_MAX_TOKEN_CHARS", &v)?,
            None => defaults::MAX_TOKEN_CHARS,
        };
        let log = LogConfig {
            format: match get("LOG_FORMAT") {
                Some(v) => v.parse()?,
                None => LogFormat::Text,
            },
            file: get("LOG_FILE"),
            ansi: match get("LOG_ANSI") {
                Some(v) => Some(parse_bool("LOG_ANSI", &v)?),
                None => None,
            },
        };

        let config = Self {
            database_url: get("DATABASE_URL")
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            db_max_connections,
            db_connect_timeout_secs,
            host: get("HOST").unwrap_or_else(|| defaults::SERVER_HOST.to_string()),
            port,
            google_client_id: get("GOOGLE_CLIENT_ID")
                .ok_or(ConfigError::Missing("GOOGLE_CLIENT_ID"))?,
            jwt_secret: get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            allowed_origins: split_origins(
                &get("ALLOWED_ORIGINS").unwrap_or_else(|| defaults::ALLOWED_ORIGINS.to_string()),
            ),
            cookie_secure,
            fuzzy_threshold,
            max_token_chars,
            log,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.jwt_secret.len() < defaults::JWT_SECRET_MIN_LEN {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: format!(
                    "must be at least {} bytes",
                    defaults::JWT_SECRET_MIN_LEN
                ),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                name: "PORT",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.max_token_chars == 0 {
            return Err(ConfigError::Invalid {
                name: "FUZZY_MAX_TOKEN_CHARS",
                reason: "must be non-zero".to_string(),
            });
        }
        if self.allowed_origins.iter().any(|o| o == "*") {
            return Err(ConfigError::Invalid {
                name: "ALLOWED_ORIGINS",
                reason: "wildcard origins cannot be combined with credentialed requests"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Database pool settings.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new()
            .max_connections(self.db_max_connections)
            .connect_timeout(Duration::from_secs(self.db_connect_timeout_secs))
    }

    /// Socket address string to bind to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
