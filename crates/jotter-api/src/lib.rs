//! # jotter-api
//!
//! HTTP API for jotter: Google sign-in with cookie sessions, owner-scoped
//! note CRUD, and strict or fuzzy note search.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
