//! # jotter-core
//!
//! Core types, traits, and abstractions for the jotter note service.
//!
//! This crate provides the data structures and capability traits that the
//! storage, search, and HTTP crates depend on.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use traits::*;
