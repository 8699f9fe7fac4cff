//! Error types for the Atelier generation pipeline.
//!
//! This crate provides the foundation error types used throughout the Atelier
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions (where useful)
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use atelier_error::{AtelierResult, HttpError};
//!
//! fn fetch_data() -> AtelierResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod http;
mod json;
mod config;
mod validation;
mod backend;
mod gateway;
mod retrieval;
#[cfg(feature = "database")]
mod database;
mod error;

pub use http::HttpError;
pub use json::JsonError;
pub use config::ConfigError;
pub use validation::ValidationError;
pub use backend::BackendError;
pub use gateway::{GatewayError, GatewayErrorKind};
pub use retrieval::{RetrievalError, RetrievalErrorKind};
#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{AtelierError, AtelierErrorKind, AtelierResult};
