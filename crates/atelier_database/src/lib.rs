//! PostgreSQL integration for Atelier.
//!
//! This crate persists generation records and usage events through a narrow
//! repository surface: insert once, finalize once, read back by id. The
//! async [`PostgresStore`] bridges the synchronous diesel repository onto
//! the pipeline's `GenerationStore`/`UsageLedger` seams via a connection
//! pool and blocking tasks.
//!
//! # Example
//!
//! ```rust,ignore
//! use atelier_database::{GenerationRepository, PostgresGenerationRepository, establish_connection};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut conn = establish_connection()?;
//! let mut repo = PostgresGenerationRepository::new(&mut conn);
//! // Use repository...
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod connection;
mod generation_models;
mod generation_repository;
mod store;

/// Diesel table definitions.
pub mod schema;

pub use connection::establish_connection;
pub use generation_models::{
    GenerationRow, NewGenerationRow, NewUsageEventRow, UpdateGenerationRow,
};
pub use generation_repository::{GenerationRepository, PostgresGenerationRepository};
pub use store::PostgresStore;

use atelier_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
