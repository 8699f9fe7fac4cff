//! Retrieval and embedding error types.

use derive_more::{Display, Error};

/// Specific error conditions for embedding and similarity retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum RetrievalErrorKind {
    /// Embedding model call failed.
    #[display("Embedding error: {}", _0)]
    Embedding(String),

    /// Similarity search call failed.
    #[display("Similarity search error: {}", _0)]
    Search(String),

    /// Embedding storage (upsert) failed.
    #[display("Embedding storage error: {}", _0)]
    Storage(String),
}

/// Retrieval error with source location tracking.
///
/// Enrichment failures degrade gracefully to an empty context block, so these
/// errors are normally logged and swallowed by the caller rather than
/// propagated to the response path.
#[derive(Debug, Clone, Display, Error)]
#[display("Retrieval Error: {} at line {} in {}", kind, line, file)]
pub struct RetrievalError {
    /// The kind of error that occurred
    pub kind: RetrievalErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RetrievalError {
    /// Create a new RetrievalError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RetrievalErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
