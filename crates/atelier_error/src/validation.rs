//! Request validation error types.

/// Validation error with source location.
///
/// Raised when an inbound generation request violates its schema or bounds
/// (prompt length, attachment size, unsupported MIME type). Surfaced to the
/// caller before any record is created or backend is contacted.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", message, line, file)]
pub struct ValidationError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use atelier_error::ValidationError;
    ///
    /// let err = ValidationError::new("Prompt must be at least 10 characters");
    /// assert!(err.message.contains("10 characters"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
