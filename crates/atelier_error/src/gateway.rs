//! Tool-invocation gateway error types.

use derive_more::{Display, Error};

/// Specific error conditions for gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum GatewayErrorKind {
    /// Gateway endpoint or access token is not configured.
    #[display("Gateway not configured: {}", _0)]
    NotConfigured(String),

    /// HTTP-level failure from the gateway.
    #[display("Gateway HTTP error {}: {}", status, status_text)]
    Http {
        /// HTTP status code
        status: u16,
        /// Canonical status text
        status_text: String,
    },

    /// JSON-RPC error object returned by the gateway.
    #[display("Gateway RPC error {}: {}", code, message)]
    Rpc {
        /// JSON-RPC error code
        code: i64,
        /// JSON-RPC error message
        message: String,
    },

    /// Response contained neither `result` nor `error`.
    #[display("gateway returned empty result")]
    EmptyResult,

    /// Tool result contained no text-typed content block.
    #[display("gateway returned no text content")]
    NoTextContent,

    /// Transport failure before a response was received.
    #[display("Gateway transport error: {}", _0)]
    Transport(String),

    /// Request or response serialization failed.
    #[display("Gateway serialization error: {}", _0)]
    Serialization(String),
}

/// Gateway error with source location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Gateway Error: {} at line {} in {}", kind, line, file)]
pub struct GatewayError {
    /// The kind of error that occurred
    pub kind: GatewayErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use atelier_error::{GatewayError, GatewayErrorKind};
    ///
    /// let err = GatewayError::new(GatewayErrorKind::EmptyResult);
    /// assert!(format!("{}", err).contains("empty result"));
    /// ```
    #[track_caller]
    pub fn new(kind: GatewayErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
