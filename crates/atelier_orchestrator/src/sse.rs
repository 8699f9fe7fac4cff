//! Server-push text framing for the outbound event stream.

use atelier_core::GenerationEvent;
use atelier_error::{AtelierResult, JsonError};

/// Frame one event for the server-push text transport: a `data:`-prefixed
/// JSON payload terminated by a blank line.
///
/// # Examples
///
/// ```
/// use atelier_core::GenerationEvent;
/// use atelier_orchestrator::sse_frame;
///
/// let frame = sse_frame(&GenerationEvent::chunk("const Button")).unwrap();
/// assert!(frame.starts_with("data: {"));
/// assert!(frame.ends_with("\n\n"));
/// ```
pub fn sse_frame(event: &GenerationEvent) -> AtelierResult<String> {
    let payload = serde_json::to_string(event)
        .map_err(|e| JsonError::new(format!("Failed to encode event: {}", e)))?;
    Ok(format!("data: {}\n\n", payload))
}
