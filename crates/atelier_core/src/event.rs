//! Outbound stream event types.

use atelier_quality::QualityReport;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A discrete event on the generation stream.
///
/// Each event carries a millisecond timestamp. The stream always terminates
/// with exactly one `complete` or `error` event, never both.
///
/// # Examples
///
/// ```
/// use atelier_core::GenerationEvent;
///
/// let event = GenerationEvent::chunk("const Button");
/// let json = serde_json::to_string(&event).unwrap();
/// assert!(json.contains("\"type\":\"chunk\""));
/// assert!(json.contains("\"timestamp\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GenerationEvent {
    /// Generation accepted; processing has begun.
    Start {
        /// Identity of the generation record
        generation_id: Uuid,
        /// Millisecond timestamp
        timestamp: i64,
    },
    /// Incremental content from the backend, forwarded verbatim.
    Chunk {
        /// Partial generated text
        content: String,
        /// Millisecond timestamp
        timestamp: i64,
    },
    /// Quality report for the finished code.
    Quality {
        /// The full gate-by-gate report
        report: QualityReport,
        /// Millisecond timestamp
        timestamp: i64,
    },
    /// Generation finished successfully.
    Complete {
        /// Identity of the generation record
        generation_id: Uuid,
        /// The full generated code
        code: String,
        /// Whether the quality report passed
        quality_passed: bool,
        /// Whether retrieved context enriched the prompt
        context_used: bool,
        /// Millisecond timestamp
        timestamp: i64,
    },
    /// Terminal failure; no further events follow.
    Error {
        /// Human-readable error message
        message: String,
        /// Millisecond timestamp
        timestamp: i64,
    },
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

impl GenerationEvent {
    /// A `start` event stamped now.
    pub fn start(generation_id: Uuid) -> Self {
        GenerationEvent::Start {
            generation_id,
            timestamp: now_ms(),
        }
    }

    /// A `chunk` event stamped now.
    pub fn chunk(content: impl Into<String>) -> Self {
        GenerationEvent::Chunk {
            content: content.into(),
            timestamp: now_ms(),
        }
    }

    /// A `quality` event stamped now.
    pub fn quality(report: QualityReport) -> Self {
        GenerationEvent::Quality {
            report,
            timestamp: now_ms(),
        }
    }

    /// A `complete` event stamped now.
    pub fn complete(
        generation_id: Uuid,
        code: impl Into<String>,
        quality_passed: bool,
        context_used: bool,
    ) -> Self {
        GenerationEvent::Complete {
            generation_id,
            code: code.into(),
            quality_passed,
            context_used,
            timestamp: now_ms(),
        }
    }

    /// An `error` event stamped now.
    pub fn error(message: impl Into<String>) -> Self {
        GenerationEvent::Error {
            message: message.into(),
            timestamp: now_ms(),
        }
    }

    /// Whether this event terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            GenerationEvent::Complete { .. } | GenerationEvent::Error { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_with_lowercase_type() {
        let event = GenerationEvent::error("backend unreachable");
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"error\""));
        assert!(json.contains("backend unreachable"));
    }

    #[test]
    fn terminal_events_are_complete_and_error() {
        let id = Uuid::new_v4();
        assert!(GenerationEvent::complete(id, "code", true, false).is_terminal());
        assert!(GenerationEvent::error("x").is_terminal());
        assert!(!GenerationEvent::start(id).is_terminal());
        assert!(!GenerationEvent::chunk("x").is_terminal());
    }
}
