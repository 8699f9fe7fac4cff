//! Server-sent event decoding for the streaming Messages API.

use atelier_interface::FinishReason;
use serde_json::Value;

/// What a decoded stream line asks the client to do.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StreamAction {
    /// Emit a text delta.
    Text(String),
    /// Remember the reported stop reason for the final chunk.
    StopReason(FinishReason),
    /// The message is complete; emit the final chunk.
    Done,
    /// The provider reported a mid-stream error.
    Error(String),
    /// Nothing actionable (comments, pings, other event types).
    Ignore,
}

pub(crate) fn finish_reason(stop_reason: &str) -> FinishReason {
    match stop_reason {
        "end_turn" | "stop_sequence" => FinishReason::Stop,
        "max_tokens" => FinishReason::Length,
        _ => FinishReason::Other,
    }
}

/// Decode one line of the SSE stream.
///
/// Only `data:` lines carry payloads; `event:` lines and blanks are framing.
pub(crate) fn decode_line(line: &str) -> StreamAction {
    let Some(payload) = line.strip_prefix("data:") else {
        return StreamAction::Ignore;
    };
    let payload = payload.trim();
    if payload.is_empty() {
        return StreamAction::Ignore;
    }

    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(_) => return StreamAction::Ignore,
    };

    match value.get("type").and_then(Value::as_str) {
        Some("content_block_delta") => value
            .pointer("/delta/text")
            .and_then(Value::as_str)
            .map(|text| StreamAction::Text(text.to_string()))
            .unwrap_or(StreamAction::Ignore),
        Some("message_delta") => value
            .pointer("/delta/stop_reason")
            .and_then(Value::as_str)
            .map(|reason| StreamAction::StopReason(finish_reason(reason)))
            .unwrap_or(StreamAction::Ignore),
        Some("message_stop") => StreamAction::Done,
        Some("error") => StreamAction::Error(
            value
                .pointer("/error/message")
                .and_then(Value::as_str)
                .unwrap_or("unknown provider error")
                .to_string(),
        ),
        _ => StreamAction::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_deltas_decode_to_text_actions() {
        let line = r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"const "}}"#;
        assert_eq!(decode_line(line), StreamAction::Text("const ".to_string()));
    }

    #[test]
    fn message_stop_decodes_to_done() {
        assert_eq!(
            decode_line(r#"data: {"type":"message_stop"}"#),
            StreamAction::Done
        );
    }

    #[test]
    fn stop_reason_is_remembered_from_message_delta() {
        let line = r#"data: {"type":"message_delta","delta":{"stop_reason":"max_tokens"},"usage":{"output_tokens":512}}"#;
        assert_eq!(
            decode_line(line),
            StreamAction::StopReason(FinishReason::Length)
        );
    }

    #[test]
    fn provider_errors_surface_their_message() {
        let line = r#"data: {"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        assert_eq!(
            decode_line(line),
            StreamAction::Error("Overloaded".to_string())
        );
    }

    #[test]
    fn framing_lines_are_ignored() {
        assert_eq!(decode_line("event: message_start"), StreamAction::Ignore);
        assert_eq!(decode_line(""), StreamAction::Ignore);
        assert_eq!(decode_line("data: "), StreamAction::Ignore);
        assert_eq!(
            decode_line(r#"data: {"type":"ping"}"#),
            StreamAction::Ignore
        );
    }
}
