//! JSON-RPC 2.0 client for the tool-invocation gateway.

use atelier_error::{AtelierResult, GatewayError, GatewayErrorKind};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, instrument};

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// A tool advertised by the gateway.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolInfo {
    /// Tool name (the `name` argument to `tools/call`)
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// JSON Schema for the tool's arguments
    #[serde(default)]
    pub input_schema: Value,
}

/// Client for the remote tool-invocation gateway.
///
/// Requires both an endpoint URL and an access token to be usable;
/// [`GatewayClient::is_configured`] reports availability so the router can
/// fall back to the direct provider path.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    endpoint: Option<String>,
    access_token: Option<String>,
    request_id: Arc<AtomicU64>,
}

impl GatewayClient {
    /// Create a client from `ATELIER_GATEWAY_URL` and
    /// `ATELIER_GATEWAY_TOKEN`. Missing settings leave the client in the
    /// unconfigured state rather than failing construction.
    pub fn from_env() -> Self {
        Self::new(
            env::var("ATELIER_GATEWAY_URL").ok(),
            env::var("ATELIER_GATEWAY_TOKEN").ok(),
        )
    }

    /// Create a client with explicit settings.
    pub fn new(endpoint: Option<String>, access_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.filter(|e| !e.is_empty()),
            access_token: access_token.filter(|t| !t.is_empty()),
            request_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// True only when both the endpoint URL and the access token are set.
    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.access_token.is_some()
    }

    /// The RPC URL for a configured endpoint: trailing slashes are stripped
    /// before `/rpc` is appended.
    fn rpc_url(endpoint: &str) -> String {
        format!("{}/rpc", endpoint.trim_end_matches('/'))
    }

    fn settings(&self) -> Result<(&str, &str), GatewayError> {
        match (&self.endpoint, &self.access_token) {
            (Some(endpoint), Some(token)) => Ok((endpoint.as_str(), token.as_str())),
            (None, _) => Err(GatewayError::new(GatewayErrorKind::NotConfigured(
                "ATELIER_GATEWAY_URL not set".to_string(),
            ))),
            (_, None) => Err(GatewayError::new(GatewayErrorKind::NotConfigured(
                "ATELIER_GATEWAY_TOKEN not set".to_string(),
            ))),
        }
    }

    /// Interpret a decoded JSON-RPC response body.
    ///
    /// An `error` member fails with its code and message; a missing `result`
    /// fails as an empty result; otherwise the `result` value is returned.
    fn interpret_response(response: JsonRpcResponse) -> Result<Value, GatewayError> {
        if let Some(error) = response.error {
            return Err(GatewayError::new(GatewayErrorKind::Rpc {
                code: error.code,
                message: error.message,
            }));
        }
        response
            .result
            .ok_or_else(|| GatewayError::new(GatewayErrorKind::EmptyResult))
    }

    async fn rpc(&self, method: &str, params: Value) -> AtelierResult<Value> {
        let (endpoint, token) = self.settings()?;
        let url = Self::rpc_url(endpoint);
        let id = self.request_id.fetch_add(1, Ordering::Relaxed);

        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(method, id, url = %url, "Calling gateway");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, method, "Gateway request failed");
                GatewayError::new(GatewayErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, method, "Gateway returned HTTP error");
            return Err(GatewayError::new(GatewayErrorKind::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            })
            .into());
        }

        let decoded: JsonRpcResponse = response.json().await.map_err(|e| {
            error!(error = ?e, method, "Failed to decode gateway response");
            GatewayError::new(GatewayErrorKind::Serialization(e.to_string()))
        })?;

        Ok(Self::interpret_response(decoded)?)
    }

    /// List the tools the gateway advertises.
    #[instrument(skip(self))]
    pub async fn list_tools(&self) -> AtelierResult<Vec<ToolInfo>> {
        let result = self.rpc("tools/list", json!({})).await?;
        let tools = result
            .get("tools")
            .cloned()
            .unwrap_or_else(|| json!([]));
        serde_json::from_value(tools).map_err(|e| {
            GatewayError::new(GatewayErrorKind::Serialization(format!(
                "malformed tool list: {}",
                e
            )))
            .into()
        })
    }

    /// Invoke a named tool with the given arguments, returning the raw
    /// JSON-RPC `result` value.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Value) -> AtelierResult<Value> {
        self.rpc(
            "tools/call",
            json!({
                "name": name,
                "arguments": arguments,
            }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_before_rpc_suffix() {
        assert_eq!(
            GatewayClient::rpc_url("https://gateway.example.com/"),
            "https://gateway.example.com/rpc"
        );
        assert_eq!(
            GatewayClient::rpc_url("https://gateway.example.com"),
            "https://gateway.example.com/rpc"
        );
    }

    #[test]
    fn configured_requires_both_settings() {
        let both = GatewayClient::new(
            Some("https://gw.example.com".to_string()),
            Some("token".to_string()),
        );
        assert!(both.is_configured());

        let no_token = GatewayClient::new(Some("https://gw.example.com".to_string()), None);
        assert!(!no_token.is_configured());

        let no_endpoint = GatewayClient::new(None, Some("token".to_string()));
        assert!(!no_endpoint.is_configured());

        let empty = GatewayClient::new(Some(String::new()), Some("token".to_string()));
        assert!(!empty.is_configured());
    }

    #[test]
    fn rpc_error_member_fails_with_code_and_message() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "method not found"}}"#,
        )
        .unwrap();
        let err = GatewayClient::interpret_response(response).unwrap_err();
        let rendered = format!("{}", err);
        assert!(rendered.contains("-32601"));
        assert!(rendered.contains("method not found"));
    }

    #[test]
    fn missing_result_and_error_fails_as_empty_result() {
        let response: JsonRpcResponse =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "id": 1}"#).unwrap();
        let err = GatewayClient::interpret_response(response).unwrap_err();
        assert!(format!("{}", err).contains("empty result"));
    }

    #[test]
    fn result_member_is_returned_verbatim() {
        let response: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "id": 1, "result": {"content": []}}"#,
        )
        .unwrap();
        let value = GatewayClient::interpret_response(response).unwrap();
        assert_eq!(value, json!({"content": []}));
    }
}
