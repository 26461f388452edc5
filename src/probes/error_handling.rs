//! Negative-path checks: the agent must reject bad calls in a recognisable way.
//!
//! Both sub-checks always run; the probe passes only if both do.

use super::{display_value, Probe};
use crate::error::ProbeError;
use crate::http::AgentClient;
use crate::rpc::{RpcRequest, RpcResponse, INVALID_METHOD_ID, MISSING_PARAM_ID};
use async_trait::async_trait;
use serde_json::{json, Map};
use tracing::debug;

const NOT_AVAILABLE: &str = "N/A";
pub const INVALID_METHOD: &str = "invalid_method";

#[derive(Default)]
pub struct ErrorHandlingProbe;

impl ErrorHandlingProbe {
    pub fn new() -> Self {
        Self
    }

    /// Unknown method name must come back as an RPC `error` envelope.
    pub async fn check_invalid_method(&self, client: &AgentClient) -> bool {
        let console = client.console();
        console.info("Testing invalid method...");

        let request = RpcRequest::new(INVALID_METHOD, Map::new()).with_id(INVALID_METHOD_ID);
        match client.call(&request).await {
            Ok(RpcResponse::Error(error)) => {
                console.success("Invalid method handling working");
                let code = error.code.map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.to_string());
                let message = error.message.as_deref().unwrap_or(NOT_AVAILABLE);
                console.detail("Error Code", code);
                console.detail("Error Message", message);
                true
            }
            Ok(other) => {
                debug!(?other, "invalid method was not rejected with an error envelope");
                console.error("Invalid method handling failed");
                false
            }
            Err(_) => {
                console.error("Invalid method handling failed");
                false
            }
        }
    }

    /// `get_current_weather` without `zip_code` must report the problem
    /// inside `result.error`.
    pub async fn check_missing_param(&self, client: &AgentClient) -> bool {
        let console = client.console();
        console.info("Testing missing zip_code parameter...");

        let params = super::into_params(json!({"country_code": "us"}));
        let request = RpcRequest::new("get_current_weather", params).with_id(MISSING_PARAM_ID);
        let reply = match client.call(&request).await {
            Ok(reply) => reply,
            Err(_) => {
                console.error("Missing parameter handling failed");
                return false;
            }
        };

        match reply.embedded_error() {
            Some(ProbeError::Validation { message, code }) => {
                console.success("Missing parameter handling working");
                console.detail("Error", message);
                console.detail("Error Code", code.as_deref().unwrap_or(NOT_AVAILABLE));
                true
            }
            _ => {
                if let RpcResponse::Error(error) = &reply {
                    debug!(error = %error, "validation reported as an RPC error instead of inside result");
                } else if let RpcResponse::Result(result) = &reply {
                    debug!(result = %display_value(result), "result carried no error field");
                }
                console.error("Missing parameter handling failed");
                false
            }
        }
    }
}

#[async_trait]
impl Probe for ErrorHandlingProbe {
    fn name(&self) -> &str {
        "Error Handling"
    }

    async fn run(&self, client: &AgentClient) -> bool {
        client.console().info("Testing Error Handling...");

        let invalid_method = self.check_invalid_method(client).await;
        client.console().blank();
        let missing_param = self.check_missing_param(client).await;

        invalid_method && missing_param
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TesterConfig;
    use crate::console::{Captured, Console};
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount(server: &MockServer, id: i64, reply: Value) {
        Mock::given(method("POST"))
            .and(path("/jsonrpc"))
            .and(body_partial_json(json!({"id": id})))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .mount(server)
            .await;
    }

    fn client(uri: &str) -> (AgentClient, Captured) {
        let (console, out) = Console::capture();
        let config = TesterConfig::new(uri).unwrap();
        (AgentClient::new(&config, console).unwrap(), out)
    }

    #[tokio::test]
    async fn invalid_method_rejected_with_envelope() {
        let server = MockServer::start().await;
        mount(
            &server,
            INVALID_METHOD_ID,
            json!({"jsonrpc": "2.0", "error": {"code": -32601, "message": "Method not found"}, "id": 999}),
        )
        .await;
        let (client, out) = client(&server.uri());

        assert!(ErrorHandlingProbe::new().check_invalid_method(&client).await);
        let text = out.contents();
        assert!(text.contains("  Error Code: -32601"));
        assert!(text.contains("  Error Message: Method not found"));
    }

    #[tokio::test]
    async fn invalid_method_answered_with_result_fails() {
        let server = MockServer::start().await;
        mount(&server, INVALID_METHOD_ID, json!({"result": {}})).await;
        let (client, _) = client(&server.uri());

        assert!(!ErrorHandlingProbe::new().check_invalid_method(&client).await);
    }

    #[tokio::test]
    async fn missing_param_reported_inside_result() {
        let server = MockServer::start().await;
        mount(
            &server,
            MISSING_PARAM_ID,
            json!({"result": {"error": "zip_code is required", "error_code": "MISSING_PARAM"}}),
        )
        .await;
        let (client, out) = client(&server.uri());

        assert!(ErrorHandlingProbe::new().check_missing_param(&client).await);
        let text = out.contents();
        assert!(text.contains("  Error: zip_code is required"));
        assert!(text.contains("  Error Code: MISSING_PARAM"));
    }

    #[tokio::test]
    async fn missing_param_as_rpc_error_fails() {
        let server = MockServer::start().await;
        mount(
            &server,
            MISSING_PARAM_ID,
            json!({"error": {"code": -32602, "message": "Invalid params"}}),
        )
        .await;
        let (client, _) = client(&server.uri());

        assert!(!ErrorHandlingProbe::new().check_missing_param(&client).await);
    }

    #[tokio::test]
    async fn both_checks_run_even_when_first_fails() {
        let server = MockServer::start().await;
        mount(&server, INVALID_METHOD_ID, json!({"result": "accepted"})).await;
        mount(
            &server,
            MISSING_PARAM_ID,
            json!({"result": {"error": "Invalid input: zip_code is required"}}),
        )
        .await;
        let (client, out) = client(&server.uri());

        assert!(!ErrorHandlingProbe::new().run(&client).await);
        let text = out.contents();
        assert!(text.contains("[ERROR] Invalid method handling failed"));
        assert!(text.contains("[SUCCESS] Missing parameter handling working"));
        assert!(text.contains("  Error Code: N/A"));
    }
}
