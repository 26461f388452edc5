//! JSON-RPC 2.0 envelope types.
//!
//! The payload inside `result` varies per method and stays untyped; only the
//! envelope (`result` vs `error`) is interpreted.

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

/// Fixed id used by the invalid-method check.
pub const INVALID_METHOD_ID: i64 = 999;
/// Fixed id used by the missing-parameter check.
pub const MISSING_PARAM_ID: i64 = 998;

#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Map<String, Value>,
    pub id: i64,
}

impl RpcRequest {
    /// Build a request whose id is the current Unix time in seconds.
    pub fn new(method: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
            id: chrono::Utc::now().timestamp(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    /// The wire envelope as a JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            "jsonrpc": self.jsonrpc,
            "method": self.method,
            "params": self.params,
            "id": self.id,
        })
    }
}

/// RPC-level error object. Parsed leniently: either field may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub raw: Value,
}

impl RpcError {
    pub fn from_value(raw: Value) -> Self {
        let code = raw.get("code").and_then(Value::as_i64);
        let message = raw
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { code, message, raw }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.message.as_deref()) {
            (Some(code), Some(message)) => write!(f, "[{code}] {message}"),
            (None, Some(message)) => f.write_str(message),
            (Some(code), None) => write!(f, "[{code}]"),
            (None, None) => write!(f, "{}", self.raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RpcResponse {
    /// The body carried a `result` key (its value may be `null`).
    Result(Value),
    /// The body carried an `error` key and no `result`.
    Error(RpcError),
    /// Neither key, or the body was not an object.
    Malformed(Value),
}

impl RpcResponse {
    pub fn classify(body: Value) -> Self {
        let Value::Object(mut obj) = body else {
            return RpcResponse::Malformed(body);
        };

        if let Some(result) = obj.remove("result") {
            return RpcResponse::Result(result);
        }
        if let Some(error) = obj.remove("error") {
            return RpcResponse::Error(RpcError::from_value(error));
        }
        RpcResponse::Malformed(Value::Object(obj))
    }

    /// Application error reported inside a successful `result` payload.
    pub fn embedded_error(&self) -> Option<crate::error::ProbeError> {
        let RpcResponse::Result(result) = self else {
            return None;
        };
        let error = result.get("error")?;
        let message = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let code = result.get("error_code").map(|c| match c {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        });
        Some(crate::error::ProbeError::Validation { message, code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_envelope() {
        let mut params = Map::new();
        params.insert("zip_code".to_string(), json!("10001"));
        let req = RpcRequest::new("get_current_weather", params).with_id(7);

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "method": "get_current_weather",
                "params": {"zip_code": "10001"},
                "id": 7
            })
        );
    }

    #[test]
    fn envelope_value_matches_serde_output() {
        let mut params = Map::new();
        params.insert("zip_code".to_string(), json!("33101"));
        params.insert("days".to_string(), json!(3));
        let req = RpcRequest::new("get_weather_forecast", params).with_id(42);

        assert_eq!(req.to_value(), serde_json::to_value(&req).unwrap());
        assert_eq!(req.to_value()["params"]["days"], json!(3));
    }

    #[test]
    fn request_id_defaults_to_current_time() {
        let before = chrono::Utc::now().timestamp();
        let req = RpcRequest::new("agent.info", Map::new());
        assert!(req.id >= before);
    }

    #[test]
    fn result_wins_over_error() {
        let resp = RpcResponse::classify(json!({"result": {"ok": true}, "error": {"code": 1}}));
        assert_eq!(resp, RpcResponse::Result(json!({"ok": true})));
    }

    #[test]
    fn null_result_is_still_a_result() {
        let resp = RpcResponse::classify(json!({"jsonrpc": "2.0", "result": null, "id": 1}));
        assert_eq!(resp, RpcResponse::Result(Value::Null));
    }

    #[test]
    fn error_envelope_parsed() {
        let resp = RpcResponse::classify(
            json!({"error": {"code": -32601, "message": "Method not found"}}),
        );
        let RpcResponse::Error(err) = resp else {
            panic!("expected error envelope");
        };
        assert_eq!(err.code, Some(-32601));
        assert_eq!(err.message.as_deref(), Some("Method not found"));
        assert_eq!(err.to_string(), "[-32601] Method not found");
    }

    #[test]
    fn non_object_error_falls_back_to_raw() {
        let resp = RpcResponse::classify(json!({"error": "boom"}));
        let RpcResponse::Error(err) = resp else {
            panic!("expected error envelope");
        };
        assert_eq!(err.code, None);
        assert_eq!(err.to_string(), "\"boom\"");
    }

    #[test]
    fn malformed_bodies() {
        assert!(matches!(
            RpcResponse::classify(json!({"jsonrpc": "2.0"})),
            RpcResponse::Malformed(_)
        ));
        assert!(matches!(
            RpcResponse::classify(json!([1, 2])),
            RpcResponse::Malformed(_)
        ));
    }

    #[test]
    fn embedded_error_extracted() {
        let resp = RpcResponse::classify(json!({
            "result": {"error": "zip_code is required", "error_code": "MISSING_PARAM"}
        }));
        match resp.embedded_error() {
            Some(crate::error::ProbeError::Validation { message, code }) => {
                assert_eq!(message, "zip_code is required");
                assert_eq!(code.as_deref(), Some("MISSING_PARAM"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn no_embedded_error_in_clean_result() {
        let resp = RpcResponse::classify(json!({"result": {"location": "Miami, FL"}}));
        assert!(resp.embedded_error().is_none());
        let resp = RpcResponse::classify(json!({"result": [1, 2, 3]}));
        assert!(resp.embedded_error().is_none());
    }
}
