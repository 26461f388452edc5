//! Probes: one HTTP call (or a fixed group of calls) plus shallow validation.
//!
//! Each top-level check implements [`Probe`]; the runner treats them as
//! independent trait objects and never stops early on a failure. Three kinds
//! exist:
//!
//! - [`endpoint::EndpointProbe`]: GET a REST endpoint, print known fields
//! - [`battery::Battery`]: a named all-or-nothing group of RPC method calls
//! - [`error_handling::ErrorHandlingProbe`]: the two negative-path checks

pub mod battery;
pub mod endpoint;
pub mod error_handling;
pub mod rpc;

use crate::http::AgentClient;
use async_trait::async_trait;
use serde_json::{Map, Value};

#[async_trait]
pub trait Probe: Send + Sync {
    /// Name shown in `Running ...` / `PASSED` / `FAILED` lines and in the summary.
    fn name(&self) -> &str;

    /// Execute the check. Failures are reported on the console, never returned.
    async fn run(&self, client: &AgentClient) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Get,
    JsonRpc,
}

/// A response field worth printing when present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    /// Appended directly after the value, e.g. a unit.
    pub suffix: &'static str,
}

impl Field {
    pub const fn new(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            suffix: "",
        }
    }

    pub const fn with_suffix(key: &'static str, label: &'static str, suffix: &'static str) -> Self {
        Self { key, label, suffix }
    }
}

/// One request the tester knows how to make. Defined at startup, never mutated.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// URL path for GET cases, method name for RPC cases.
    pub target: &'static str,
    pub kind: RequestKind,
    pub params: Map<String, Value>,
    pub expected_fields: &'static [Field],
    pub display_name: &'static str,
}

impl TestCase {
    pub fn get(path: &'static str, display_name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            target: path,
            kind: RequestKind::Get,
            params: Map::new(),
            expected_fields: fields,
            display_name,
        }
    }

    pub fn rpc(method: &'static str, params: Value, display_name: &'static str) -> Self {
        Self {
            target: method,
            kind: RequestKind::JsonRpc,
            params: into_params(params),
            expected_fields: rpc::RESULT_FIELDS,
            display_name,
        }
    }
}

/// Coerce a `json!` literal into RPC params; anything but an object is empty.
pub fn into_params(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Render a JSON value the way a person would type it: strings unquoted.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
