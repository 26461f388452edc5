//! Single JSON-RPC method probe.

use super::{display_value, Field};
use crate::error::ProbeError;
use crate::http::AgentClient;
use crate::rpc::{RpcRequest, RpcResponse};
use serde_json::{Map, Value};
use tracing::debug;

/// Result fields printed when a method response happens to carry them.
pub const RESULT_FIELDS: &[Field] = &[
    Field::new("location", "Location"),
    Field::with_suffix("temperature", "Temperature", "°F"),
    Field::new("condition", "Condition"),
    Field::new("data_source", "Data Source"),
    Field::new("forecast_days", "Forecast Days"),
    Field::new("alert_count", "Alert Count"),
    Field::new("data_points", "Data Points"),
];

/// Call `method` and report the outcome. `true` only when the reply carries
/// a `result`; an `error` envelope is a soft failure, anything else a hard one.
/// Of an object result, only `fields` are printed.
pub async fn invoke(
    client: &AgentClient,
    method: &str,
    params: Map<String, Value>,
    fields: &[Field],
    label: &str,
) -> bool {
    let console = client.console();
    console.info(format!("Testing {label}..."));

    let request = RpcRequest::new(method, params);
    match client.call(&request).await {
        Ok(RpcResponse::Result(result)) => {
            console.success(format!("{label} working"));
            report_result(client, &result, fields);
            true
        }
        Ok(RpcResponse::Error(error)) => {
            let err = ProbeError::Protocol(error);
            debug!(method, kind = %err.kind(), "method returned an error envelope");
            console.warning(format!("{label} returned error: {err}"));
            false
        }
        Ok(RpcResponse::Malformed(body)) => {
            debug!(method, %body, "reply has neither result nor error");
            console.error(format!("{label} failed"));
            false
        }
        Err(_) => {
            console.error(format!("{label} failed"));
            false
        }
    }
}

fn report_result(client: &AgentClient, result: &Value, fields: &[Field]) {
    let console = client.console();
    match result {
        Value::Object(map) => {
            for field in fields {
                if let Some(value) = map.get(field.key) {
                    console.detail(
                        field.label,
                        format_args!("{}{}", display_value(value), field.suffix),
                    );
                }
            }
        }
        Value::Array(items) => console.detail("Entries", items.len()),
        _ => {}
    }
}
