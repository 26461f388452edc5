//! HTTP client wrapper around a single pooled `reqwest::Client`.
//!
//! Every failure is classified into [`ProbeError`] and echoed to the console
//! as one `[ERROR]` line; callers only decide pass/fail.

use crate::config::TesterConfig;
use crate::console::Console;
use crate::error::{ConfigError, FailureKind, ProbeError};
use crate::rpc::{RpcRequest, RpcResponse};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

pub const JSONRPC_PATH: &str = "/jsonrpc";

pub struct AgentClient {
    http: reqwest::Client,
    base_url: String,
    console: Console,
}

impl AgentClient {
    pub fn new(config: &TesterConfig, console: Console) -> Result<Self, ConfigError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            console,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Issue one request and decode the body as JSON.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ProbeError> {
        let result = self.execute(method, url, body).await;

        if let Err(e) = &result {
            match e.kind() {
                FailureKind::DecodeFailure => self.console.error(format!("JSON decode failed: {e}")),
                _ => self.console.error(format!("Request failed: {e}")),
            }
        }

        result
    }

    pub async fn get(&self, path: &str) -> Result<Value, ProbeError> {
        let url = self.url(path);
        self.send(Method::GET, &url, None).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ProbeError> {
        let url = self.url(path);
        self.send(Method::POST, &url, Some(body)).await
    }

    /// POST an RPC envelope to `{base}/jsonrpc` and classify the reply.
    pub async fn call(&self, request: &RpcRequest) -> Result<RpcResponse, ProbeError> {
        let reply = self.post_json(JSONRPC_PATH, &request.to_value()).await?;
        Ok(RpcResponse::classify(reply))
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Value, ProbeError> {
        debug!(%method, url, "sending request");
        let started = Instant::now();

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await.map_err(|source| ProbeError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = resp.status();
        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        if !status.is_success() {
            return Err(ProbeError::Status {
                url: url.to_string(),
                status,
            });
        }

        let text = resp.text().await.map_err(|source| ProbeError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_str(&text).map_err(|source| ProbeError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
