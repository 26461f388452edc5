//! Error taxonomy for probes and configuration.
//!
//! Every failure a probe can observe maps onto one [`FailureKind`]. Probes
//! handle these locally; nothing here propagates past the probe that saw it.

use crate::rpc::RpcError;
use reqwest::StatusCode;
use std::fmt;
use thiserror::Error;

/// Coarse classification used in reports and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection error, timeout, or non-2xx status.
    TransportFailure,
    /// 2xx response whose body is not JSON.
    DecodeFailure,
    /// The service answered with an RPC-level `error` envelope.
    ProtocolError,
    /// The service reported an application error inside `result`.
    ValidationError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::TransportFailure => "TransportFailure",
            FailureKind::DecodeFailure => "DecodeFailure",
            FailureKind::ProtocolError => "ProtocolError",
            FailureKind::ValidationError => "ValidationError",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url}: HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("{url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Protocol(RpcError),

    #[error("{message}")]
    Validation {
        message: String,
        code: Option<String>,
    },
}

impl ProbeError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProbeError::Transport { .. } | ProbeError::Status { .. } => {
                FailureKind::TransportFailure
            }
            ProbeError::Decode { .. } => FailureKind::DecodeFailure,
            ProbeError::Protocol(_) => FailureKind::ProtocolError,
            ProbeError::Validation { .. } => FailureKind::ValidationError,
        }
    }
}

/// Invalid invocation: the tester cannot start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid agent URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("timeout must be at least one second")]
    ZeroTimeout,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
