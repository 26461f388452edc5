//! Smoke-test client for A2A weather agents.
//!
//! Runs a fixed, sequential battery of REST and JSON-RPC probes against one
//! agent base URL and reports a pass/fail summary. See [`runner::Tester`].

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod http;
pub mod probes;
pub mod rpc;
pub mod runner;
pub mod telemetry;

pub use config::TesterConfig;
pub use console::Console;
pub use error::{ConfigError, FailureKind, ProbeError};
pub use runner::{TestRunSummary, Tester};
