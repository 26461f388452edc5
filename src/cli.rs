//! Command-line surface.

use crate::config::{TesterConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::ConfigError;
use crate::telemetry::{validate_filter, DEFAULT_LOG_LEVEL};
use clap::Parser;
use std::io::IsTerminal;

pub const USAGE_EXAMPLE: &str =
    "Example: weather-agent-tester https://your-weather-agent.herokuapp.com";

/// Smoke-test an A2A weather agent over HTTP and JSON-RPC.
#[derive(Debug, Parser)]
#[command(name = "weather-agent-tester", version, about)]
pub struct Cli {
    /// Base URL of the agent, e.g. https://your-weather-agent.herokuapp.com
    pub agent_url: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Also probe the extended agent cards and the agent status methods
    #[arg(long)]
    pub extended: bool,

    /// Disable colored status tags
    #[arg(long)]
    pub no_color: bool,

    /// Diagnostic log filter written to stderr (e.g. debug, weather_agent_tester=trace)
    #[arg(long, value_name = "FILTER", default_value = DEFAULT_LOG_LEVEL, value_parser = validate_filter)]
    pub log_level: String,
}

impl Cli {
    pub fn into_config(self) -> Result<TesterConfig, ConfigError> {
        let color = !self.no_color && std::io::stdout().is_terminal();
        Ok(TesterConfig::new(&self.agent_url)?
            .with_timeout_secs(self.timeout)?
            .with_color(color)
            .with_extended(self.extended))
    }
}
