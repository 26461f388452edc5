//! Tester configuration. Built from the command line only; there are no
//! config files or environment overrides.

use crate::error::ConfigError;
use reqwest::Url;
use std::time::Duration;

/// Per-request timeout when `--timeout` is not given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const USER_AGENT: &str = "A2A-Weather-Agent-Tester/1.0";

#[derive(Debug, Clone)]
pub struct TesterConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub color: bool,
    /// Also probe the extended cards and agent status methods.
    pub extended: bool,
}

impl TesterConfig {
    pub fn new(agent_url: &str) -> Result<Self, ConfigError> {
        let trimmed = agent_url.trim();
        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: USER_AGENT.to_string(),
            color: false,
            extended: false,
        })
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_extended(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}
