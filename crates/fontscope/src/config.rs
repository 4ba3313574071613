//! Scraper configuration.
//!
//! Every field has a default, so an empty TOML file is a valid
//! configuration. Command line flags are applied on top of whatever the
//! file provides.
//!
//! ```toml
//! timeout_secs = 15
//! delay_ms = 250
//! include_system = false
//! ```

use std::path::Path;
use std::time::Duration;

use fontscope_core::AnalyzeOptions;
use fontscope_net::http::DEFAULT_USER_AGENT;
use fontscope_net::{HttpClientConfig, RetryConfig};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScraperConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Pause between consecutive requests in milliseconds.
    pub delay_ms: u64,
    /// Retries for timeouts, connection failures, `429` and `5xx`.
    pub max_retries: u32,
    /// Report system fonts.
    pub include_system: bool,
    /// Do not follow `@import` rules.
    pub skip_external: bool,
    /// Longest `@import` chain followed from a page stylesheet.
    pub max_import_depth: usize,
    /// Sites analyzed at once in a batch.
    pub concurrency: usize,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            delay_ms: 1000,
            max_retries: 2,
            include_system: true,
            skip_external: false,
            max_import_depth: 3,
            concurrency: 4,
        }
    }
}

impl ScraperConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&text).map_err(|err| match err {
            Error::Config(message) => Error::config(format!("{}: {message}", path.display())),
            other => other,
        })
    }

    /// Reject values that would stall a scan.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        if self.concurrency == 0 {
            return Err(Error::config("concurrency must be at least 1"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::config("user_agent must not be empty"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Settings for the HTTP client.
    pub fn to_http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            timeout: Some(self.timeout()),
            connect_timeout: Some(Duration::from_secs(self.connect_timeout_secs)),
            user_agent: Some(self.user_agent.clone()),
            request_delay: self.request_delay(),
            retry: RetryConfig {
                max_retries: self.max_retries,
                ..RetryConfig::default()
            },
            ..HttpClientConfig::default()
        }
    }

    /// Filters applied to the merged font list.
    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            include_system: self.include_system,
        }
    }
}
