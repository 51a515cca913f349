//! Tool configuration.
//!
//! Logging settings come from the environment and may be overridden on the
//! command line. Logs always go to stderr; stdout is reserved for reports.

use std::env;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use wrf_common::WrfError;

pub const LOG_LEVEL_ENV: &str = "NESTWRF_LOG_LEVEL";
pub const LOG_FORMAT_ENV: &str = "NESTWRF_LOG_FORMAT";

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = WrfError;

    fn from_str(s: &str) -> Result<Self, WrfError> {
        match s.trim().to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(WrfError::configuration(format!(
                "unknown log format '{}', expected 'text' or 'json'",
                other
            ))),
        }
    }
}

/// Runtime settings shared by the command-line tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Filter directive, e.g. `warn` or `nest_geometry=debug`
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ToolConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let log_level = lookup(LOG_LEVEL_ENV).unwrap_or(defaults.log_level);
        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(v) => v.parse::<LogFormat>().with_context(|| format!("invalid {}", LOG_FORMAT_ENV))?,
            None => defaults.log_format,
        };

        Ok(Self {
            log_level,
            log_format,
        })
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, log_level: Option<String>, log_format: Option<LogFormat>) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(format) = log_format {
            self.log_format = format;
        }
        self
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level when set.
    pub fn init_logging(&self) -> Result<()> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&self.log_level).map_err(|e| {
                WrfError::configuration(format!("invalid log level '{}': {}", self.log_level, e))
            })?,
        };

        let builder = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true);

        match self.log_format {
            LogFormat::Text => builder.try_init(),
            LogFormat::Json => builder.json().try_init(),
        }
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
    }
}
