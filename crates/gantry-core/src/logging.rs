//! Logging setup.
//!
//! The registry reports what it does through `tracing` events. This module
//! installs a `tracing-subscriber` formatter for processes that do not bring
//! their own.
//!
//! # Configuration
//!
//! ```
//! use gantry_core::logging::{self, LogConfig, LogLevel};
//!
//! let config = LogConfig::new()
//!     .level(LogLevel::Debug)   // Minimum level to emit
//!     .json_output(false)       // Compact text instead of JSON
//!     .include_target(true);    // Include module path
//!
//! logging::init(&config);
//! ```
//!
//! `RUST_LOG`, when set, takes precedence over the configured level.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Log levels, from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, for detailed debugging.
    Trace,
    /// Debug information, not shown in production.
    Debug,
    /// General information about normal operation.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// A failure.
    Error,
}

impl LogLevel {
    /// Returns the level as a lowercase string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level `{0}`")]
pub struct ParseLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Configuration for the process-wide subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Minimum log level to emit.
    pub min_level: LogLevel,
    /// Whether to output JSON (true) or compact format (false).
    pub json_output: bool,
    /// Whether to include the target module path.
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            json_output: true,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Sets whether to output JSON format.
    #[must_use]
    pub fn json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Sets whether to include the target module path.
    #[must_use]
    pub fn include_target(mut self, include: bool) -> Self {
        self.include_target = include;
        self
    }

    /// Verbose, compact output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            min_level: LogLevel::Debug,
            json_output: false,
            include_target: true,
        }
    }

    /// Info and above, JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Everything, compact output without targets.
    #[must_use]
    pub fn testing() -> Self {
        Self {
            min_level: LogLevel::Trace,
            json_output: false,
            include_target: false,
        }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.min_level.as_str()))
    }
}

/// Installs the global subscriber described by `config`.
///
/// Safe to call multiple times: only the first call in a process installs a
/// subscriber. Returns true if this call installed it.
pub fn init(config: &LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.include_target);

    let installed = if config.json_output {
        builder.json().try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    };
    if installed {
        tracing::debug!(level = %config.min_level, json = config.json_output, "logging initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn levels_are_ordered() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Warn < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_string(), "warn");
    }

    #[test]
    fn parse_level_names() {
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn level_deserializes_lowercase() {
        let level: LogLevel = serde_json::from_str(r#""debug""#).unwrap();
        assert_eq!(level, LogLevel::Debug);
    }

    #[test]
    fn presets() {
        assert_eq!(LogConfig::production(), LogConfig::default());
        assert!(!LogConfig::development().json_output);
        assert_eq!(LogConfig::testing().min_level, LogLevel::Trace);
    }

    #[test]
    #[serial]
    fn init_is_idempotent() {
        init(&LogConfig::testing());
        assert!(!init(&LogConfig::testing()));
        assert!(!init(&LogConfig::production()));
    }
}
