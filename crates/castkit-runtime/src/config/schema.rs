//! Configuration schema definitions.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use castkit_framework::ResolverOptions;
use castkit_core::DEFAULT_MALFORMED_REQUEST_PREFIX;
use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CastkitConfig {
    /// Type resolver settings.
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

// =============================================================================
// Resolver
// =============================================================================

/// Settings applied when the built-in catalog is installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Whether entity casters accept substring matches.
    #[serde(default = "default_partial_matching")]
    pub partial_matching: bool,

    /// Error message prefix that aborts a guild-wide message search.
    #[serde(default = "default_malformed_request_prefix")]
    pub malformed_request_prefix: String,

    /// Built-in type names that are not registered.
    #[serde(default)]
    pub disabled_types: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            partial_matching: default_partial_matching(),
            malformed_request_prefix: default_malformed_request_prefix(),
            disabled_types: Vec::new(),
        }
    }
}

impl ResolverConfig {
    /// Converts to the framework's resolver options.
    pub fn to_options(&self) -> ResolverOptions {
        ResolverOptions {
            partial_matching: self.partial_matching,
            malformed_request_prefix: self.malformed_request_prefix.clone(),
            disabled_types: self.disabled_types.clone(),
        }
    }
}

fn default_partial_matching() -> bool {
    true
}

fn default_malformed_request_prefix() -> String {
    DEFAULT_MALFORMED_REQUEST_PREFIX.to_string()
}

// =============================================================================
// Logging
// =============================================================================

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Every level name, most verbose first.
    pub const NAMES: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];

    /// Returns the level name as used in filter directives.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to a `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(s.to_string()),
        }
    }
}

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
    /// Requires the `json-log` feature.
    Json,
}

/// Where log lines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

/// How often the log file is rolled over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    #[default]
    Never,
    Hourly,
    Daily,
}

/// Which span lifecycle events are logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEventConfig {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub enter: bool,
    #[serde(default)]
    pub exit: bool,
    #[serde(default)]
    pub close: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Global log level.
    #[serde(default)]
    pub level: LogLevel,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub output: LogOutput,

    /// Log file, used when `output = "file"`.
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    #[serde(default)]
    pub rotation: LogRotation,

    #[serde(default)]
    pub span_events: SpanEventConfig,

    /// Per-target level overrides, e.g. `castkit_framework = "trace"`.
    ///
    /// Values are kept as strings so that [`validate_config`] can name the
    /// offending target.
    ///
    /// [`validate_config`]: super::validate_config
    #[serde(default)]
    pub filters: HashMap<String, String>,

    #[serde(default)]
    pub thread_ids: bool,

    /// Include file name and line number.
    #[serde(default)]
    pub file_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            rotation: LogRotation::Never,
            span_events: SpanEventConfig::default(),
            filters: HashMap::new(),
            thread_ids: false,
            file_location: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: CastkitConfig = serde_json::from_str("{}").unwrap();
        assert!(config.resolver.partial_matching);
        assert_eq!(config.resolver.malformed_request_prefix, DEFAULT_MALFORMED_REQUEST_PREFIX);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_deserialize_sections() {
        let config: CastkitConfig = serde_json::from_str(
            r#"{
                "resolver": { "partial_matching": false, "disabled_types": ["invite"] },
                "logging": {
                    "level": "debug",
                    "format": "pretty",
                    "filters": { "castkit_framework": "trace" }
                }
            }"#,
        )
        .unwrap();

        let options = config.resolver.to_options();
        assert!(!options.partial_matching);
        assert_eq!(options.disabled_types, vec!["invite".to_string()]);
        assert_eq!(options.malformed_request_prefix, DEFAULT_MALFORMED_REQUEST_PREFIX);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.filters["castkit_framework"], "trace");
    }

    #[test]
    fn test_unknown_level_fails_to_parse() {
        let result = serde_json::from_str::<LoggingConfig>(r#"{ "level": "loud" }"#);
        assert!(result.is_err());
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
