//! Configuration section types.

use serde::{Deserialize, Serialize};

use ariadne_telemetry::LogConfig;

fn default_true() -> bool {
    true
}

/// API section: where the route table is mounted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Path prefix stripped before route matching (e.g. "/v3"). Empty for none.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,

    /// Service name reported in logs.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            mount_path: default_mount_path(),
            service_name: default_service_name(),
        }
    }
}

fn default_mount_path() -> String {
    "/v3".to_string()
}

fn default_service_name() -> String {
    "ariadne".to_string()
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive (e.g. "info", "ariadne_router=debug").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the subscriber settings used by `init_logging`.
    pub fn to_log_config(&self) -> LogConfig {
        let base = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            ansi: self.ansi_enabled,
            ..base
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where one job identifier is delivered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JobConfig {
    /// Queue name.
    pub queue: String,

    /// Worker class.
    pub class: String,
}

impl JobConfig {
    /// Creates a job entry.
    pub fn new(queue: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            class: class.into(),
        }
    }
}
