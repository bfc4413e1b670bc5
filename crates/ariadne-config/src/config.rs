//! Main configuration types.
//!
//! This module provides the top-level [`AriadneConfig`] struct and its builder.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ApiConfig, ConfigError, JobConfig, LogFormat, LoggingConfig};

/// Identifier of the job enqueued when a build request is created.
pub const BUILD_REQUEST_JOB: &str = "build_request";

/// Complete Ariadne configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load configuration from files
/// and environment variables.
///
/// # Example
///
/// ```
/// use ariadne_config::AriadneConfig;
///
/// let config = AriadneConfig::default();
/// assert_eq!(config.api.mount_path, "/v3");
/// assert_eq!(config.jobs["build_request"].queue, "build_requests");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AriadneConfig {
    /// API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Background jobs by identifier.
    #[serde(default = "default_jobs")]
    pub jobs: BTreeMap<String, JobConfig>,
}

impl Default for AriadneConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            logging: LoggingConfig::default(),
            jobs: default_jobs(),
        }
    }
}

fn default_jobs() -> BTreeMap<String, JobConfig> {
    let mut jobs = BTreeMap::new();
    jobs.insert(
        BUILD_REQUEST_JOB.to_string(),
        JobConfig::new("build_requests", "Travis::Sidekiq::BuildRequest"),
    );
    jobs
}

impl AriadneConfig {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```
    /// use ariadne_config::{ApiConfig, AriadneConfig};
    ///
    /// let config = AriadneConfig::builder()
    ///     .api(ApiConfig {
    ///         mount_path: "/api".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .build();
    ///
    /// assert_eq!(config.api.mount_path, "/api");
    /// ```
    #[must_use]
    pub fn builder() -> AriadneConfigBuilder {
        AriadneConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the mount path is non-empty and does not start with `/`, or ends with `/`
    /// - the log level is not a valid filter directive
    /// - a job has an empty queue or class
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mount = &self.api.mount_path;
        if !mount.is_empty() {
            if !mount.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "api.mount_path",
                    format!("must start with '/': {mount}"),
                ));
            }
            if mount.ends_with('/') {
                return Err(ConfigError::invalid_value(
                    "api.mount_path",
                    format!("must not end with '/': {mount}"),
                ));
            }
        }

        if let Err(e) = ariadne_telemetry::logging::create_env_filter(&self.logging.level) {
            return Err(ConfigError::invalid_value("logging.level", e.to_string()));
        }

        for (identifier, job) in &self.jobs {
            if job.queue.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("jobs.{identifier}.queue"),
                    "must not be empty",
                ));
            }
            if job.class.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    format!("jobs.{identifier}.class"),
                    "must not be empty",
                ));
            }
        }

        Ok(())
    }

    /// Create a development configuration preset.
    ///
    /// Pretty, colored logs at debug level with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                ansi_enabled: true,
                include_location: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Create a production configuration preset.
    ///
    /// JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Json,
                ansi_enabled: false,
                include_location: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Builder for [`AriadneConfig`].
#[derive(Debug, Default)]
pub struct AriadneConfigBuilder {
    api: Option<ApiConfig>,
    logging: Option<LoggingConfig>,
    jobs: Option<BTreeMap<String, JobConfig>>,
}

impl AriadneConfigBuilder {
    /// Create a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API configuration.
    #[must_use]
    pub fn api(mut self, api: ApiConfig) -> Self {
        self.api = Some(api);
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// Add or replace one job. The first call starts from the default jobs.
    #[must_use]
    pub fn job(mut self, identifier: impl Into<String>, job: JobConfig) -> Self {
        self.jobs
            .get_or_insert_with(default_jobs)
            .insert(identifier.into(), job);
        self
    }

    /// Build the configuration.
    ///
    /// Any unset sections will use their default values.
    #[must_use]
    pub fn build(self) -> AriadneConfig {
        AriadneConfig {
            api: self.api.unwrap_or_default(),
            logging: self.logging.unwrap_or_default(),
            jobs: self.jobs.unwrap_or_else(default_jobs),
        }
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build_validated(self) -> Result<AriadneConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }
}
