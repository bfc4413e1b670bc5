//! Typed configuration for Ariadne.
//!
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! [`AriadneConfig`] holds three sections:
//!
//! - [`ApiConfig`] - where the route table is mounted
//! - [`LoggingConfig`] - subscriber settings, see [`LoggingConfig::to_log_config`]
//! - `jobs` - background job identifiers mapped to a [`JobConfig`]
//!
//! # Example
//!
//! ```no_run
//! use ariadne_config::ConfigLoader;
//!
//! # fn main() -> Result<(), ariadne_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_optional_file("ariadne.toml")?
//!     .with_env_prefix("ARIADNE")
//!     .load()?;
//!
//! println!("mounted at {}", config.api.mount_path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! mount_path = "/v3"
//! service_name = "ariadne"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//!
//! [jobs.build_request]
//! queue = "build_requests"
//! class = "Travis::Sidekiq::BuildRequest"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY` variables:
//!
//! - `ARIADNE__API__MOUNT_PATH=/api/v3`
//! - `ARIADNE__LOGGING__LEVEL=debug`
//! - `ARIADNE__JOBS__BUILD_REQUEST__QUEUE=builds`

mod config;
mod error;
mod loader;
mod schema;

pub use config::{AriadneConfig, AriadneConfigBuilder, BUILD_REQUEST_JOB};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::{ApiConfig, JobConfig, LogFormat, LoggingConfig};
