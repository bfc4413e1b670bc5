//! Observability for Ariadne.
//!
//! - **Logging**: structured JSON or pretty output via `tracing-subscriber`
//! - **Metrics**: route, parameter and job counters via the `metrics` crate
//!
//! Library crates only emit `tracing` events and `metrics` counters; the
//! process embedding them decides where those go.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `ariadne_route_matches_total` | Counter | `resource`, `action` | Requests matched to a route |
//! | `ariadne_route_misses_total` | Counter | - | Requests no route matched |
//! | `ariadne_params_missing_total` | Counter | `param` | Required parameters that were absent |
//! | `ariadne_jobs_enqueued_total` | Counter | `job` | Jobs handed off to a queue |
//!
//! # Example
//!
//! ```rust,ignore
//! use ariadne_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::production())?;
//! ariadne_telemetry::metrics::describe_metrics();
//! ```

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
