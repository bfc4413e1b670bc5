//! # Ariadne
//!
//! **Route DSL and typed parameter binding for versioned HTTP APIs**
//!
//! Ariadne sits between an HTTP transport and the handlers of a resource
//! oriented API:
//!
//! - **Routes** are declared as a tree of resources with `{resource.field}`
//!   placeholders, alternations and capture constraints, compiled once into
//!   an ordered [`RouteTable`]
//! - **Parameters** from path captures, query string and JSON body are merged
//!   into one [`ParameterBag`] and read through accessors declared with
//!   [`resource_params!`], which accept qualified, nested or bare keys
//! - **Jobs** are handed off to an injected [`JobClient`] by identifier
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ariadne::prelude::*;
//! use ariadne::v3::RequestParams;
//! use http::{Method, Uri};
//! use serde_json::json;
//!
//! let client = Arc::new(RecordingClient::new());
//! let dispatcher = ariadne::v3::dispatcher(&AriadneConfig::default(), client.clone()).unwrap();
//!
//! let uri: Uri = "/v3/repo/1/requests".parse().unwrap();
//! let binding = dispatcher
//!     .bind(&Method::POST, &uri, br#"{"branch": "example"}"#)
//!     .unwrap();
//! assert_eq!(binding.handler_id(), "requests#create");
//!
//! let params = RequestParams::from(binding.into_resolver());
//! assert_eq!(params.branch(), Some(json!("example")));
//!
//! params.create(json!({"id": 1}), json!({"id": 2})).unwrap();
//! assert_eq!(client.jobs()[0].queue, "build_requests");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ariadne-router ──▶ RouteTable ─┐
//!                                ├─▶ Dispatcher::bind ──▶ Binding { route, Resolver }
//! ariadne-params ──▶ ParameterBag┘                                     │
//!                                                   resource_params! accessors
//!                                                                      │
//! ariadne-jobs ◀──────────────── perform_async ◀───────────────────────┘
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod dispatch;
pub mod v3;

pub use ariadne_config as config;
pub use ariadne_core as core;
pub use ariadne_jobs as jobs;
pub use ariadne_params as params;
pub use ariadne_router as router;
pub use ariadne_telemetry as telemetry;

pub use ariadne_config::{AriadneConfig, ConfigError, ConfigLoader};
pub use ariadne_core::{ApiError, ApiResult, ErrorCategory, ResourceType};
pub use ariadne_jobs::{Job, JobClient, JobError, JobId, JobSpec, Jobs, RecordingClient};
pub use ariadne_params::{
    resource_params, Field, ParameterBag, ParamsError, Resolver, UserCondition,
};
pub use ariadne_router::{Capture, CompiledRoute, Resource, RouteError, RouteMatch, RouteTable};
pub use dispatch::{Binding, Dispatcher};

/// Initializes logging from `config` and registers metric descriptions.
///
/// # Errors
///
/// Returns `TelemetryError` if the log level is invalid or a global
/// subscriber is already installed.
pub fn init_telemetry(config: &AriadneConfig) -> Result<(), ariadne_telemetry::TelemetryError> {
    ariadne_telemetry::init_logging(&config.logging.to_log_config())?;
    ariadne_telemetry::metrics::describe_metrics();
    tracing::info!(
        service = %config.api.service_name,
        mount_path = %config.api.mount_path,
        "telemetry initialized"
    );
    Ok(())
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use ariadne::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        resource_params, ApiError, ApiResult, AriadneConfig, Binding, Capture, ConfigLoader,
        Dispatcher, ErrorCategory, Field, JobClient, ParameterBag, ParamsError, RecordingClient,
        Resolver, Resource, RouteTable,
    };
}
