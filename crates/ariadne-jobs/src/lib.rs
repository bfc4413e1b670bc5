//! # Ariadne Jobs
//!
//! Background job handoff for Ariadne request handlers.
//!
//! Handlers never run background work themselves; they push a [`Job`] to a
//! queue under a registered identifier and return. This crate provides:
//!
//! 1. **Registry** ([`Jobs`]): identifier → [`JobSpec`] (queue and worker class)
//! 2. **Client** ([`JobClient`]): the injected transport that delivers jobs
//! 3. **Test double** ([`RecordingClient`]): records pushed jobs in memory
//!
//! ```rust
//! use std::sync::Arc;
//! use ariadne_jobs::{Jobs, JobSpec, RecordingClient};
//! use serde_json::json;
//!
//! let client = Arc::new(RecordingClient::new());
//! let jobs = Jobs::new(client.clone())
//!     .register("build_request", JobSpec::new("build_requests", "BuildRequest"))
//!     .unwrap();
//!
//! let jid = jobs.perform_async("build_request", vec![json!({"type": "api"})]).unwrap();
//! assert_eq!(client.jobs()[0].jid, jid);
//! ```

mod client;
mod error;
mod job;
mod registry;

pub use client::{JobClient, RecordingClient};
pub use error::{JobError, JobResult};
pub use job::{Job, JobId, JobSpec};
pub use registry::Jobs;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::client::{JobClient, RecordingClient};
    pub use crate::error::{JobError, JobResult};
    pub use crate::job::{Job, JobId, JobSpec};
    pub use crate::registry::Jobs;
}
