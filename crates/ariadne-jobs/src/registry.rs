//! Job registry.
//!
//! Maps job identifiers (e.g. `build_request`) to where they are delivered
//! and hands built jobs to the injected [`JobClient`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ariadne_telemetry::metrics::record_job_enqueued;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::JobClient;
use crate::error::{JobError, JobResult};
use crate::job::{Job, JobId, JobSpec};

/// Registered job handles plus the client that delivers them.
///
/// Built once at startup and shared behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use ariadne_jobs::{Jobs, JobSpec, RecordingClient};
/// use serde_json::json;
///
/// let client = Arc::new(RecordingClient::new());
/// let jobs = Jobs::new(client.clone())
///     .register("build_request", JobSpec::new("build_requests", "BuildRequest"))
///     .unwrap();
///
/// jobs.perform_async("build_request", vec![json!({"type": "api"})]).unwrap();
/// assert_eq!(client.jobs()[0].class, "BuildRequest");
/// ```
#[derive(Clone)]
pub struct Jobs {
    specs: HashMap<String, JobSpec>,
    client: Arc<dyn JobClient>,
}

impl Jobs {
    /// Creates an empty registry delivering through `client`.
    pub fn new(client: Arc<dyn JobClient>) -> Self {
        Self {
            specs: HashMap::new(),
            client,
        }
    }

    /// Registers a job handle.
    ///
    /// # Errors
    ///
    /// Returns `JobError::InvalidSpec` if the spec has an empty queue or class.
    pub fn register(mut self, identifier: impl Into<String>, spec: JobSpec) -> JobResult<Self> {
        let identifier = identifier.into();
        spec.validate(&identifier)?;
        self.specs.insert(identifier, spec);
        Ok(self)
    }

    /// Registers every handle in `specs`.
    ///
    /// # Errors
    ///
    /// Returns the first `JobError::InvalidSpec` encountered.
    pub fn register_all<I, K>(self, specs: I) -> JobResult<Self>
    where
        I: IntoIterator<Item = (K, JobSpec)>,
        K: Into<String>,
    {
        specs
            .into_iter()
            .try_fold(self, |jobs, (identifier, spec)| jobs.register(identifier, spec))
    }

    /// Returns the spec registered under `identifier`.
    pub fn get(&self, identifier: &str) -> Option<&JobSpec> {
        self.specs.get(identifier)
    }

    /// Returns true if `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.specs.contains_key(identifier)
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Returns true if no handles are registered.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Builds a job for `identifier` and pushes it to the client.
    ///
    /// # Errors
    ///
    /// Returns `JobError::UnknownJob` if nothing is registered under
    /// `identifier`, or whatever the client returns.
    pub fn perform_async(&self, identifier: &str, args: Vec<Value>) -> JobResult<JobId> {
        let spec = self.get(identifier).ok_or_else(|| {
            warn!(job = identifier, "unknown job");
            JobError::unknown_job(identifier)
        })?;

        let job = Job::new(spec, args);
        let jid = job.jid;
        self.client.push(job)?;

        debug!(job = identifier, jid = %jid, queue = %spec.queue, "job enqueued");
        record_job_enqueued(identifier);
        Ok(jid)
    }
}

impl fmt::Debug for Jobs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jobs")
            .field("specs", &self.specs)
            .finish_non_exhaustive()
    }
}
