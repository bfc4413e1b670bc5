//! Job identity and payload types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{JobError, JobResult};

/// Unique identifier for an enqueued job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a new, time-ordered job ID.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for JobId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Where a job identifier is delivered: a queue and a worker class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    /// Queue name.
    pub queue: String,
    /// Worker class that picks the job up.
    pub class: String,
}

impl JobSpec {
    /// Creates a job spec.
    pub fn new(queue: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            queue: queue.into(),
            class: class.into(),
        }
    }

    /// Checks that queue and class are set.
    pub fn validate(&self, identifier: &str) -> JobResult<()> {
        if self.queue.trim().is_empty() {
            return Err(JobError::invalid_spec(identifier, "queue must not be empty"));
        }
        if self.class.trim().is_empty() {
            return Err(JobError::invalid_spec(identifier, "class must not be empty"));
        }
        Ok(())
    }
}

/// A job ready to be pushed to a queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job ID.
    pub jid: JobId,
    /// Queue name.
    pub queue: String,
    /// Worker class.
    pub class: String,
    /// Positional arguments.
    pub args: Vec<Value>,
    /// When the job was built.
    pub enqueued_at: DateTime<Utc>,
}

impl Job {
    /// Builds a job for `spec` with fresh ID and timestamp.
    pub fn new(spec: &JobSpec, args: Vec<Value>) -> Self {
        Self {
            jid: JobId::new(),
            queue: spec.queue.clone(),
            class: spec.class.clone(),
            args,
            enqueued_at: Utc::now(),
        }
    }
}
