//! Job submission clients.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{JobError, JobResult};
use crate::job::Job;

/// Pushes built jobs to a queue backend.
///
/// Implementations must be cheap to call from a request path; delivery
/// guarantees are the backend's concern.
pub trait JobClient: Send + Sync {
    /// Pushes a job.
    fn push(&self, job: Job) -> JobResult<()>;
}

impl<T: JobClient + ?Sized> JobClient for Arc<T> {
    fn push(&self, job: Job) -> JobResult<()> {
        (**self).push(job)
    }
}

/// A client that records pushed jobs in memory.
///
/// # Example
///
/// ```rust
/// use ariadne_jobs::{Job, JobClient, JobSpec, RecordingClient};
///
/// let client = RecordingClient::new();
/// client.push(Job::new(&JobSpec::new("default", "Noop"), vec![])).unwrap();
/// assert_eq!(client.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingClient {
    jobs: Mutex<Vec<Job>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingClient {
    /// Creates an empty recording client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent push fail with `reason`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.fail_with.lock() = Some(reason.into());
    }

    /// Returns a copy of the recorded jobs, oldest first.
    pub fn jobs(&self) -> Vec<Job> {
        self.jobs.lock().clone()
    }

    /// Removes and returns the recorded jobs.
    pub fn take(&self) -> Vec<Job> {
        std::mem::take(&mut *self.jobs.lock())
    }

    /// Number of recorded jobs.
    pub fn len(&self) -> usize {
        self.jobs.lock().len()
    }

    /// Returns true if nothing was pushed.
    pub fn is_empty(&self) -> bool {
        self.jobs.lock().is_empty()
    }
}

impl JobClient for RecordingClient {
    fn push(&self, job: Job) -> JobResult<()> {
        if let Some(reason) = self.fail_with.lock().as_ref() {
            return Err(JobError::push_failed(reason.clone()));
        }
        self.jobs.lock().push(job);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobSpec;
    use serde_json::json;

    fn job(arg: i64) -> Job {
        Job::new(&JobSpec::new("default", "Noop"), vec![json!(arg)])
    }

    #[test]
    fn test_records_in_order() {
        let client = RecordingClient::new();
        assert!(client.is_empty());

        client.push(job(1)).unwrap();
        client.push(job(2)).unwrap();

        let args: Vec<_> = client.jobs().into_iter().map(|j| j.args[0].clone()).collect();
        assert_eq!(args, vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_take_drains() {
        let client = RecordingClient::new();
        client.push(job(1)).unwrap();
        assert_eq!(client.take().len(), 1);
        assert!(client.is_empty());
    }

    #[test]
    fn test_fail_with() {
        let client = RecordingClient::new();
        client.fail_with("redis down");
        let err = client.push(job(1)).unwrap_err();
        assert_eq!(err, JobError::push_failed("redis down"));
        assert!(client.is_empty());
    }

    #[test]
    fn test_arc_client() {
        let client = Arc::new(RecordingClient::new());
        let shared: Arc<dyn JobClient> = client.clone();
        shared.push(job(1)).unwrap();
        assert_eq!(client.len(), 1);
    }
}
