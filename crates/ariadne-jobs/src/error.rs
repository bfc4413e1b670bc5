//! Error types for job handoff.

use ariadne_core::ApiError;
use thiserror::Error;

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Errors that can occur while handing a job off to a queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    /// No job is registered under the identifier.
    #[error("unknown job: {0}")]
    UnknownJob(String),

    /// The resolver has no job registry.
    #[error("no job registry configured")]
    NotConfigured,

    /// A job specification is invalid.
    #[error("invalid job spec for {identifier}: {reason}")]
    InvalidSpec {
        /// Job identifier.
        identifier: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The client failed to push the job.
    #[error("failed to push job: {0}")]
    PushFailed(String),
}

impl JobError {
    /// Create an unknown job error.
    pub fn unknown_job(identifier: impl Into<String>) -> Self {
        Self::UnknownJob(identifier.into())
    }

    /// Create an invalid spec error.
    pub fn invalid_spec(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }

    /// Create a push failed error.
    pub fn push_failed(reason: impl Into<String>) -> Self {
        Self::PushFailed(reason.into())
    }

    /// Check if the push may succeed when retried.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::PushFailed(_))
    }
}

impl From<JobError> for ApiError {
    fn from(err: JobError) -> Self {
        ApiError::internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_core::ErrorCategory;

    #[test]
    fn test_error_constructors() {
        let _ = JobError::unknown_job("build_request");
        let _ = JobError::invalid_spec("build_request", "empty queue");
        let _ = JobError::push_failed("connection refused");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(JobError::push_failed("timeout").is_recoverable());
        assert!(!JobError::unknown_job("nope").is_recoverable());
        assert!(!JobError::NotConfigured.is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = JobError::invalid_spec("build_request", "empty queue");
        assert_eq!(err.to_string(), "invalid job spec for build_request: empty queue");
    }

    #[test]
    fn test_into_api_error() {
        let api: ApiError = JobError::unknown_job("nope").into();
        assert_eq!(api.category(), ErrorCategory::Internal);
    }
}
