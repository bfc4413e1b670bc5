//! Parameter error types.

use ariadne_core::ApiError;
use ariadne_jobs::JobError;
use http::StatusCode;
use thiserror::Error;

/// Result type for parameter operations.
pub type ParamsResult<T> = Result<T, ParamsError>;

/// Errors raised while building a parameter bag or resolving fields.
///
/// # Example
///
/// ```rust
/// use ariadne_params::ParamsError;
/// use http::StatusCode;
///
/// let err = ParamsError::missing("request.branch");
/// assert_eq!(err.to_string(), "missing request.branch");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.error_type(), "wrong_params");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// A required field resolved to no value, `null` or `false`.
    #[error("missing {0}")]
    MissingParameter(String),

    /// A value has a shape the operation cannot use.
    #[error("{0}")]
    WrongParams(String),

    /// The query string could not be parsed.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The request body is not a JSON object.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Job handoff failed.
    #[error(transparent)]
    Job(#[from] JobError),
}

impl ParamsError {
    /// Creates a missing parameter error for a qualified field name.
    pub fn missing(qualified: impl Into<String>) -> Self {
        Self::MissingParameter(qualified.into())
    }

    /// Creates a wrong params error.
    pub fn wrong_params(message: impl Into<String>) -> Self {
        Self::WrongParams(message.into())
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Job(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the machine-readable error type.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Job(_) => "internal",
            _ => "wrong_params",
        }
    }
}

impl From<ParamsError> for ApiError {
    fn from(err: ParamsError) -> Self {
        match err {
            ParamsError::MissingParameter(field) => ApiError::missing_field(field),
            ParamsError::WrongParams(message) => ApiError::wrong_params(message),
            ParamsError::InvalidQuery(_) | ParamsError::InvalidBody(_) => {
                ApiError::wrong_params(err.to_string())
            }
            ParamsError::Job(job) => job.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_core::ErrorCategory;

    #[test]
    fn test_missing_parameter() {
        let err = ParamsError::missing("request.branch");
        assert_eq!(err.to_string(), "missing request.branch");

        let api: ApiError = err.into();
        assert_eq!(api.category(), ErrorCategory::WrongParams);
        assert_eq!(api.subject(), Some("request.branch"));
        assert_eq!(api.to_string(), "missing request.branch");
    }

    #[test]
    fn test_wrong_params() {
        let err = ParamsError::wrong_params("wrong parameters");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let api: ApiError = err.into();
        assert_eq!(api.error_type(), "wrong_params");
    }

    #[test]
    fn test_invalid_body() {
        let err = ParamsError::InvalidBody("expected a JSON object".into());
        assert_eq!(err.error_type(), "wrong_params");
        let api: ApiError = err.into();
        assert!(api.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_job_error_is_internal() {
        let err: ParamsError = JobError::NotConfigured.into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "internal");
        assert_eq!(err.to_string(), "no job registry configured");

        let api: ApiError = err.into();
        assert_eq!(api.category(), ErrorCategory::Internal);
    }
}
