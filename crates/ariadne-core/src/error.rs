//! Error types shared across Ariadne.
//!
//! Every crate in the workspace has its own error enum. Those errors all
//! convert into [`ApiError`], which is what a dispatcher hands back to the
//! transport layer. An [`ApiError`] knows its [`ErrorCategory`], the HTTP
//! status code that category maps to, and the machine-readable `error_type`
//! used by API clients.
//!
//! | `ErrorCategory` | Status | `error_type` |
//! |---|---|---|
//! | `NotFound` | 404 | `not_found` |
//! | `WrongParams` | 400 | `wrong_params` |
//! | `Internal` | 500 | `internal` |

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type ApiResult<T> = Result<T, ApiError>;

/// Categories of errors for classification and handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// No route or resource matched the request.
    NotFound,
    /// The request carried missing or malformed parameters.
    WrongParams,
    /// Misconfiguration or a failing collaborator.
    Internal,
}

impl ErrorCategory {
    /// Returns the default HTTP status code for this error category.
    #[must_use]
    pub const fn default_status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::WrongParams => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error type for this category.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::WrongParams => "wrong_params",
            Self::Internal => "internal",
        }
    }
}

/// Standard error type surfaced by the binding layer.
///
/// # Example
///
/// ```
/// use ariadne_core::{ApiError, ErrorCategory};
///
/// let err = ApiError::wrong_params("missing request.branch");
/// assert_eq!(err.category(), ErrorCategory::WrongParams);
/// assert_eq!(err.error_type(), "wrong_params");
/// assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Nothing matched the request.
    #[error("{message}")]
    NotFound {
        /// Human-readable error message.
        message: String,
        /// The resource type that was looked for, if known.
        resource_type: Option<String>,
    },

    /// Parameters were missing or had the wrong shape.
    #[error("{message}")]
    WrongParams {
        /// Human-readable error message.
        message: String,
        /// Qualified name of the offending field, if known.
        field: Option<String>,
    },

    /// Internal error.
    #[error("{message}")]
    Internal {
        /// Human-readable error message.
        message: String,
    },
}

impl ApiError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            resource_type: None,
        }
    }

    /// Creates a not found error for a specific resource type.
    #[must_use]
    pub fn not_found_resource(resource_type: impl Into<String>) -> Self {
        let resource_type = resource_type.into();
        Self::NotFound {
            message: format!("{resource_type} not found"),
            resource_type: Some(resource_type),
        }
    }

    /// Creates a wrong params error.
    #[must_use]
    pub fn wrong_params(message: impl Into<String>) -> Self {
        Self::WrongParams {
            message: message.into(),
            field: None,
        }
    }

    /// Creates a wrong params error naming the offending field.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::WrongParams {
            message: format!("missing {field}"),
            field: Some(field),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::WrongParams { .. } => ErrorCategory::WrongParams,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.category().default_status_code()
    }

    /// Returns the machine-readable error type.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        self.category().error_type()
    }

    /// Returns the resource type or field this error is about, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::NotFound { resource_type, .. } => resource_type.as_deref(),
            Self::WrongParams { field, .. } => field.as_deref(),
            Self::Internal { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ApiError::not_found("no route for GET /nope");
        assert_eq!(error.category(), ErrorCategory::NotFound);
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.error_type(), "not_found");
        assert_eq!(error.subject(), None);
    }

    #[test]
    fn test_not_found_resource() {
        let error = ApiError::not_found_resource("repository");
        assert_eq!(error.to_string(), "repository not found");
        assert_eq!(error.subject(), Some("repository"));
    }

    #[test]
    fn test_missing_field() {
        let error = ApiError::missing_field("request.branch");
        assert_eq!(error.category(), ErrorCategory::WrongParams);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "missing request.branch");
        assert_eq!(error.subject(), Some("request.branch"));
    }

    #[test]
    fn test_internal_error() {
        let error = ApiError::internal("route table failed to compile");
        assert_eq!(error.category(), ErrorCategory::Internal);
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error_type(), "internal");
    }

    #[test]
    fn test_category_serialization_matches_error_type() {
        for category in [
            ErrorCategory::NotFound,
            ErrorCategory::WrongParams,
            ErrorCategory::Internal,
        ] {
            let json = serde_json::to_value(category).unwrap();
            assert_eq!(json, category.error_type());
        }
    }

    #[test]
    fn test_all_error_categories_have_status_codes() {
        for category in [
            ErrorCategory::NotFound,
            ErrorCategory::WrongParams,
            ErrorCategory::Internal,
        ] {
            let status = category.default_status_code();
            assert!(
                status.is_client_error() || status.is_server_error(),
                "Category {:?} should map to error status code, got {}",
                category,
                status
            );
        }
    }
}
