//! Router error types.

use ariadne_core::ApiError;
use http::Method;
use thiserror::Error;

/// Errors raised while compiling or matching routes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No compiled route matches the method and path.
    #[error("no route matches {method} {path}")]
    NotFound {
        /// Request method.
        method: Method,
        /// Request path.
        path: String,
    },

    /// A path template could not be parsed.
    #[error("invalid route template '{template}': {reason}")]
    InvalidTemplate {
        /// The offending template.
        template: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A resource name is not a lowercase snake_case identifier.
    #[error("invalid resource name '{name}'")]
    InvalidResource {
        /// The offending name.
        name: String,
    },

    /// A capture constraint is not a valid pattern.
    #[error("invalid capture constraint for '{field}': {reason}")]
    InvalidConstraint {
        /// Field the constraint was declared for.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl RouteError {
    /// Creates a not found error.
    pub fn not_found(method: &Method, path: impl Into<String>) -> Self {
        Self::NotFound {
            method: method.clone(),
            path: path.into(),
        }
    }

    /// Creates an invalid template error.
    pub fn invalid_template(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTemplate {
            template: template.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid resource name error.
    pub fn invalid_resource(name: impl Into<String>) -> Self {
        Self::InvalidResource { name: name.into() }
    }

    /// Creates an invalid constraint error.
    pub fn invalid_constraint(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConstraint {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if no route matched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match err {
            RouteError::NotFound { .. } => ApiError::not_found(err.to_string()),
            RouteError::InvalidTemplate { .. }
            | RouteError::InvalidResource { .. }
            | RouteError::InvalidConstraint { .. } => {
                ApiError::internal(err.to_string())
            }
        }
    }
}
