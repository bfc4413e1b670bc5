//! Capture constraints.
//!
//! A constraint restricts what a `{resource.field}` placeholder may match.
//! Constraints are declared per field on a [`Resource`](crate::Resource) and
//! inherited by nested resources.

use std::collections::HashMap;

use regex::Regex;

use crate::error::RouteError;

/// Pattern used for placeholders without a constraint: one path segment.
pub const DEFAULT_PATTERN: &str = "[^/?#]+";

/// Pattern matching an `owner/name` slug whose slash is percent-encoded.
pub const SLUG_PATTERN: &str = "[^/]+%2[fF][^/]+";

/// What a placeholder is allowed to match.
///
/// # Example
///
/// ```rust
/// use ariadne_router::Capture;
///
/// assert_eq!(Capture::Digit.as_regex(), "[0-9]+");
/// assert_eq!(Capture::slug().as_regex(), "[^/]+%2[fF][^/]+");
/// assert_eq!(Capture::pattern("[a-f0-9]{40}").as_regex(), "[a-f0-9]{40}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Numeric sequences only.
    Digit,
    /// A custom regular expression (unanchored).
    Pattern(String),
}

impl Capture {
    /// Creates a custom pattern constraint.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        Self::Pattern(pattern.into())
    }

    /// Slug constraint: two parts joined by an escaped `/` within one segment.
    pub fn slug() -> Self {
        Self::Pattern(SLUG_PATTERN.to_string())
    }

    /// Returns the regular expression source for this constraint.
    pub fn as_regex(&self) -> &str {
        match self {
            Self::Digit => "[0-9]+",
            Self::Pattern(pattern) => pattern,
        }
    }

    fn validate(&self, field: &str) -> Result<(), RouteError> {
        if let Self::Pattern(pattern) = self {
            if pattern.is_empty() {
                return Err(RouteError::invalid_constraint(field, "empty pattern"));
            }
            Regex::new(pattern)
                .map_err(|e| RouteError::invalid_constraint(field, e.to_string()))?;
        }
        Ok(())
    }
}

/// The constraint set in effect for one resource.
///
/// Keys are either bare field names (`id`) or qualified capture keys
/// (`repository.id`); a qualified key wins over a bare one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Constraints {
    inner: HashMap<String, Capture>,
}

impl Constraints {
    pub(crate) fn insert(&mut self, key: impl Into<String>, capture: Capture) {
        self.inner.insert(key.into(), capture);
    }

    /// Returns a copy of `self` overlaid with `own`, validating the new entries.
    pub(crate) fn overlay(&self, own: &Constraints) -> Result<Self, RouteError> {
        let mut merged = self.clone();
        for (key, capture) in &own.inner {
            capture.validate(key)?;
            merged.inner.insert(key.clone(), capture.clone());
        }
        Ok(merged)
    }

    /// Regex source for the placeholder `{resource.field}`.
    pub(crate) fn regex_for(&self, resource: &str, field: &str) -> &str {
        self.inner
            .get(&format!("{resource}.{field}"))
            .or_else(|| self.inner.get(field))
            .map_or(DEFAULT_PATTERN, Capture::as_regex)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
