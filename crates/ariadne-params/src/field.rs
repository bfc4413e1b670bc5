//! Declared parameter fields.

use std::fmt;

/// A field declared under a resource prefix, e.g. `request.branch`.
///
/// The prefix is the resource type the field belongs to, not the main type of
/// the request being resolved.
///
/// # Example
///
/// ```rust
/// use ariadne_params::Field;
///
/// const BRANCH: Field = Field::new("request", "branch");
/// assert_eq!(BRANCH.qualified(), "request.branch");
/// assert_eq!(BRANCH.to_string(), "request.branch");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Field {
    prefix: &'static str,
    name: &'static str,
}

impl Field {
    /// Declares a field.
    pub const fn new(prefix: &'static str, name: &'static str) -> Self {
        Self { prefix, name }
    }

    /// Resource prefix.
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Bare field name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// `prefix.name`.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.prefix, self.name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.prefix, self.name)
    }
}
