//! Storage for values captured from a matched path.
//!
//! Captures are keyed by their qualified `resource.field` name. Most routes
//! capture one or two values, so storage is inline for small counts.

use smallvec::SmallVec;

/// Maximum number of captures stored inline (stack allocated).
const INLINE_CAPTURES: usize = 4;

/// Values captured from a route match, keyed as declared in the template.
///
/// Only the placeholders that took part in the match are present: for an
/// alternation, exactly one of its keys is populated.
///
/// # Example
///
/// ```rust
/// use ariadne_router::Captures;
///
/// let mut captures = Captures::new();
/// captures.push("repository.id", "42");
///
/// assert_eq!(captures.get("repository.id"), Some("42"));
/// assert!(captures.contains_key("repository.id"));
/// assert_eq!(captures.get("repository.slug"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Captures {
    /// Storage for (key, value) pairs
    inner: SmallVec<[(String, String); INLINE_CAPTURES]>,
}

impl Captures {
    /// Creates a new empty capture set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a capture set with the given capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: SmallVec::with_capacity(capacity),
        }
    }

    /// Adds a captured value.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.inner.push((key.into(), value.into()));
    }

    /// Returns the value captured for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a value was captured for `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.iter().any(|(k, _)| k == key)
    }

    /// Returns the captured keys in match order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(|(k, _)| k.as_str())
    }

    /// Returns true if nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of captures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns an iterator over the captures.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Captures {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl IntoIterator for Captures {
    type Item = (String, String);
    type IntoIter = smallvec::IntoIter<[(String, String); INLINE_CAPTURES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl FromIterator<(String, String)> for Captures {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_new() {
        let captures = Captures::new();
        assert!(captures.is_empty());
        assert_eq!(captures.len(), 0);
    }

    #[test]
    fn test_captures_push_and_get() {
        let mut captures = Captures::new();
        captures.push("repository.id", "42");
        captures.push("branch.name", "master");

        assert_eq!(captures.get("repository.id"), Some("42"));
        assert_eq!(captures.get("branch.name"), Some("master"));
        assert_eq!(captures.get("id"), None);
        assert!(captures.contains_key("branch.name"));
        assert!(!captures.contains_key("branch"));
    }

    #[test]
    fn test_captures_keys_in_order() {
        let mut captures = Captures::new();
        captures.push("repository.slug", "svenfuchs/minimal");
        captures.push("branch.name", "master");

        let keys: Vec<_> = captures.keys().collect();
        assert_eq!(keys, vec!["repository.slug", "branch.name"]);
    }

    #[test]
    fn test_captures_iter() {
        let mut captures = Captures::new();
        captures.push("a.x", "1");
        captures.push("b.y", "2");

        let pairs: Vec<_> = captures.iter().collect();
        assert_eq!(pairs, vec![("a.x", "1"), ("b.y", "2")]);

        let borrowed: Vec<_> = (&captures).into_iter().collect();
        assert_eq!(borrowed, pairs);
    }

    #[test]
    fn test_captures_into_iter_owned() {
        let mut captures = Captures::new();
        captures.push("build.id", "7");

        let owned: Vec<(String, String)> = captures.into_iter().collect();
        assert_eq!(owned, vec![("build.id".to_string(), "7".to_string())]);
    }

    #[test]
    fn test_captures_from_iterator() {
        let pairs = vec![
            ("a.x".to_string(), "1".to_string()),
            ("b.y".to_string(), "2".to_string()),
        ];

        let captures: Captures = pairs.into_iter().collect();
        assert_eq!(captures.len(), 2);
        assert_eq!(captures.get("a.x"), Some("1"));
        assert_eq!(captures.get("b.y"), Some("2"));
    }

    #[test]
    fn test_captures_with_capacity() {
        let captures = Captures::with_capacity(10);
        assert!(captures.is_empty());
    }

    #[test]
    fn test_captures_spill_past_inline() {
        let mut captures = Captures::new();
        for i in 0..10 {
            captures.push(format!("r.f{i}"), format!("value{i}"));
        }

        assert_eq!(captures.len(), 10);
        assert_eq!(captures.get("r.f5"), Some("value5"));
    }
}
