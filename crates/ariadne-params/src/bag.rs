//! The per-request parameter bag.
//!
//! A [`ParameterBag`] collects path captures, query-string pairs and the JSON
//! body into one loosely structured map. Keys may be qualified
//! (`request.branch`), plain (`branch`), or the type discriminator `@type`.
//! Sources are merged first-wins: whatever is inserted first for a key is
//! kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ParamsError, ParamsResult};

/// Key of the type discriminator entry.
pub const TYPE_KEY: &str = "@type";

/// Key of the include-hint entry.
pub const INCLUDE_KEY: &str = "include";

/// Loosely structured request parameters.
///
/// # Example
///
/// ```rust
/// use ariadne_params::ParameterBag;
/// use serde_json::json;
///
/// let mut bag = ParameterBag::new();
/// bag.insert("repository.id", json!("42"));
/// bag.extend_query("request[branch]=master&repository.id=7").unwrap();
///
/// assert_eq!(bag.get("repository.id"), Some(&json!("42")));
/// assert_eq!(bag.get("request"), Some(&json!({"branch": "master"})));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterBag {
    inner: Map<String, Value>,
}

impl ParameterBag {
    /// Creates an empty bag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw entry for `key`, `null` included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Returns true if the bag has an entry for `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Inserts an entry, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.insert(key.into(), value)
    }

    /// Inserts an entry unless the key is already present.
    ///
    /// Returns true if the value was inserted.
    pub fn insert_missing(&mut self, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if self.inner.contains_key(&key) {
            return false;
        }
        self.inner.insert(key, value);
        true
    }

    /// Merges `other` into `self`, keeping existing entries on collision.
    pub fn merge_missing(&mut self, other: impl IntoIterator<Item = (String, Value)>) {
        for (key, value) in other {
            self.insert_missing(key, value);
        }
    }

    /// Adds `application/x-www-form-urlencoded` pairs.
    ///
    /// Bracketed keys nest: `request[branch]=x` becomes
    /// `{"request": {"branch": "x"}}` and `ids[]=1&ids[]=2` becomes an array.
    /// Within the query a later plain key overwrites an earlier one; keys
    /// already in the bag are kept.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidQuery` if the query cannot be decoded.
    pub fn extend_query(&mut self, query: &str) -> ParamsResult<()> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
            .map_err(|e| ParamsError::InvalidQuery(e.to_string()))?;

        let mut parsed = Map::new();
        for (key, value) in pairs {
            let (base, path) = split_brackets(&key);
            insert_nested(&mut parsed, base, &path, Value::String(value));
        }
        self.merge_missing(parsed);
        Ok(())
    }

    /// Adds the pairs of an `application/x-www-form-urlencoded` body.
    ///
    /// Same nesting and merge rules as [`extend_query`](Self::extend_query).
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidBody` if the body is not UTF-8, or
    /// `ParamsError::InvalidQuery` if it cannot be decoded.
    pub fn extend_form(&mut self, body: &[u8]) -> ParamsResult<()> {
        let form = std::str::from_utf8(body)
            .map_err(|e| ParamsError::InvalidBody(format!("form body is not UTF-8: {e}")))?;
        self.extend_query(form)
    }

    /// Adds the entries of a JSON object body.
    ///
    /// An empty or whitespace-only body adds nothing.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::InvalidBody` if the body is not valid JSON or not
    /// an object.
    pub fn extend_json(&mut self, body: &[u8]) -> ParamsResult<()> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(());
        }
        match serde_json::from_slice(body) {
            Ok(Value::Object(map)) => {
                self.merge_missing(map);
                Ok(())
            }
            Ok(other) => Err(ParamsError::InvalidBody(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            ))),
            Err(e) => Err(ParamsError::InvalidBody(e.to_string())),
        }
    }

    /// The `@type` entry, if it is a string.
    pub fn type_hint(&self) -> Option<&str> {
        self.inner.get(TYPE_KEY).and_then(Value::as_str)
    }

    /// Iterates over entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    /// Iterates over keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.inner.keys()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.inner
    }
}

impl From<Map<String, Value>> for ParameterBag {
    fn from(inner: Map<String, Value>) -> Self {
        Self { inner }
    }
}

impl FromIterator<(String, Value)> for ParameterBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ParameterBag {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

/// Splits `a[b][c]` into `("a", ["b", "c"])`. Malformed keys are kept whole.
fn split_brackets(key: &str) -> (&str, Vec<&str>) {
    let Some(open) = key.find('[') else {
        return (key, Vec::new());
    };
    if open == 0 || !key.ends_with(']') {
        return (key, Vec::new());
    }

    let base = &key[..open];
    let mut path = Vec::new();
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            return (key, Vec::new());
        };
        path.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }
    if !rest.is_empty() {
        return (key, Vec::new());
    }
    (base, path)
}

fn insert_nested(target: &mut Map<String, Value>, key: &str, path: &[&str], value: Value) {
    match path.split_first() {
        None => {
            target.insert(key.to_string(), value);
        }
        Some((next, _)) if next.is_empty() => {
            let entry = target
                .entry(key.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(items) = entry {
                items.push(value);
            }
        }
        Some((next, rest)) => {
            let entry = target
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(child) = entry {
                insert_nested(child, next, rest, value);
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_missing_keeps_first() {
        let mut bag = ParameterBag::new();
        assert!(bag.insert_missing("branch", json!("master")));
        assert!(!bag.insert_missing("branch", json!("dev")));
        assert_eq!(bag.get("branch"), Some(&json!("master")));
    }

    #[test]
    fn test_query_plain_and_nested() {
        let mut bag = ParameterBag::new();
        bag.extend_query("include=repository.owner,build.commit&request%5Bbranch%5D=dev&request[message]=hi")
            .unwrap();

        assert_eq!(bag.get("include"), Some(&json!("repository.owner,build.commit")));
        assert_eq!(
            bag.get("request"),
            Some(&json!({"branch": "dev", "message": "hi"}))
        );
    }

    #[test]
    fn test_query_arrays_and_deep_nesting() {
        let mut bag = ParameterBag::new();
        bag.extend_query("ids[]=1&ids[]=2&request[config][env]=x").unwrap();
        assert_eq!(bag.get("ids"), Some(&json!(["1", "2"])));
        assert_eq!(bag.get("request"), Some(&json!({"config": {"env": "x"}})));
    }

    #[test]
    fn test_query_malformed_brackets_kept_whole() {
        let mut bag = ParameterBag::new();
        bag.extend_query("a[b=1&[c]=2&d[e]f=3").unwrap();
        assert_eq!(bag.get("a[b"), Some(&json!("1")));
        assert_eq!(bag.get("[c]"), Some(&json!("2")));
        assert_eq!(bag.get("d[e]f"), Some(&json!("3")));
    }

    #[test]
    fn test_query_does_not_override_existing() {
        let mut bag = ParameterBag::new();
        bag.insert("repository.id", json!("42"));
        bag.extend_query("repository.id=7&branch=dev").unwrap();
        assert_eq!(bag.get("repository.id"), Some(&json!("42")));
        assert_eq!(bag.get("branch"), Some(&json!("dev")));
    }

    #[test]
    fn test_query_later_plain_key_wins_within_query() {
        let mut bag = ParameterBag::new();
        bag.extend_query("branch=a&branch=b").unwrap();
        assert_eq!(bag.get("branch"), Some(&json!("b")));
    }

    #[test]
    fn test_empty_query() {
        let mut bag = ParameterBag::new();
        bag.extend_query("").unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    fn test_json_body() {
        let mut bag = ParameterBag::new();
        bag.insert("repository.id", json!("42"));
        bag.extend_json(br#"{"request": {"branch": "dev"}, "repository.id": 1, "@type": "repository"}"#)
            .unwrap();

        assert_eq!(bag.get("repository.id"), Some(&json!("42")));
        assert_eq!(bag.get("request"), Some(&json!({"branch": "dev"})));
        assert_eq!(bag.type_hint(), Some("repository"));
    }

    #[test]
    fn test_form_body() {
        let mut bag = ParameterBag::new();
        bag.insert("branch", json!("query"));
        bag.extend_form(b"branch=body&request[message]=hi+there").unwrap();
        assert_eq!(bag.get("branch"), Some(&json!("query")));
        assert_eq!(bag.get("request"), Some(&json!({"message": "hi there"})));

        assert!(matches!(
            bag.extend_form(&[0xff, 0xfe]).unwrap_err(),
            ParamsError::InvalidBody(_)
        ));
    }

    #[test]
    fn test_empty_json_body() {
        let mut bag = ParameterBag::new();
        bag.extend_json(b"").unwrap();
        bag.extend_json(b"  \n").unwrap();
        assert!(bag.is_empty());
    }

    #[test]
    fn test_json_body_must_be_object() {
        let mut bag = ParameterBag::new();
        let err = bag.extend_json(b"[1, 2]").unwrap_err();
        assert_eq!(
            err,
            ParamsError::InvalidBody("expected a JSON object, got an array".into())
        );

        assert!(matches!(
            bag.extend_json(b"{not json").unwrap_err(),
            ParamsError::InvalidBody(_)
        ));
    }

    #[test]
    fn test_type_hint_must_be_string() {
        let mut bag = ParameterBag::new();
        bag.insert(TYPE_KEY, json!(1));
        assert_eq!(bag.type_hint(), None);
    }

    #[test]
    fn test_serializes_as_map() {
        let bag: ParameterBag = [("branch".to_string(), json!("master"))].into_iter().collect();
        assert_eq!(serde_json::to_value(&bag).unwrap(), json!({"branch": "master"}));
    }
}
