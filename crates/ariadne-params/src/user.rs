//! User lookup conditions.
//!
//! A user may be referred to by login, by numeric ID, or by an already loaded
//! record. [`user_condition`] turns any of these into the condition a user
//! lookup runs with.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ParamsError, ParamsResult};

/// A loaded user-like record.
pub trait UserRecord {
    /// Primary key.
    fn id(&self) -> i64;
}

/// Something that identifies a user.
#[derive(Clone, Copy)]
pub enum UserInput<'a> {
    /// A raw parameter value.
    Value(&'a Value),
    /// A login name.
    Login(&'a str),
    /// A numeric ID.
    Id(i64),
    /// A loaded record.
    Record(&'a dyn UserRecord),
}

impl<'a> From<&'a Value> for UserInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

impl<'a> From<&'a str> for UserInput<'a> {
    fn from(login: &'a str) -> Self {
        Self::Login(login)
    }
}

impl From<i64> for UserInput<'_> {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a dyn UserRecord> for UserInput<'a> {
    fn from(record: &'a dyn UserRecord) -> Self {
        Self::Record(record)
    }
}

/// Lookup condition for a user.
///
/// Serializes as `{"login": "..."}` or `{"id": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserCondition {
    /// Look up by login.
    Login(String),
    /// Look up by primary key.
    Id(i64),
}

/// Builds the lookup condition for `input`.
///
/// Strings select by login, integers and records by ID.
///
/// # Errors
///
/// Returns `ParamsError::WrongParams` for any other value.
///
/// # Example
///
/// ```rust
/// use ariadne_params::{user_condition, UserCondition};
/// use serde_json::json;
///
/// assert_eq!(user_condition(&json!("svenfuchs")).unwrap(), UserCondition::Login("svenfuchs".into()));
/// assert_eq!(user_condition(&json!(1)).unwrap(), UserCondition::Id(1));
/// assert!(user_condition(&json!(1.5)).is_err());
/// ```
pub fn user_condition<'a>(input: impl Into<UserInput<'a>>) -> ParamsResult<UserCondition> {
    match input.into() {
        UserInput::Login(login) => Ok(UserCondition::Login(login.to_string())),
        UserInput::Id(id) => Ok(UserCondition::Id(id)),
        UserInput::Record(record) => Ok(UserCondition::Id(record.id())),
        UserInput::Value(Value::String(login)) => Ok(UserCondition::Login(login.clone())),
        UserInput::Value(Value::Number(n)) => n.as_i64().map(UserCondition::Id).ok_or_else(|| {
            ParamsError::wrong_params(format!("cannot identify a user by {n}"))
        }),
        UserInput::Value(other) => Err(ParamsError::wrong_params(format!(
            "cannot identify a user by {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct User {
        id: i64,
    }

    impl UserRecord for User {
        fn id(&self) -> i64 {
            self.id
        }
    }

    #[test]
    fn test_login() {
        assert_eq!(
            user_condition("svenfuchs").unwrap(),
            UserCondition::Login("svenfuchs".into())
        );
        assert_eq!(
            user_condition(&json!("svenfuchs")).unwrap(),
            UserCondition::Login("svenfuchs".into())
        );
    }

    #[test]
    fn test_id() {
        assert_eq!(user_condition(42_i64).unwrap(), UserCondition::Id(42));
        assert_eq!(user_condition(&json!(42)).unwrap(), UserCondition::Id(42));
    }

    #[test]
    fn test_record() {
        let user = User { id: 7 };
        let record: &dyn UserRecord = &user;
        assert_eq!(user_condition(record).unwrap(), UserCondition::Id(7));
    }

    #[test]
    fn test_wrong_params() {
        for value in [json!(null), json!(true), json!(1.5), json!(u64::MAX), json!([]), json!({})] {
            let err = user_condition(&value).unwrap_err();
            assert!(matches!(err, ParamsError::WrongParams(_)), "{value}");
        }
    }

    #[test]
    fn test_condition_serializes() {
        assert_eq!(
            serde_json::to_value(UserCondition::Login("svenfuchs".into())).unwrap(),
            json!({"login": "svenfuchs"})
        );
        assert_eq!(
            serde_json::to_value(UserCondition::Id(1)).unwrap(),
            json!({"id": 1})
        );
    }
}
