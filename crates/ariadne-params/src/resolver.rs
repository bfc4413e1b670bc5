//! Per-request field resolution.
//!
//! A [`Resolver`] answers "what value does `request.branch` have?" for one
//! request. Parameters may arrive qualified (`"request.branch"`), nested under
//! their prefix (`{"request": {"branch": ..}}`) or bare (`"branch"`); the bare
//! form only counts when the request is about that resource type.
//!
//! ```text
//!   1. bag["prefix.field"]                         present → use it
//!   2. bag["prefix"] is an object                  → object["field"] (may be absent)
//!   3. effective type == prefix                    → bag["field"]
//!   4. otherwise                                   → no value
//!
//!   effective type = bag["@type"] if it is a string, else the main type
//! ```

use std::cell::{OnceCell, RefCell};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use ariadne_core::ResourceType;
use ariadne_jobs::{JobError, JobId, Jobs};
use ariadne_telemetry::metrics::record_missing_param;
use serde_json::Value;
use tracing::{debug, trace};

use crate::bag::{ParameterBag, INCLUDE_KEY};
use crate::coerce::{include_list, to_bool};
use crate::error::{ParamsError, ParamsResult};
use crate::field::Field;
use crate::user::{user_condition, UserCondition, UserInput};

/// Field resolution over one request's parameters.
///
/// Resolved values are cached per field for the life of the resolver. Not
/// `Sync`: build one per request.
///
/// # Example
///
/// ```rust
/// use ariadne_params::{Field, ParameterBag, Resolver};
/// use serde_json::json;
///
/// const BRANCH: Field = Field::new("request", "branch");
///
/// let mut bag = ParameterBag::new();
/// bag.insert("@type", json!("repository"));
/// bag.insert("request.branch", json!("example"));
///
/// let resolver = Resolver::new(bag, "request");
/// assert_eq!(resolver.resolve(BRANCH), Some(json!("example")));
/// ```
pub struct Resolver {
    params: Arc<ParameterBag>,
    main_type: ResourceType,
    memoized: RefCell<HashMap<Field, Option<Value>>>,
    includes: OnceCell<HashSet<String>>,
    jobs: Option<Arc<Jobs>>,
}

impl Resolver {
    /// Creates a resolver for `params` scoped to `main_type`.
    pub fn new(params: impl Into<Arc<ParameterBag>>, main_type: impl Into<ResourceType>) -> Self {
        Self {
            params: params.into(),
            main_type: main_type.into(),
            memoized: RefCell::new(HashMap::new()),
            includes: OnceCell::new(),
            jobs: None,
        }
    }

    /// Attaches the job registry used by [`perform_async`](Self::perform_async).
    #[must_use]
    pub fn with_jobs(mut self, jobs: Arc<Jobs>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// The parameter bag.
    pub fn params(&self) -> &ParameterBag {
        &self.params
    }

    /// The main resource type of the request.
    pub fn main_type(&self) -> &ResourceType {
        &self.main_type
    }

    /// `@type` when it is a string, otherwise the main type.
    pub fn effective_type(&self) -> &str {
        self.params
            .type_hint()
            .unwrap_or_else(|| self.main_type.as_str())
    }

    /// Resolves `field`, caching the result.
    pub fn resolve(&self, field: Field) -> Option<Value> {
        if let Some(cached) = self.memoized.borrow().get(&field) {
            return cached.clone();
        }
        let value = self.lookup(field);
        self.memoized.borrow_mut().insert(field, value.clone());
        value
    }

    /// Overrides the value of `field` for the rest of this request.
    pub fn set(&mut self, field: Field, value: Option<Value>) {
        self.memoized.get_mut().insert(field, value);
    }

    /// Resolves `field`, failing when it is absent or `false`.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::MissingParameter` naming `prefix.field`.
    pub fn required(&self, field: Field) -> ParamsResult<Value> {
        match self.resolve(field) {
            None | Some(Value::Bool(false)) => {
                let qualified = field.qualified();
                debug!(param = %qualified, "missing required parameter");
                record_missing_param(&qualified);
                Err(ParamsError::missing(qualified))
            }
            Some(value) => Ok(value),
        }
    }

    /// Truthiness of a parameter value; see [`to_bool`].
    pub fn bool(value: Option<&Value>) -> bool {
        to_bool(value)
    }

    /// Returns true if the `include` entry lists `key`.
    pub fn includes(&self, key: &str) -> bool {
        self.includes
            .get_or_init(|| include_list(self.params.get(INCLUDE_KEY)).into_iter().collect())
            .contains(key)
    }

    /// Lookup condition for a user given by login, ID or record.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::WrongParams` if `value` identifies no user.
    pub fn user_condition<'a>(&self, value: impl Into<UserInput<'a>>) -> ParamsResult<UserCondition> {
        user_condition(value)
    }

    /// Hands a job off to the queue registered under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Job` if no registry is attached, the identifier
    /// is unknown, or the push fails.
    pub fn perform_async(&self, identifier: &str, args: Vec<Value>) -> ParamsResult<JobId> {
        let jobs = self.jobs.as_ref().ok_or(JobError::NotConfigured)?;
        Ok(jobs.perform_async(identifier, args)?)
    }

    fn lookup(&self, field: Field) -> Option<Value> {
        let qualified = field.qualified();
        if let Some(value) = self.params.get(&qualified) {
            trace!(param = %qualified, tier = "qualified", "resolved parameter");
            return present(value);
        }

        if let Some(Value::Object(nested)) = self.params.get(field.prefix()) {
            trace!(param = %qualified, tier = "nested", "resolved parameter");
            return nested.get(field.name()).and_then(present);
        }

        if self.effective_type() == field.prefix() {
            trace!(param = %qualified, tier = "bare", "resolved parameter");
            return self.params.get(field.name()).and_then(present);
        }

        trace!(param = %qualified, effective_type = self.effective_type(), "parameter not resolved");
        None
    }
}

fn present(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("main_type", &self.main_type)
            .field("params", &self.params)
            .field("jobs", &self.jobs.is_some())
            .finish_non_exhaustive()
    }
}
