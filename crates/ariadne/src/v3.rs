//! The v3 API surface: resource tree, job handles and parameter declarations.
//!
//! ```text
//! /accounts                                         accounts#for_current_user
//! /owner/({owner.login}|{user.login}|{organization.login})
//!                                                   owner#find, owner#repositories (/repos),
//!                                                   owner#pending_jobs (/queue)
//! /repo/({repository.id}|{repository.slug})         repository#find, #enable, #disable
//!     /requests                                     requests#find, requests#create
//!     /branch/{branch.name}                         branch#find
//! /repos                                            repositories#for_current_user
//! /build/{build.id}                                 build#find
//! /user                                             user#current, user#find (/{user.id})
//! /org/{organization.id}                            organization#find
//! /orgs                                             organizations#for_current_user
//! ```

use std::sync::Arc;

use ariadne_config::{AriadneConfig, BUILD_REQUEST_JOB};
use ariadne_core::ApiError;
use ariadne_jobs::{JobClient, JobId};
use ariadne_params::{resource_params, user_condition, ParamsError, ParamsResult, UserCondition};
use ariadne_router::{Capture, Resource, RouteError, RouteTable};
use serde_json::{json, Value};

use crate::dispatch::Dispatcher;

/// Branch used when a request does not name one.
pub const DEFAULT_BRANCH: &str = "master";

/// Handlers whose result type differs from the resource they are declared on.
pub const RESULT_TYPES: &[(&str, &str)] = &[("requests#create", "request")];

/// The v3 resource tree, in declaration order.
pub fn resources() -> Vec<Resource> {
    vec![
        Resource::new("accounts")
            .route("/accounts")
            .get("for_current_user"),
        Resource::new("owner")
            .route("/owner/({owner.login}|{user.login}|{organization.login})")
            .get("find")
            .get_at("repositories", "/repos")
            .get_at("pending_jobs", "/queue"),
        Resource::new("repository")
            .capture("id", Capture::Digit)
            .capture("slug", Capture::slug())
            .route("/repo/({repository.id}|{repository.slug})")
            .get("find")
            .post_at("enable", "/enable")
            .post_at("disable", "/disable")
            .resource(
                Resource::new("requests")
                    .route("/requests")
                    .get("find")
                    .post("create"),
            )
            .resource(
                Resource::new("branch")
                    .route("/branch/{branch.name}")
                    .get("find"),
            ),
        Resource::new("repositories")
            .route("/repos")
            .get("for_current_user"),
        Resource::new("build")
            .capture("id", Capture::Digit)
            .route("/build/{build.id}")
            .get("find"),
        Resource::new("user")
            .capture("id", Capture::Digit)
            .route("/user")
            .get("current")
            .get_at("find", "/{user.id}"),
        Resource::new("organization")
            .capture("id", Capture::Digit)
            .route("/org/{organization.id}")
            .get("find"),
        Resource::new("organizations")
            .route("/orgs")
            .get("for_current_user"),
    ]
}

/// Compiles [`resources`].
///
/// # Errors
///
/// Returns a `RouteError` if a template or constraint is malformed.
pub fn route_table() -> Result<RouteTable, RouteError> {
    RouteTable::compile(resources())
}

/// Builds the v3 dispatcher: routes, mount path and jobs from `config`.
///
/// # Errors
///
/// Returns an internal `ApiError` if the route table does not compile, a
/// configured job is invalid, or no `build_request` job is configured.
pub fn dispatcher(config: &AriadneConfig, client: Arc<dyn JobClient>) -> Result<Dispatcher, ApiError> {
    if !config.jobs.contains_key(BUILD_REQUEST_JOB) {
        return Err(ApiError::internal(format!(
            "no '{BUILD_REQUEST_JOB}' job configured"
        )));
    }
    let dispatcher = Dispatcher::from_config(config, route_table()?, client)?;
    Ok(RESULT_TYPES
        .iter()
        .fold(dispatcher, |d, (handler, result)| d.with_result_type(*handler, *result)))
}

resource_params! {
    /// Parameters of `requests#create`.
    pub struct RequestParams {
        request { branch, message, config }
        repository { id => repository_id, slug => repository_slug }
        user { id => user_id }
    }
}

impl RequestParams {
    /// The build request payload for `repository` triggered by `user`.
    ///
    /// Branch defaults to [`DEFAULT_BRANCH`], config to an empty object and
    /// message to `null`.
    pub fn payload(&self, repository: Value, user: Value) -> Value {
        json!({
            "repository": repository,
            "user": user,
            "message": self.message().unwrap_or(Value::Null),
            "branch": self.branch().unwrap_or_else(|| json!(DEFAULT_BRANCH)),
            "config": self.config().unwrap_or_else(|| json!({})),
        })
    }

    /// Enqueues the `build_request` job for [`payload`](Self::payload).
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::Job` if no job registry is attached, the job is
    /// not registered or the client rejects it.
    pub fn create(&self, repository: Value, user: Value) -> ParamsResult<JobId> {
        let payload = self.payload(repository, user);
        self.perform_async(
            BUILD_REQUEST_JOB,
            vec![json!({
                "type": "api",
                "payload": payload.to_string(),
                "credentials": {},
            })],
        )
    }
}

resource_params! {
    /// Parameters of user lookups.
    pub struct UserParams {
        user { id, login }
    }
}

impl UserParams {
    /// Lookup condition: `user.id` if given, otherwise `user.login`.
    ///
    /// # Errors
    ///
    /// Returns `ParamsError::WrongParams` if neither is given or the ID is
    /// not an integer.
    pub fn condition(&self) -> ParamsResult<UserCondition> {
        if let Some(id) = self.id() {
            return match &id {
                Value::String(raw) => raw
                    .parse()
                    .map(UserCondition::Id)
                    .map_err(|_| ParamsError::wrong_params(format!("invalid user.id: {raw}"))),
                other => user_condition(other),
            };
        }
        match self.login() {
            Some(Value::String(login)) => Ok(UserCondition::Login(login)),
            Some(_) => Err(ParamsError::wrong_params("invalid user.login")),
            None => Err(ParamsError::wrong_params("missing user.id or user.login")),
        }
    }
}
