//! Integration tests for `POST /v3/repo/{id}/requests`.
//!
//! The handler here plays the part of the request-creation service: it reads
//! the repository from the path, the user from the session (or, for trusted
//! applications, from the parameters) and enqueues a build request.

use std::sync::Arc;

use ariadne::prelude::*;
use ariadne::v3::{self, RequestParams};
use ariadne::{Job, JobId};
use http::{Method, StatusCode, Uri};
use serde_json::{json, Value};

const REPO_ID: i64 = 1;
const OWNER_ID: i64 = 7;

enum Caller {
    /// A logged in user with push access.
    Owner,
    /// An application with full access; the user must be passed in.
    App,
}

fn repository(id: i64) -> Value {
    json!({"id": id, "owner_name": "svenfuchs", "name": "minimal"})
}

fn create(
    client: &Arc<RecordingClient>,
    caller: &Caller,
    path: &str,
    body: &Value,
) -> Result<JobId, ApiError> {
    let dispatcher = v3::dispatcher(&AriadneConfig::default(), client.clone())?;
    let uri: Uri = path.parse().unwrap();
    let binding = dispatcher.bind(&Method::POST, &uri, body.to_string().as_bytes())?;
    assert_eq!(binding.handler_id(), "requests#create");

    let params = RequestParams::from(binding.into_resolver());
    let repository_id = params.repository_id_required()?;
    let repository_id: i64 = repository_id
        .as_str()
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ApiError::not_found_resource("repository"))?;

    let user = match caller {
        Caller::Owner => json!({"id": OWNER_ID}),
        Caller::App => {
            let id = params.user_id_required()?;
            json!({ "id": id })
        }
    };

    Ok(params.create(repository(repository_id), user)?)
}

fn post(body: Value) -> Job {
    post_as(&Caller::Owner, body)
}

fn post_as(caller: &Caller, body: Value) -> Job {
    let client = Arc::new(RecordingClient::new());
    create(&client, caller, &format!("/v3/repo/{REPO_ID}/requests"), &body).unwrap();
    let mut jobs = client.take();
    assert_eq!(jobs.len(), 1, "expected exactly one job to be enqueued");
    jobs.remove(0)
}

fn payload(job: &Job) -> Value {
    let raw = job.args[0]["payload"].as_str().unwrap();
    serde_json::from_str(raw).unwrap()
}

fn expected(message: Value, branch: &str, config: Value) -> Value {
    json!({
        "repository": repository(REPO_ID),
        "user": {"id": OWNER_ID},
        "message": message,
        "branch": branch,
        "config": config,
    })
}

#[test]
fn test_default_payload() {
    let job = post(json!({}));
    assert_eq!(payload(&job), expected(Value::Null, "master", json!({})));
}

#[test]
fn test_job_queue_and_class() {
    let job = post(json!({}));
    assert_eq!(job.queue, "build_requests");
    assert_eq!(job.class, "Travis::Sidekiq::BuildRequest");
    assert_eq!(job.args[0]["type"], json!("api"));
}

#[test]
fn test_setting_id_has_no_effect() {
    let job = post(json!({"id": 42}));
    assert_eq!(payload(&job), expected(Value::Null, "master", json!({})));
}

#[test]
fn test_setting_repository_has_no_effect() {
    let job = post(json!({"repository": {"id": 42}}));
    assert_eq!(payload(&job), expected(Value::Null, "master", json!({})));
}

#[test]
fn test_setting_user_has_no_effect() {
    let job = post(json!({"user": {"id": 42}}));
    assert_eq!(payload(&job), expected(Value::Null, "master", json!({})));
}

#[test]
fn test_overriding_config() {
    let job = post(json!({"config": {"script": "true"}}));
    assert_eq!(
        payload(&job),
        expected(Value::Null, "master", json!({"script": "true"}))
    );
}

#[test]
fn test_overriding_message() {
    let job = post(json!({"message": "example"}));
    assert_eq!(payload(&job), expected(json!("example"), "master", json!({})));
}

#[test]
fn test_overriding_branch() {
    let job = post(json!({"branch": "example"}));
    assert_eq!(payload(&job), expected(Value::Null, "example", json!({})));
}

#[test]
fn test_overriding_branch_in_request() {
    let job = post(json!({"request": {"branch": "example"}}));
    assert_eq!(payload(&job), expected(Value::Null, "example", json!({})));
}

#[test]
fn test_overriding_branch_with_request_prefix() {
    let job = post(json!({"request.branch": "example"}));
    assert_eq!(payload(&job), expected(Value::Null, "example", json!({})));
}

#[test]
fn test_overriding_branch_with_request_type() {
    let job = post(json!({"@type": "request", "branch": "example"}));
    assert_eq!(payload(&job), expected(Value::Null, "example", json!({})));
}

#[test]
fn test_overriding_branch_with_wrong_type() {
    let job = post(json!({"@type": "repository", "branch": "example"}));
    assert_eq!(payload(&job), expected(Value::Null, "master", json!({})));
}

#[test]
fn test_prefixed_branch_wins_over_wrong_type() {
    let job = post(json!({"@type": "repository", "request.branch": "example"}));
    assert_eq!(payload(&job), expected(Value::Null, "example", json!({})));
}

#[test]
fn test_branch_from_query_string() {
    let client = Arc::new(RecordingClient::new());
    create(
        &client,
        &Caller::Owner,
        &format!("/v3/repo/{REPO_ID}/requests?request[branch]=example"),
        &json!({"branch": "ignored"}),
    )
    .unwrap();
    let job = client.take().remove(0);
    assert_eq!(payload(&job)["branch"], json!("example"));
}

#[test]
fn test_app_without_user() {
    let client = Arc::new(RecordingClient::new());
    let path = format!("/v3/repo/{REPO_ID}/requests");
    let err = create(&client, &Caller::App, &path, &json!({})).unwrap_err();

    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(err.error_type(), "wrong_params");
    assert_eq!(err.to_string(), "missing user.id");
    assert!(client.is_empty());
}

#[test]
fn test_app_setting_user() {
    let job = post_as(&Caller::App, json!({"user": {"id": OWNER_ID}}));
    assert_eq!(payload(&job), expected(Value::Null, "master", json!({})));
}

#[test]
fn test_app_setting_branch() {
    let job = post_as(
        &Caller::App,
        json!({"user": {"id": OWNER_ID}, "branch": "example"}),
    );
    assert_eq!(payload(&job), expected(Value::Null, "example", json!({})));
}

#[test]
fn test_missing_repository_route() {
    let client = Arc::new(RecordingClient::new());
    let err = create(&client, &Caller::Owner, "/v3/repo/abc/requests", &json!({})).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    assert!(client.is_empty());
}

#[test]
fn test_client_failure_is_internal() {
    let client = Arc::new(RecordingClient::new());
    client.fail_with("connection refused");
    let path = format!("/v3/repo/{REPO_ID}/requests");
    let err = create(&client, &Caller::Owner, &path, &json!({})).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
