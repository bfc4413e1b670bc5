//! Request binding: mount path, route match and parameter bag.
//!
//! ```text
//!   (method, uri, body)
//!        │ strip mount path
//!        ▼
//!   RouteTable::match_route ──▶ captures ──┐
//!   uri query ─────────────────────────────┤ first source wins
//!   JSON or form body ─────────────────────┘
//!        ▼
//!   Binding { route, Resolver(bag, main type) }
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use ariadne_config::AriadneConfig;
use ariadne_core::{ApiError, ResourceType};
use ariadne_jobs::{JobClient, JobSpec, Jobs};
use ariadne_params::{ParameterBag, Resolver};
use ariadne_router::{CompiledRoute, RouteTable};
use ariadne_telemetry::metrics::{record_route_match, record_route_miss};
use bytes::Bytes;
use http::{header, Method, Request, Uri};
use serde_json::Value;
use tracing::debug;

/// Binds incoming requests to a compiled route table.
///
/// Cheap to clone and safe to share between threads; each call to
/// [`bind`](Self::bind) produces an independent [`Binding`].
///
/// # Example
///
/// ```rust
/// use ariadne::{Capture, Dispatcher, Resource, RouteTable};
/// use http::{Method, Uri};
///
/// let routes = RouteTable::compile([Resource::new("build")
///     .capture("id", Capture::Digit)
///     .route("/build/{build.id}")
///     .get("find")])
/// .unwrap();
///
/// let dispatcher = Dispatcher::new(routes).with_mount_path("/v3");
/// let uri: Uri = "/v3/build/42?include=build.commit".parse().unwrap();
/// let binding = dispatcher.bind(&Method::GET, &uri, b"").unwrap();
///
/// assert_eq!(binding.handler_id(), "build#find");
/// assert!(binding.resolver().includes("build.commit"));
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RouteTable>,
    mount_path: String,
    result_types: HashMap<String, ResourceType>,
    jobs: Option<Arc<Jobs>>,
}

impl Dispatcher {
    /// Creates a dispatcher with no mount path and no job registry.
    pub fn new(routes: impl Into<Arc<RouteTable>>) -> Self {
        Self {
            routes: routes.into(),
            mount_path: String::new(),
            result_types: HashMap::new(),
            jobs: None,
        }
    }

    /// Creates a dispatcher using the mount path and jobs of `config`.
    ///
    /// # Errors
    ///
    /// Returns an internal `ApiError` if a configured job is invalid.
    pub fn from_config(
        config: &AriadneConfig,
        routes: impl Into<Arc<RouteTable>>,
        client: Arc<dyn JobClient>,
    ) -> Result<Self, ApiError> {
        let jobs = Jobs::new(client).register_all(config.jobs.iter().map(|(identifier, job)| {
            (
                identifier.clone(),
                JobSpec::new(job.queue.clone(), job.class.clone()),
            )
        }))?;

        Ok(Self::new(routes)
            .with_mount_path(config.api.mount_path.clone())
            .with_jobs(Arc::new(jobs)))
    }

    /// Sets the path prefix stripped before matching.
    #[must_use]
    pub fn with_mount_path(mut self, mount_path: impl Into<String>) -> Self {
        self.mount_path = mount_path.into();
        self
    }

    /// Resolves parameters of `handler_id` against `result_type` instead of
    /// the route's resource.
    #[must_use]
    pub fn with_result_type(
        mut self,
        handler_id: impl Into<String>,
        result_type: impl Into<ResourceType>,
    ) -> Self {
        self.result_types
            .insert(handler_id.into(), result_type.into());
        self
    }

    /// Attaches the job registry handed to every resolver.
    #[must_use]
    pub fn with_jobs(mut self, jobs: Arc<Jobs>) -> Self {
        self.jobs = Some(jobs);
        self
    }

    /// The route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The mount path.
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    /// The job registry, if any.
    pub fn jobs(&self) -> Option<&Arc<Jobs>> {
        self.jobs.as_ref()
    }

    /// Path relative to the mount path, or `None` if `path` is outside it.
    pub fn strip_mount<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.mount_path.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(self.mount_path.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }

    /// Methods that would match `uri`, for `405 Method Not Allowed` answers.
    pub fn allowed_methods(&self, uri: &Uri) -> Vec<Method> {
        self.strip_mount(uri.path())
            .map(|path| self.routes.allowed_methods(path))
            .unwrap_or_default()
    }

    /// Matches the request and builds its resolver.
    ///
    /// Parameters are merged from path captures, then the query string, then
    /// the JSON body; a key already present is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns a not found `ApiError` if no route matches, or a wrong params
    /// `ApiError` if the query string or body cannot be parsed.
    pub fn bind(&self, method: &Method, uri: &Uri, body: &[u8]) -> Result<Binding<'_>, ApiError> {
        self.bind_body(method, uri, Body::Json(body))
    }

    /// [`bind`](Self::bind) for an `http::Request`.
    ///
    /// The body is read according to its `Content-Type`: form bodies are
    /// decoded like a query string, JSON bodies (or bodies without a content
    /// type) as a JSON object, and any other body is ignored.
    ///
    /// # Errors
    ///
    /// See [`bind`](Self::bind).
    pub fn bind_request(&self, request: &Request<Bytes>) -> Result<Binding<'_>, ApiError> {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        let body = Body::classify(content_type, request.body());
        self.bind_body(request.method(), request.uri(), body)
    }

    fn bind_body(&self, method: &Method, uri: &Uri, body: Body<'_>) -> Result<Binding<'_>, ApiError> {
        let Some(path) = self.strip_mount(uri.path()) else {
            debug!(method = %method, path = uri.path(), mount = %self.mount_path, "outside mount path");
            record_route_miss();
            return Err(ApiError::not_found(format!(
                "no route matches {method} {}",
                uri.path()
            )));
        };

        let matched = self.routes.match_route(method, path).map_err(|e| {
            record_route_miss();
            ApiError::from(e)
        })?;
        record_route_match(matched.resource().as_str(), matched.action());

        let mut bag: ParameterBag = matched
            .captures
            .iter()
            .map(|(key, value)| (key.to_string(), Value::String(value.to_string())))
            .collect();
        if let Some(query) = uri.query() {
            bag.extend_query(query)?;
        }
        match body {
            Body::Json(bytes) => bag.extend_json(bytes)?,
            Body::Form(bytes) => bag.extend_form(bytes)?,
            Body::Ignored => {}
        }

        let route = matched.route;
        let handler_id = route.handler_id();
        let main_type = self
            .result_types
            .get(&handler_id)
            .cloned()
            .unwrap_or_else(|| route.resource().clone());

        debug!(
            handler = %handler_id,
            resource = %main_type,
            params = bag.len(),
            "request bound"
        );

        let mut resolver = Resolver::new(bag, main_type);
        if let Some(jobs) = &self.jobs {
            resolver = resolver.with_jobs(Arc::clone(jobs));
        }

        Ok(Binding { route, resolver })
    }
}

/// A request body and how to read it.
#[derive(Debug, Clone, Copy)]
enum Body<'b> {
    Json(&'b [u8]),
    Form(&'b [u8]),
    Ignored,
}

impl<'b> Body<'b> {
    fn classify(content_type: Option<&str>, body: &'b [u8]) -> Self {
        let Some(content_type) = content_type else {
            return Self::Json(body);
        };
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "application/x-www-form-urlencoded" => Self::Form(body),
            "application/json" => Self::Json(body),
            other if other.ends_with("+json") => Self::Json(body),
            _ => Self::Ignored,
        }
    }
}

/// A matched route and the resolver for its parameters.
#[derive(Debug)]
pub struct Binding<'a> {
    route: &'a CompiledRoute,
    resolver: Resolver,
}

impl<'a> Binding<'a> {
    /// The matched route.
    pub fn route(&self) -> &'a CompiledRoute {
        self.route
    }

    /// `resource#action` of the matched route.
    pub fn handler_id(&self) -> String {
        self.route.handler_id()
    }

    /// The resolver.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Unwraps the resolver, typically into a `resource_params!` struct.
    pub fn into_resolver(self) -> Resolver {
        self.resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_core::ErrorCategory;
    use ariadne_router::{Capture, Resource};
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        let routes = RouteTable::compile([Resource::new("repository")
            .capture("id", Capture::Digit)
            .capture("slug", Capture::slug())
            .route("/repo/({repository.id}|{repository.slug})")
            .get("find")
            .resource(
                Resource::new("requests")
                    .route("/requests")
                    .get("find")
                    .post("create"),
            )])
        .unwrap();
        Dispatcher::new(routes).with_mount_path("/v3")
    }

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[test]
    fn test_strip_mount() {
        let d = dispatcher();
        assert_eq!(d.strip_mount("/v3/repo/1"), Some("/repo/1"));
        assert_eq!(d.strip_mount("/v3"), Some("/"));
        assert_eq!(d.strip_mount("/v3x/repo/1"), None);
        assert_eq!(d.strip_mount("/repo/1"), None);

        let unmounted = dispatcher().with_mount_path("");
        assert_eq!(unmounted.strip_mount("/repo/1"), Some("/repo/1"));
    }

    #[test]
    fn test_bind_captures() {
        let d = dispatcher();
        let binding = d.bind(&Method::GET, &uri("/v3/repo/42"), b"").unwrap();
        assert_eq!(binding.handler_id(), "repository#find");
        assert_eq!(binding.resolver().main_type(), "repository");
        assert_eq!(
            binding.resolver().params().get("repository.id"),
            Some(&json!("42"))
        );
    }

    #[test]
    fn test_bind_slug_decoded() {
        let d = dispatcher();
        let binding = d
            .bind(&Method::GET, &uri("/v3/repo/svenfuchs%2Fminimal"), b"")
            .unwrap();
        assert_eq!(
            binding.resolver().params().get("repository.slug"),
            Some(&json!("svenfuchs/minimal"))
        );
    }

    #[test]
    fn test_bind_merge_order() {
        let d = dispatcher();
        let binding = d
            .bind(
                &Method::POST,
                &uri("/v3/repo/42/requests?branch=query&repository.id=7"),
                br#"{"branch": "body", "message": "hi", "repository.id": 9}"#,
            )
            .unwrap();
        let params = binding.resolver().params();
        assert_eq!(params.get("repository.id"), Some(&json!("42")));
        assert_eq!(params.get("branch"), Some(&json!("query")));
        assert_eq!(params.get("message"), Some(&json!("hi")));
    }

    #[test]
    fn test_bind_result_type() {
        let d = dispatcher().with_result_type("requests#create", "request");
        let binding = d
            .bind(&Method::POST, &uri("/v3/repo/1/requests"), b"")
            .unwrap();
        assert_eq!(binding.resolver().main_type(), "request");

        let binding = d.bind(&Method::GET, &uri("/v3/repo/1/requests"), b"").unwrap();
        assert_eq!(binding.resolver().main_type(), "requests");
    }

    #[test]
    fn test_bind_not_found() {
        let d = dispatcher();
        let err = d.bind(&Method::GET, &uri("/v3/repo/1/nope"), b"").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);

        let err = d.bind(&Method::GET, &uri("/repo/1"), b"").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn test_bind_bad_body() {
        let d = dispatcher();
        let err = d
            .bind(&Method::POST, &uri("/v3/repo/1/requests"), b"[1, 2]")
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::WrongParams);
    }

    #[test]
    fn test_allowed_methods() {
        let d = dispatcher();
        assert_eq!(
            d.allowed_methods(&uri("/v3/repo/1/requests")),
            vec![Method::GET, Method::POST]
        );
        assert!(d.allowed_methods(&uri("/elsewhere")).is_empty());
    }

    #[test]
    fn test_bind_captures_are_strings() {
        let d = dispatcher();
        let binding = d.bind(&Method::GET, &uri("/v3/repo/7"), b"").unwrap();
        let params = binding.resolver().params();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("repository.id"), Some(&json!("7")));
        assert!(!params.contains_key("repository.slug"));
    }

    fn post_with(content_type: &str, body: &'static [u8]) -> Request<Bytes> {
        Request::builder()
            .method(Method::POST)
            .uri("/v3/repo/1/requests")
            .header(header::CONTENT_TYPE, content_type)
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_bind_request_form_body() {
        let d = dispatcher();
        let request = post_with(
            "application/x-www-form-urlencoded",
            b"branch=example&request[message]=hi",
        );
        let binding = d.bind_request(&request).unwrap();
        let params = binding.resolver().params();
        assert_eq!(params.get("branch"), Some(&json!("example")));
        assert_eq!(params.get("request"), Some(&json!({"message": "hi"})));
        assert_eq!(params.get("repository.id"), Some(&json!("1")));
    }

    #[test]
    fn test_bind_request_json_with_charset() {
        let d = dispatcher();
        let request = post_with("Application/JSON; charset=utf-8", br#"{"branch": "dev"}"#);
        let binding = d.bind_request(&request).unwrap();
        assert_eq!(binding.resolver().params().get("branch"), Some(&json!("dev")));
    }

    #[test]
    fn test_bind_request_other_body_ignored() {
        let d = dispatcher();
        let request = post_with("text/plain", b"branch=example");
        let binding = d.bind_request(&request).unwrap();
        assert!(!binding.resolver().params().contains_key("branch"));
    }

    #[test]
    fn test_bind_request() {
        let d = dispatcher();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v3/repo/1/requests")
            .body(Bytes::from_static(br#"{"branch": "dev"}"#))
            .unwrap();
        let binding = d.bind_request(&request).unwrap();
        assert_eq!(binding.resolver().params().get("branch"), Some(&json!("dev")));
    }
}
