//! Compiled route table.
//!
//! This module provides [`RouteTable`], the flattened, immutable output of a
//! resource tree, and [`CompiledRoute`], one (method, pattern, action,
//! resource) entry in it.

use std::borrow::Cow;
use std::fmt;

use ariadne_core::ResourceType;
use http::Method;
use regex::Regex;
use tracing::{debug, trace};

use crate::captures::Captures;
use crate::constraint::Constraints;
use crate::error::RouteError;
use crate::resource::{Action, Entry, Resource};
use crate::template::{CaptureGroup, PatternBuilder, Template};
use crate::RouteMatch;

/// One flattened route.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    method: Method,
    template: String,
    pattern: Regex,
    groups: Vec<CaptureGroup>,
    action: String,
    resource: ResourceType,
}

impl CompiledRoute {
    fn new(
        chain: &[Template],
        action: &Action,
        constraints: &Constraints,
        resource: &ResourceType,
    ) -> Result<Self, RouteError> {
        let subpath = Template::parse(action.subpath())?;

        let mut template = String::new();
        let mut builder = PatternBuilder::default();
        for part in chain.iter().chain(std::iter::once(&subpath)) {
            template.push_str(part.source());
            builder.push(part, constraints);
        }
        let (pattern, groups) = builder.finish(&template)?;

        Ok(Self {
            method: action.method().clone(),
            template,
            pattern,
            groups,
            action: action.name().to_string(),
            resource: resource.clone(),
        })
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Full path template, including every ancestor's template.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Anchored regular expression the path is matched against.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Action identifier.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Main resource type: the innermost resource declaring this route.
    pub fn resource(&self) -> &ResourceType {
        &self.resource
    }

    /// Handler identifier, `resource#action`.
    pub fn handler_id(&self) -> String {
        format!("{}#{}", self.resource, self.action)
    }

    /// Capture keys this route can populate, in template order.
    pub fn capture_keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|group| group.key.as_str())
    }

    /// Matches `path` against this route's pattern, ignoring the method.
    ///
    /// Captured values are percent-decoded.
    pub fn captures(&self, path: &str) -> Option<Captures> {
        let caps = self.pattern.captures(path)?;
        let mut captures = Captures::with_capacity(self.groups.len());
        for group in &self.groups {
            if let Some(m) = caps.name(&group.name) {
                captures.push(group.key.clone(), decode(m.as_str()));
            }
        }
        Some(captures)
    }
}

impl fmt::Display for CompiledRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.template, self.handler_id())
    }
}

fn decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(Cow::Borrowed(s)) => s.to_string(),
        Ok(Cow::Owned(s)) => s,
        Err(_) => raw.to_string(),
    }
}

/// Immutable, ordered list of compiled routes.
///
/// Routes are tried in declaration order and the first one whose method and
/// pattern match wins. There is no reordering by specificity: declare the
/// narrower route first.
///
/// # Example
///
/// ```rust
/// use ariadne_router::{Capture, Resource, RouteTable};
/// use http::Method;
///
/// let table = RouteTable::compile([Resource::new("build")
///     .capture("id", Capture::Digit)
///     .route("/build/{build.id}")
///     .get("find")])
/// .unwrap();
///
/// let m = table.match_route(&Method::GET, "/build/42").unwrap();
/// assert_eq!(m.resource(), "build");
/// assert_eq!(m.action(), "find");
/// assert_eq!(m.captures.get("build.id"), Some("42"));
///
/// assert!(table.match_route(&Method::GET, "/build/abc").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Compiles a list of top-level resources.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::InvalidResource`] if a resource name is not a
    /// snake_case identifier, or [`RouteError::InvalidTemplate`] or
    /// [`RouteError::InvalidConstraint`] if a template or constraint is
    /// malformed.
    pub fn compile<I>(resources: I) -> Result<Self, RouteError>
    where
        I: IntoIterator<Item = Resource>,
    {
        let mut routes = Vec::new();
        for resource in resources {
            compile_resource(&resource, &[], &Constraints::default(), &mut routes)?;
        }
        debug!(routes = routes.len(), "compiled route table");
        Ok(Self { routes })
    }

    /// Matches a method and path.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] if no route matches.
    pub fn match_route(&self, method: &Method, path: &str) -> Result<RouteMatch<'_>, RouteError> {
        for route in &self.routes {
            if route.method() != method {
                continue;
            }
            if let Some(captures) = route.captures(path) {
                debug!(
                    method = %method,
                    path,
                    handler = %route.handler_id(),
                    "route matched"
                );
                return Ok(RouteMatch::new(route, captures));
            }
        }
        debug!(method = %method, path, "no route matched");
        Err(RouteError::not_found(method, path))
    }

    /// Methods of every route whose pattern matches `path`.
    ///
    /// Useful for telling a 405 from a 404.
    pub fn allowed_methods(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = Vec::new();
        for route in &self.routes {
            if route.pattern.is_match(path) && !methods.contains(&route.method) {
                methods.push(route.method.clone());
            }
        }
        methods
    }

    /// All routes in match order.
    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn compile_resource(
    resource: &Resource,
    prefix: &[Template],
    inherited: &Constraints,
    out: &mut Vec<CompiledRoute>,
) -> Result<(), RouteError> {
    if !ResourceType::is_valid_name(resource.name().as_str()) {
        return Err(RouteError::invalid_resource(resource.name().as_str()));
    }
    let mut chain = prefix.to_vec();
    chain.push(Template::parse(resource.template())?);
    let constraints = inherited.overlay(resource.constraints())?;

    for entry in resource.entries() {
        match entry {
            Entry::Action(action) => {
                let route = CompiledRoute::new(&chain, action, &constraints, resource.name())?;
                trace!(route = %route, pattern = route.pattern.as_str(), "compiled route");
                out.push(route);
            }
            Entry::Resource(child) => compile_resource(child, &chain, &constraints, out)?,
        }
    }
    Ok(())
}
