//! Resource declarations.
//!
//! A [`Resource`] is one node of the route tree: a path template, capture
//! constraints, actions, and nested resources. Nested resources append their
//! template to everything declared above them, and the innermost resource of a
//! matched route becomes the main resource type of the request.

use ariadne_core::ResourceType;
use http::Method;

use crate::constraint::{Capture, Constraints};

/// An action declared on a resource: method, sub-path and action identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    method: Method,
    name: String,
    subpath: String,
}

impl Action {
    /// Creates an action.
    pub fn new(method: Method, name: impl Into<String>, subpath: impl Into<String>) -> Self {
        Self {
            method,
            name: name.into(),
            subpath: subpath.into(),
        }
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Action identifier (e.g. `find`, `create`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template appended to the resource path; empty for the resource itself.
    pub fn subpath(&self) -> &str {
        &self.subpath
    }
}

/// Something declared inside a resource, in declaration order.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Action(Action),
    Resource(Resource),
}

/// A resource in the route tree.
///
/// Built with a fluent API; the declaration order of actions and nested
/// resources is the order routes are tried in.
///
/// # Example
///
/// ```rust
/// use ariadne_router::{Capture, Resource};
///
/// let repository = Resource::new("repository")
///     .capture("id", Capture::Digit)
///     .capture("slug", Capture::slug())
///     .route("/repo/({repository.id}|{repository.slug})")
///     .get("find")
///     .post_at("enable", "/enable")
///     .resource(
///         Resource::new("requests")
///             .route("/requests")
///             .get("find")
///             .post("create"),
///     );
///
/// assert_eq!(repository.name(), "repository");
/// assert_eq!(repository.actions().count(), 2);
/// assert_eq!(repository.resources().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Resource {
    name: ResourceType,
    template: String,
    constraints: Constraints,
    entries: Vec<Entry>,
}

impl Resource {
    /// Declares a resource type.
    pub fn new(name: impl Into<ResourceType>) -> Self {
        Self {
            name: name.into(),
            template: String::new(),
            constraints: Constraints::default(),
            entries: Vec::new(),
        }
    }

    /// Sets the path template of this resource.
    #[must_use]
    pub fn route(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Constrains what placeholders for `field` may match.
    ///
    /// `field` is either a bare field name (`id`), applying to every
    /// `{*.id}` placeholder, or a qualified key (`repository.id`).
    #[must_use]
    pub fn capture(mut self, field: impl Into<String>, capture: Capture) -> Self {
        self.constraints.insert(field, capture);
        self
    }

    /// Declares an action for any method and sub-path.
    #[must_use]
    pub fn action(
        mut self,
        method: Method,
        name: impl Into<String>,
        subpath: impl Into<String>,
    ) -> Self {
        self.entries
            .push(Entry::Action(Action::new(method, name, subpath)));
        self
    }

    /// Declares a GET action on the resource path.
    #[must_use]
    pub fn get(self, name: impl Into<String>) -> Self {
        self.action(Method::GET, name, "")
    }

    /// Declares a GET action on a sub-path.
    #[must_use]
    pub fn get_at(self, name: impl Into<String>, subpath: impl Into<String>) -> Self {
        self.action(Method::GET, name, subpath)
    }

    /// Declares a POST action on the resource path.
    #[must_use]
    pub fn post(self, name: impl Into<String>) -> Self {
        self.action(Method::POST, name, "")
    }

    /// Declares a POST action on a sub-path.
    #[must_use]
    pub fn post_at(self, name: impl Into<String>, subpath: impl Into<String>) -> Self {
        self.action(Method::POST, name, subpath)
    }

    /// Nests a resource under this one.
    #[must_use]
    pub fn resource(mut self, child: Resource) -> Self {
        self.entries.push(Entry::Resource(child));
        self
    }

    /// Resource type name.
    pub fn name(&self) -> &ResourceType {
        &self.name
    }

    /// Path template of this resource alone.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Actions declared directly on this resource.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Action(action) => Some(action),
            Entry::Resource(_) => None,
        })
    }

    /// Resources nested directly under this one.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entries.iter().filter_map(|entry| match entry {
            Entry::Resource(resource) => Some(resource),
            Entry::Action(_) => None,
        })
    }

    pub(crate) fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_new() {
        let resource = Resource::new("accounts");
        assert_eq!(resource.name(), "accounts");
        assert_eq!(resource.template(), "");
        assert_eq!(resource.actions().count(), 0);
        assert!(resource.constraints().is_empty());
    }

    #[test]
    fn test_default_subpath_is_empty() {
        let resource = Resource::new("build").route("/build/{build.id}").get("find");
        let action = resource.actions().next().unwrap();
        assert_eq!(action.method(), &Method::GET);
        assert_eq!(action.name(), "find");
        assert_eq!(action.subpath(), "");
    }

    #[test]
    fn test_sub_path_actions() {
        let resource = Resource::new("owner")
            .route("/owner/{owner.login}")
            .get("find")
            .get_at("repositories", "/repos")
            .post_at("sync", "/sync");

        let actions: Vec<_> = resource
            .actions()
            .map(|a| (a.method().clone(), a.name(), a.subpath()))
            .collect();
        assert_eq!(
            actions,
            vec![
                (Method::GET, "find", ""),
                (Method::GET, "repositories", "/repos"),
                (Method::POST, "sync", "/sync"),
            ]
        );
    }

    #[test]
    fn test_generic_action() {
        let resource = Resource::new("build").action(Method::DELETE, "cancel", "/cancel");
        let action = resource.actions().next().unwrap();
        assert_eq!(action.method(), &Method::DELETE);
        assert_eq!(action.subpath(), "/cancel");
    }

    #[test]
    fn test_entries_keep_declaration_order() {
        let resource = Resource::new("repository")
            .get("find")
            .resource(Resource::new("requests"))
            .post_at("enable", "/enable");

        let kinds: Vec<_> = resource
            .entries()
            .iter()
            .map(|entry| match entry {
                Entry::Action(a) => a.name().to_string(),
                Entry::Resource(r) => r.name().to_string(),
            })
            .collect();
        assert_eq!(kinds, vec!["find", "requests", "enable"]);
    }

    #[test]
    fn test_route_replaces_template() {
        let resource = Resource::new("user").route("/users").route("/user");
        assert_eq!(resource.template(), "/user");
    }

    #[test]
    fn test_capture_constraints() {
        let resource = Resource::new("user").capture("id", Capture::Digit);
        assert_eq!(resource.constraints().regex_for("user", "id"), "[0-9]+");
    }
}
