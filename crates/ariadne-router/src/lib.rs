//! Resource route DSL for Ariadne.
//!
//! Routes are declared as a tree of [`Resource`]s. Each resource has a path
//! template, capture constraints, actions and nested resources; nested
//! resources extend the path of everything above them. The tree is compiled
//! once into a [`RouteTable`], an ordered list of anchored patterns that is
//! matched first-wins.
//!
//! # Features
//!
//! - **Typed captures**: placeholders are keyed `resource.field`
//!   (`{repository.id}`), so captured values land in the parameter bag under
//!   the right prefix
//! - **Alternations**: `({repository.id}|{repository.slug})` tries each
//!   alternative in order and captures only the one that matched
//! - **Constraints**: [`Capture::Digit`], [`Capture::slug`] or any regex,
//!   inherited by nested resources
//! - **Main resource type**: the innermost resource of a matched route
//!
//! # Example
//!
//! ```rust
//! use ariadne_router::{Capture, Resource, RouteTable};
//! use http::Method;
//!
//! let repository = Resource::new("repository")
//!     .capture("id", Capture::Digit)
//!     .capture("slug", Capture::slug())
//!     .route("/repo/({repository.id}|{repository.slug})")
//!     .get("find")
//!     .resource(
//!         Resource::new("requests")
//!             .route("/requests")
//!             .get("find")
//!             .post("create"),
//!     );
//!
//! let table = RouteTable::compile([repository]).unwrap();
//!
//! let m = table.match_route(&Method::POST, "/repo/42/requests").unwrap();
//! assert_eq!(m.handler_id(), "requests#create");
//! assert_eq!(m.captures.get("repository.id"), Some("42"));
//!
//! let m = table.match_route(&Method::GET, "/repo/svenfuchs%2Fminimal").unwrap();
//! assert_eq!(m.resource(), "repository");
//! assert_eq!(m.captures.get("repository.slug"), Some("svenfuchs/minimal"));
//! ```
//!
//! # Matching
//!
//! ```text
//!   Resource tree ──compile──▶ RouteTable [ (GET, ^/repo/(?:..|..)$, repository#find),
//!                                           (GET, ^/repo/(?:..|..)/requests$, requests#find),
//!                                           ... ]
//!   (method, path) ──scan in order──▶ first (route, captures)
//! ```

mod captures;
mod constraint;
mod error;
mod resource;
mod router;
mod template;

pub use captures::Captures;
pub use constraint::{Capture, DEFAULT_PATTERN, SLUG_PATTERN};
pub use error::RouteError;
pub use resource::{Action, Resource};
pub use router::{CompiledRoute, RouteTable};

use ariadne_core::ResourceType;

/// A matched route with its captured values.
#[derive(Debug, Clone)]
pub struct RouteMatch<'a> {
    /// The route that matched.
    pub route: &'a CompiledRoute,
    /// Values captured from the path.
    pub captures: Captures,
}

impl<'a> RouteMatch<'a> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(route: &'a CompiledRoute, captures: Captures) -> Self {
        Self { route, captures }
    }

    /// Main resource type of the matched route.
    pub fn resource(&self) -> &'a ResourceType {
        self.route.resource()
    }

    /// Action identifier of the matched route.
    pub fn action(&self) -> &'a str {
        self.route.action()
    }

    /// Handler identifier, `resource#action`.
    pub fn handler_id(&self) -> String {
        self.route.handler_id()
    }
}
