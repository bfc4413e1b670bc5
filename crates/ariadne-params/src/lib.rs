//! # Ariadne Params
//!
//! Parameter bag and typed field resolution for Ariadne handlers.
//!
//! A request's parameters come from three places: path captures, the query
//! string and the JSON body. They are merged into one [`ParameterBag`] (first
//! source wins) and wrapped in a [`Resolver`] scoped to the request's main
//! resource type. Handlers read fields through accessors declared with
//! [`resource_params!`].
//!
//! | Item | Description |
//! |------|-------------|
//! | [`ParameterBag`] | Loosely structured request parameters |
//! | [`Field`] | A field declared under a resource prefix |
//! | [`Resolver`] | Tiered, cached field lookup plus coercions |
//! | [`resource_params!`] | Generates typed accessors for declared fields |
//! | [`user_condition`] | Login / ID / record → user lookup condition |
//!
//! ## Example
//!
//! ```rust
//! use ariadne_params::{resource_params, ParameterBag, Resolver};
//! use serde_json::json;
//!
//! resource_params! {
//!     /// Request creation parameters.
//!     pub struct RequestParams {
//!         request { branch, message, config }
//!     }
//! }
//!
//! // POST /repo/1/requests with {"@type": "repository", "branch": "example"}
//! let mut bag = ParameterBag::new();
//! bag.insert("repository.id", json!("1"));
//! bag.extend_json(br#"{"@type": "repository", "branch": "example"}"#).unwrap();
//!
//! let params = RequestParams::from(Resolver::new(bag, "request"));
//! let branch = params.branch().unwrap_or_else(|| json!("master"));
//! assert_eq!(branch, json!("master"));
//! ```

mod bag;
mod coerce;
mod error;
mod field;
mod macros;
mod resolver;
mod user;

pub use bag::{ParameterBag, INCLUDE_KEY, TYPE_KEY};
pub use coerce::to_bool;
pub use error::{ParamsError, ParamsResult};
pub use field::Field;
pub use resolver::Resolver;
pub use user::{user_condition, UserCondition, UserInput, UserRecord};

#[doc(hidden)]
pub mod __private {
    pub use paste::paste;
    pub use serde_json::Value;
}
