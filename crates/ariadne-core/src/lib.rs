//! # Ariadne Core
//!
//! Core types shared by the Ariadne request-binding crates.
//!
//! - [`ResourceType`] - name of an API resource type, used as a parameter prefix
//! - [`ApiError`] - the error every binding failure converts into
//! - [`ErrorCategory`] - classification with HTTP status and `error_type` mapping

#![doc(html_root_url = "https://docs.rs/ariadne-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod resource;

pub use error::{ApiError, ApiResult, ErrorCategory};
pub use resource::ResourceType;
