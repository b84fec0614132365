//! REST API client module for the blood bank record store.
//!
//! The store speaks flat snake_case JSON over HTTP. It has no token scheme:
//! login returns the admin record, which the caller keeps in its `Session`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
