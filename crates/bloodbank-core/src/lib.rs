//! Core library for bloodbank.
//!
//! Tracks donated blood units from intake to expiry: computes default expiry
//! dates, classifies freshness, aggregates stock per blood group and raises
//! low-stock and expiring-unit alerts. Also carries the record store client,
//! the admin session and the client-side validation used by the CLI.

pub mod api;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod inventory;
pub mod models;
pub mod utils;
pub mod validation;

pub use api::{ApiClient, ApiError};
pub use auth::{CredentialStore, Session};
pub use config::Config;
pub use dashboard::{DashboardSnapshot, DashboardView};
pub use validation::ValidationError;
