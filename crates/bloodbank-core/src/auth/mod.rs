//! Authentication module for the logged-in admin.
//!
//! This module provides:
//! - `Session`: the current admin, persisted to the cache directory until logout
//! - `CredentialStore`: optional OS-level password storage via keyring

pub mod credentials;
pub mod session;

pub use credentials::CredentialStore;
pub use session::{Session, SessionData};
