use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Admin, Role};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionData {
    pub admin: Admin,
    pub logged_in_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(admin: Admin) -> Self {
        Self {
            admin,
            logged_in_at: Utc::now(),
        }
    }
}

/// The logged-in admin, persisted across runs until logout.
///
/// Passed explicitly to whatever needs to know who is acting.
pub struct Session {
    cache_dir: PathBuf,
    pub data: Option<SessionData>,
}

impl Session {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            data: None,
        }
    }

    /// Load session from disk. A corrupt file is discarded rather than
    /// blocking startup.
    pub fn load(&mut self) -> Result<bool> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(false);
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session file")?;
        match serde_json::from_str::<SessionData>(&contents) {
            Ok(data) => {
                debug!(admin = %data.admin.name, "Restored session");
                self.data = Some(data);
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session file");
                std::fs::remove_file(&path).context("Failed to remove session file")?;
                Ok(false)
            }
        }
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        if let Some(ref data) = self.data {
            let path = self.session_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(data)?;
            std::fs::write(path, contents)?;
        }
        Ok(())
    }

    /// Clear session data
    pub fn clear(&mut self) -> Result<()> {
        self.data = None;
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Update session with a freshly logged-in admin
    pub fn update(&mut self, admin: Admin) {
        self.data = Some(SessionData::new(admin));
    }

    pub fn admin(&self) -> Option<&Admin> {
        self.data.as_ref().map(|d| &d.admin)
    }

    pub fn admin_id(&self) -> Option<i64> {
        self.admin().map(|a| a.admin_id)
    }

    pub fn role(&self) -> Option<&Role> {
        self.admin().map(|a| &a.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.is_some()
    }

    /// True for Super Admin and Admin roles.
    pub fn is_admin(&self) -> bool {
        self.role().map(Role::is_admin).unwrap_or(false)
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}
