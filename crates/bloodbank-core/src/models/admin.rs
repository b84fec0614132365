use std::fmt;

use serde::{Deserialize, Serialize};

use super::wire;

/// Staff role of an admin account. Unrecognized roles are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    SuperAdmin,
    #[default]
    Admin,
    Staff,
    Volunteer,
    Other(String),
}

impl Role {
    pub fn label(&self) -> &str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::Admin => "Admin",
            Role::Staff => "Staff",
            Role::Volunteer => "Volunteer",
            Role::Other(label) => label,
        }
    }

    /// Whether the role may manage other admin accounts.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Super Admin" => Role::SuperAdmin,
            "Admin" => Role::Admin,
            "Staff" => Role::Staff,
            "Volunteer" => Role::Volunteer,
            _ => Role::Other(label),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::from(s.trim().to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// An admin account; the logged-in principal is one of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    #[serde(deserialize_with = "wire::id")]
    pub admin_id: i64,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub campus: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// Body of an admin create (or self-registration) request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAdmin {
    pub name: String,
    pub role: Role,
    pub campus: String,
    pub department: String,
    pub password: String,
}
