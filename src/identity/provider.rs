use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AdminError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Advisor,
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Advisor => "advisor",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "advisor" => Ok(Role::Advisor),
            "student" => Ok(Role::Student),
            other => Err(AdminError::Invalid(format!("Unknown role: {other}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Source of user records for `login`.
pub trait IdentityProvider: Send + Sync {
    fn sign_in(&self, role: Role, name: &str) -> Result<User, AdminError>;
}

/// Fabricates a user for any name with no credential check. Development only.
#[derive(Debug, Clone)]
pub struct DemoIdentityProvider {
    email_domain: String,
}

impl DemoIdentityProvider {
    pub fn new(email_domain: impl Into<String>) -> Self {
        Self {
            email_domain: email_domain.into(),
        }
    }
}

impl IdentityProvider for DemoIdentityProvider {
    fn sign_in(&self, role: Role, name: &str) -> Result<User, AdminError> {
        if name.trim().is_empty() {
            return Err(AdminError::MissingField("name"));
        }
        Ok(User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: derive_email(name, &self.email_domain),
            role,
        })
    }
}

/// `"  Jane   Doe "` -> `jane.doe@<domain>`
///
/// Leading and trailing whitespace is trimmed, never turned into dots.
pub fn derive_email(name: &str, domain: &str) -> String {
    let local = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(".");
    format!("{local}@{domain}")
}
