//! User account domain types.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;
use crate::plan::Plan;

/// Account role. Wire format: `"admin"` / `"user"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Capability tag attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    All,
    Basic,
    Advanced,
}

/// Opaque login credential.
///
/// Stored and compared as plaintext to stay compatible with existing records.
/// `matches` is the only comparison point; replacing it with a salted-hash check
/// does not touch any caller.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    /// The plaintext secret, for delivery to its owner only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// How a login identifier is compared against username/email.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentifierMatching {
    /// Byte-for-byte comparison against username and email.
    #[default]
    Exact,
    /// Exact username comparison, ASCII case-insensitive email comparison.
    CaseInsensitiveEmail,
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: Credential,
    pub name: String,
    pub role: Role,
    pub plan: Plan,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl User {
    /// Email uniqueness is case-insensitive.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }

    pub fn matches_identifier(&self, identifier: &str, matching: IdentifierMatching) -> bool {
        match matching {
            IdentifierMatching::Exact => self.username == identifier || self.email == identifier,
            IdentifierMatching::CaseInsensitiveEmail => {
                self.username == identifier || self.has_email(identifier)
            }
        }
    }
}
