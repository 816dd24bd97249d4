//! Login sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::Plan;
use crate::user::{Role, User};

/// Storage area a session lives in, chosen by the "remember me" flag at login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionScope {
    /// Survives restarts (`remember = true`).
    Persistent,
    /// Lost when the process (or browser session) ends.
    ShortLived,
}

impl SessionScope {
    pub fn for_remember(remember: bool) -> Self {
        if remember {
            Self::Persistent
        } else {
            Self::ShortLived
        }
    }
}

/// Who is authenticated in a browser context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub plan: Plan,
    pub login_time: DateTime<Utc>,
}

impl Session {
    pub fn for_user(user: &User, login_time: DateTime<Utc>) -> Self {
        let email = if user.email.is_empty() {
            user.username.clone()
        } else {
            user.email.clone()
        };
        Self {
            username: user.username.clone(),
            email,
            name: user.name.clone(),
            role: user.role,
            plan: user.plan,
            login_time,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
