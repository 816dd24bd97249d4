use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use sesmine_domain::id::UserId;
use sesmine_domain::plan::Plan;
use sesmine_domain::settings::Settings;
use sesmine_domain::user::{Credential, Permission, Role, User};

use crate::domain::repository::{SettingsRepository, UserRepository};
use crate::error::PortalError;

/// 2024-01-01T00:00:00Z, creation time of the built-in accounts.
const SEED_CREATED_AT: i64 = 1_704_067_200;

fn seed_user(
    id: &str,
    email: &str,
    password: &str,
    name: &str,
    role: Role,
    plan: Plan,
    company: Option<&str>,
) -> User {
    let permissions = match role {
        Role::Admin => BTreeSet::from([Permission::All]),
        Role::User => plan.default_permissions(),
    };
    User {
        id: UserId(id.to_owned()),
        username: email.to_owned(),
        email: email.to_owned(),
        password: Credential::new(password),
        name: name.to_owned(),
        role,
        plan,
        is_active: true,
        created_at: DateTime::from_timestamp(SEED_CREATED_AT, 0).unwrap_or_default(),
        last_login: None,
        company: company.map(str::to_owned),
        job_title: None,
        phone: None,
        permissions,
    }
}

/// Built-in administrator and demo accounts written on first run.
pub fn default_users() -> Vec<User> {
    vec![
        seed_user(
            "admin_001",
            "admin@sesmine.com",
            "admin123",
            "System Administrator",
            Role::Admin,
            Plan::Enterprise,
            None,
        ),
        seed_user(
            "demo_001",
            "demo@sesmine.com",
            "demo123",
            "Demo User",
            Role::User,
            Plan::Starter,
            Some("Demo Company"),
        ),
        seed_user(
            "eng_001",
            "engineer@sesmine.com",
            "eng123",
            "Professional Engineer",
            Role::User,
            Plan::Professional,
            Some("Engineering Solutions Ltd"),
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users_seeded: bool,
    pub settings_seeded: bool,
}

pub struct SeedDefaultsUseCase<U, S>
where
    U: UserRepository,
    S: SettingsRepository,
{
    pub users: U,
    pub settings: S,
    /// When `false`, only settings are seeded.
    pub seed_users: bool,
}

impl<U, S> SeedDefaultsUseCase<U, S>
where
    U: UserRepository,
    S: SettingsRepository,
{
    /// Writes defaults for absent (or unreadable) Users and Settings; existing data is kept.
    pub async fn execute(&self) -> Result<SeedReport, PortalError> {
        let users_seeded = if self.seed_users {
            self.users.seed_if_absent(&default_users()).await?
        } else {
            false
        };
        let settings_seeded = self.settings.save_if_absent(&Settings::default()).await?;
        if users_seeded || settings_seeded {
            tracing::info!(users_seeded, settings_seeded, "seeded default data");
        }
        Ok(SeedReport {
            users_seeded,
            settings_seeded,
        })
    }
}
