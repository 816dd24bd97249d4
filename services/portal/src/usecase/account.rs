use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use sesmine_domain::id::UserId;
use sesmine_domain::plan::Plan;
use sesmine_domain::session::Session;
use sesmine_domain::user::{Credential, IdentifierMatching, Permission, Role, User};
use sesmine_domain::validation::{PasswordRules, is_valid_email, is_valid_password, normalize_email};

use crate::domain::repository::UserRepository;
use crate::error::PortalError;
use crate::usecase::ids::{USER_ID_PREFIX, generate_id};

// ── Authenticate ─────────────────────────────────────────────────────────────

/// First user whose username or email matches `identifier`, that is active, and whose
/// credential matches. Unknown, inactive and wrong-password all yield `InvalidCredentials`.
pub async fn authenticate<U: UserRepository>(
    users: &U,
    identifier: &str,
    password: &str,
    matching: IdentifierMatching,
) -> Result<User, PortalError> {
    users
        .list()
        .await?
        .into_iter()
        .find(|u| {
            u.matches_identifier(identifier, matching)
                && u.is_active
                && u.password.matches(password)
        })
        .ok_or(PortalError::InvalidCredentials)
}

// ── RecordLogin ──────────────────────────────────────────────────────────────

pub async fn record_login<U: UserRepository>(
    users: &U,
    id: &UserId,
    at: DateTime<Utc>,
) -> Result<(), PortalError> {
    users
        .update_with(id, |u| u.last_login = Some(at))
        .await?
        .ok_or(PortalError::UserNotFound)?;
    Ok(())
}

// ── CreateUser ───────────────────────────────────────────────────────────────

/// Profile of an account about to be created. `email` is expected normalized.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub plan: Plan,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
}

impl NewUser {
    /// Active account with a generated id; username is the email.
    pub fn into_user(self, password: Credential, now: DateTime<Utc>) -> User {
        let permissions = match self.role {
            Role::Admin => BTreeSet::from([Permission::All]),
            Role::User => self.plan.default_permissions(),
        };
        User {
            id: UserId(generate_id(USER_ID_PREFIX)),
            username: self.email.clone(),
            email: self.email,
            password,
            name: self.name,
            role: self.role,
            plan: self.plan,
            is_active: true,
            created_at: now,
            last_login: None,
            company: self.company,
            job_title: self.job_title,
            phone: self.phone,
            permissions,
        }
    }
}

pub struct CreateUserInput {
    pub user: NewUser,
    pub password: String,
}

pub struct CreateUserUseCase<U: UserRepository> {
    pub users: U,
    pub rules: PasswordRules,
}

impl<U: UserRepository> CreateUserUseCase<U> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, PortalError> {
        let mut profile = input.user;
        profile.email = normalize_email(&profile.email);
        if !is_valid_email(&profile.email) {
            return Err(PortalError::InvalidEmail);
        }
        if !is_valid_password(&input.password, &self.rules) {
            return Err(PortalError::WeakPassword);
        }
        let user = profile.into_user(Credential::new(input.password), Utc::now());
        self.users.insert_unique(&user).await?;
        tracing::info!(user_id = %user.id, plan = user.plan.as_str(), "user created");
        Ok(user)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current: String,
    pub new: String,
}

pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
    pub rules: PasswordRules,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(
        &self,
        session: &Session,
        input: ChangePasswordInput,
    ) -> Result<(), PortalError> {
        let user = self
            .users
            .list()
            .await?
            .into_iter()
            .find(|u| u.username == session.username)
            .ok_or(PortalError::Unauthorized)?;
        if !user.password.matches(&input.current) {
            return Err(PortalError::InvalidCredentials);
        }
        if !is_valid_password(&input.new, &self.rules) {
            return Err(PortalError::WeakPassword);
        }
        let password = Credential::new(input.new);
        self.users
            .update_with(&user.id, move |u| u.password = password)
            .await?
            .ok_or(PortalError::UserNotFound)?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }
}

// ── SetUserActive ────────────────────────────────────────────────────────────

pub struct SetUserActiveUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> SetUserActiveUseCase<U> {
    pub async fn execute(&self, id: &UserId, active: bool) -> Result<User, PortalError> {
        let user = self
            .users
            .update_with(id, |u| u.is_active = active)
            .await?
            .ok_or(PortalError::UserNotFound)?;
        tracing::info!(user_id = %id, active, "user activation changed");
        Ok(user)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListUsersUseCase<U> {
    pub async fn execute(&self) -> Result<Vec<User>, PortalError> {
        self.users.list().await
    }
}
