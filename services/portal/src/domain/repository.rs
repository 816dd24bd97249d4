#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};

use sesmine_domain::activity::UserActivity;
use sesmine_domain::contact::ContactMessage;
use sesmine_domain::id::{RequestId, SessionId, UserId};
use sesmine_domain::request::PendingRequest;
use sesmine_domain::session::{Session, SessionScope};
use sesmine_domain::settings::Settings;
use sesmine_domain::user::User;

use crate::domain::types::{Notification, NotificationOutcome};
use crate::error::PortalError;

/// Repository for user accounts.
///
/// Reads never fail on unreadable data: a corrupt collection loads as empty.
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, PortalError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PortalError>;

    /// Insert a user unless its email is already used by a user or a pending request
    /// (`DuplicateEmail`). Check and insert happen under the store's writer lock.
    async fn insert_unique(&self, user: &User) -> Result<(), PortalError>;

    /// Apply `change` to the stored user with `id` and persist it.
    /// Returns the updated user, or `None` if no such user exists.
    async fn update_with<F>(&self, id: &UserId, change: F) -> Result<Option<User>, PortalError>
    where
        F: FnOnce(&mut User) + Send;

    /// Write `users` only if the collection is absent or unreadable. Returns `true` if written.
    async fn seed_if_absent(&self, users: &[User]) -> Result<bool, PortalError>;
}

/// Repository for registration requests.
pub trait PendingRequestRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<PendingRequest>, PortalError>;

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<PendingRequest>, PortalError>;

    /// Insert a request unless its email is already used by a user or another request.
    async fn insert_unique(&self, request: &PendingRequest) -> Result<(), PortalError>;

    /// Append `user` and mark the request approved, under one writer lock.
    /// Fails with `RequestNotFound` if the request is missing or already approved.
    async fn approve_with_user(
        &self,
        id: &RequestId,
        approved_at: DateTime<Utc>,
        user: &User,
    ) -> Result<PendingRequest, PortalError>;
}

/// Session records, one per browser, in the scope chosen at login.
pub trait SessionRepository: Send + Sync {
    async fn put(
        &self,
        scope: SessionScope,
        id: SessionId,
        session: &Session,
    ) -> Result<(), PortalError>;

    /// Unparsable records load as `None`.
    async fn get(&self, scope: SessionScope, id: SessionId)
    -> Result<Option<Session>, PortalError>;

    async fn remove(&self, scope: SessionScope, id: SessionId) -> Result<(), PortalError>;
}

/// Append-only contact-form inbox.
pub trait ContactRepository: Send + Sync {
    async fn append(&self, message: &ContactMessage) -> Result<(), PortalError>;
    async fn list(&self) -> Result<Vec<ContactMessage>, PortalError>;
}

/// Newest-first page-visit log capped at `MAX_ACTIVITIES`.
pub trait ActivityRepository: Send + Sync {
    /// Prepend `entry` and drop the oldest entries beyond the cap.
    async fn record(&self, entry: UserActivity) -> Result<(), PortalError>;
    async fn list(&self) -> Result<Vec<UserActivity>, PortalError>;
}

/// The single site settings value.
pub trait SettingsRepository: Send + Sync {
    /// Defaults when absent or unreadable.
    async fn get(&self) -> Result<Settings, PortalError>;
    async fn save(&self, settings: &Settings) -> Result<(), PortalError>;
    /// Write `settings` only if no readable value exists. Returns `true` if written.
    async fn save_if_absent(&self, settings: &Settings) -> Result<bool, PortalError>;
}

/// Port for sending email. Every call is fallible and reported through the outcome.
pub trait NotificationPort: Send + Sync {
    async fn send(&self, notification: &Notification) -> NotificationOutcome;
}
