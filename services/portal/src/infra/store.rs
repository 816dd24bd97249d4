use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use sesmine_domain::activity::{UserActivity, push_capped};
use sesmine_domain::contact::ContactMessage;
use sesmine_domain::id::{RequestId, SessionId, UserId};
use sesmine_domain::request::PendingRequest;
use sesmine_domain::session::{Session, SessionScope};
use sesmine_domain::settings::Settings;
use sesmine_domain::user::User;

use crate::domain::repository::{
    ActivityRepository, ContactRepository, PendingRequestRepository, SessionRepository,
    SettingsRepository, UserRepository,
};
use crate::domain::types::{
    CONTACTS_KEY, PENDING_REQUESTS_KEY, SETTINGS_KEY, USER_ACTIVITIES_KEY, USERS_KEY, session_key,
};
use crate::error::PortalError;
use crate::infra::storage::{KeyValueStorage, MemoryStorage, StorageBackend, StorageError};

const READINESS_KEY: &str = "sesmine_readyz";

/// Collections and sessions over two storage scopes.
///
/// Every mutation is a read-modify-write of one blob performed while holding the
/// writer lock, so concurrent requests in this process never interleave inside
/// one. Separate processes sharing a data directory are not coordinated.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Inner>,
}

struct Inner {
    durable: StorageBackend,
    short_lived: StorageBackend,
    writer: Mutex<()>,
}

impl LocalStore {
    pub fn new(durable: StorageBackend, short_lived: StorageBackend) -> Self {
        Self {
            inner: Arc::new(Inner {
                durable,
                short_lived,
                writer: Mutex::new(()),
            }),
        }
    }

    /// Both scopes in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new().into(), MemoryStorage::new().into())
    }

    /// Write and remove a marker key in the durable scope.
    pub async fn check_writable(&self) -> Result<(), StorageError> {
        let _guard = self.inner.writer.lock().await;
        let storage = self.durable();
        storage.set(READINESS_KEY, "{}".to_owned()).await?;
        storage.remove(READINESS_KEY).await
    }

    fn durable(&self) -> &StorageBackend {
        &self.inner.durable
    }

    fn scope(&self, scope: SessionScope) -> &StorageBackend {
        match scope {
            SessionScope::Persistent => &self.inner.durable,
            SessionScope::ShortLived => &self.inner.short_lived,
        }
    }

    /// `None` when the key is absent, unreadable or unparsable.
    async fn read<T: DeserializeOwned>(storage: &StorageBackend, key: &str) -> Option<T> {
        let raw = match storage.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using default");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "unparsable blob, using default");
                None
            }
        }
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        Self::read(self.durable(), key).await.unwrap_or_default()
    }

    async fn write<T: Serialize + ?Sized>(
        storage: &StorageBackend,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_owned(),
            source,
        })?;
        storage.set(key, raw).await
    }

    async fn email_taken(&self, email: &str) -> bool {
        let users: Vec<User> = self.read_collection(USERS_KEY).await;
        if users.iter().any(|u| u.has_email(email)) {
            return true;
        }
        let requests: Vec<PendingRequest> = self.read_collection(PENDING_REQUESTS_KEY).await;
        requests.iter().any(|r| r.email.eq_ignore_ascii_case(email))
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

impl UserRepository for LocalStore {
    async fn list(&self) -> Result<Vec<User>, PortalError> {
        Ok(self.read_collection(USERS_KEY).await)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, PortalError> {
        let users: Vec<User> = self.read_collection(USERS_KEY).await;
        Ok(users.into_iter().find(|u| &u.id == id))
    }

    async fn insert_unique(&self, user: &User) -> Result<(), PortalError> {
        let _guard = self.inner.writer.lock().await;
        if self.email_taken(&user.email).await {
            return Err(PortalError::DuplicateEmail);
        }
        let mut users: Vec<User> = self.read_collection(USERS_KEY).await;
        users.push(user.clone());
        Self::write(self.durable(), USERS_KEY, &users).await?;
        Ok(())
    }

    async fn update_with<F>(&self, id: &UserId, change: F) -> Result<Option<User>, PortalError>
    where
        F: FnOnce(&mut User) + Send,
    {
        let _guard = self.inner.writer.lock().await;
        let mut users: Vec<User> = self.read_collection(USERS_KEY).await;
        let Some(user) = users.iter_mut().find(|u| &u.id == id) else {
            return Ok(None);
        };
        change(user);
        let updated = user.clone();
        Self::write(self.durable(), USERS_KEY, &users).await?;
        Ok(Some(updated))
    }

    async fn seed_if_absent(&self, users: &[User]) -> Result<bool, PortalError> {
        let _guard = self.inner.writer.lock().await;
        if Self::read::<Vec<User>>(self.durable(), USERS_KEY)
            .await
            .is_some()
        {
            return Ok(false);
        }
        Self::write(self.durable(), USERS_KEY, users).await?;
        Ok(true)
    }
}

// ── PendingRequests ──────────────────────────────────────────────────────────

impl PendingRequestRepository for LocalStore {
    async fn list(&self) -> Result<Vec<PendingRequest>, PortalError> {
        Ok(self.read_collection(PENDING_REQUESTS_KEY).await)
    }

    async fn find_by_id(&self, id: &RequestId) -> Result<Option<PendingRequest>, PortalError> {
        let requests: Vec<PendingRequest> = self.read_collection(PENDING_REQUESTS_KEY).await;
        Ok(requests.into_iter().find(|r| &r.id == id))
    }

    async fn insert_unique(&self, request: &PendingRequest) -> Result<(), PortalError> {
        let _guard = self.inner.writer.lock().await;
        if self.email_taken(&request.email).await {
            return Err(PortalError::DuplicateEmail);
        }
        let mut requests: Vec<PendingRequest> = self.read_collection(PENDING_REQUESTS_KEY).await;
        requests.push(request.clone());
        Self::write(self.durable(), PENDING_REQUESTS_KEY, &requests).await?;
        Ok(())
    }

    async fn approve_with_user(
        &self,
        id: &RequestId,
        approved_at: DateTime<Utc>,
        user: &User,
    ) -> Result<PendingRequest, PortalError> {
        let _guard = self.inner.writer.lock().await;
        let mut requests: Vec<PendingRequest> = self.read_collection(PENDING_REQUESTS_KEY).await;
        let request = requests
            .iter_mut()
            .find(|r| &r.id == id && r.is_pending())
            .ok_or(PortalError::RequestNotFound)?;

        let mut users: Vec<User> = self.read_collection(USERS_KEY).await;
        if users.iter().any(|u| u.has_email(&user.email)) {
            return Err(PortalError::DuplicateEmail);
        }
        request.approve(approved_at);
        let approved = request.clone();

        let previous_users = self.durable().get(USERS_KEY).await.ok().flatten();
        users.push(user.clone());
        Self::write(self.durable(), USERS_KEY, &users).await?;

        if let Err(e) = Self::write(self.durable(), PENDING_REQUESTS_KEY, &requests).await {
            // Undo the user append so the request stays pending with no account.
            let restored = match previous_users {
                Some(raw) => self.durable().set(USERS_KEY, raw).await,
                None => self.durable().remove(USERS_KEY).await,
            };
            if let Err(restore_err) = restored {
                tracing::error!(
                    request_id = %id,
                    error = %restore_err,
                    "failed to restore users after approval write failure"
                );
            }
            return Err(e.into());
        }
        Ok(approved)
    }
}

// ── Sessions ─────────────────────────────────────────────────────────────────

impl SessionRepository for LocalStore {
    async fn put(
        &self,
        scope: SessionScope,
        id: SessionId,
        session: &Session,
    ) -> Result<(), PortalError> {
        Self::write(self.scope(scope), &session_key(id), session).await?;
        Ok(())
    }

    async fn get(
        &self,
        scope: SessionScope,
        id: SessionId,
    ) -> Result<Option<Session>, PortalError> {
        Ok(Self::read(self.scope(scope), &session_key(id)).await)
    }

    async fn remove(&self, scope: SessionScope, id: SessionId) -> Result<(), PortalError> {
        self.scope(scope).remove(&session_key(id)).await?;
        Ok(())
    }
}

// ── Contacts ─────────────────────────────────────────────────────────────────

impl ContactRepository for LocalStore {
    async fn append(&self, message: &ContactMessage) -> Result<(), PortalError> {
        let _guard = self.inner.writer.lock().await;
        let mut contacts: Vec<ContactMessage> = self.read_collection(CONTACTS_KEY).await;
        contacts.push(message.clone());
        Self::write(self.durable(), CONTACTS_KEY, &contacts).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ContactMessage>, PortalError> {
        Ok(self.read_collection(CONTACTS_KEY).await)
    }
}

// ── Activities ───────────────────────────────────────────────────────────────

impl ActivityRepository for LocalStore {
    async fn record(&self, entry: UserActivity) -> Result<(), PortalError> {
        let _guard = self.inner.writer.lock().await;
        let mut activities: Vec<UserActivity> = self.read_collection(USER_ACTIVITIES_KEY).await;
        push_capped(&mut activities, entry);
        Self::write(self.durable(), USER_ACTIVITIES_KEY, &activities).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserActivity>, PortalError> {
        Ok(self.read_collection(USER_ACTIVITIES_KEY).await)
    }
}

// ── Settings ─────────────────────────────────────────────────────────────────

impl SettingsRepository for LocalStore {
    async fn get(&self) -> Result<Settings, PortalError> {
        Ok(Self::read(self.durable(), SETTINGS_KEY)
            .await
            .unwrap_or_default())
    }

    async fn save(&self, settings: &Settings) -> Result<(), PortalError> {
        let _guard = self.inner.writer.lock().await;
        Self::write(self.durable(), SETTINGS_KEY, settings).await?;
        Ok(())
    }

    async fn save_if_absent(&self, settings: &Settings) -> Result<bool, PortalError> {
        let _guard = self.inner.writer.lock().await;
        if Self::read::<Settings>(self.durable(), SETTINGS_KEY)
            .await
            .is_some()
        {
            return Ok(false);
        }
        Self::write(self.durable(), SETTINGS_KEY, settings).await?;
        Ok(true)
    }
}
