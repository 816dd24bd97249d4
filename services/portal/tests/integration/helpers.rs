use std::sync::{Arc, Mutex};

use chrono::Utc;

use sesmine_domain::activity::{UserActivity, push_capped};
use sesmine_domain::plan::Plan;
use sesmine_domain::session::Session;
use sesmine_domain::user::Role;
use sesmine_portal::domain::repository::{ActivityRepository, NotificationPort};
use sesmine_portal::domain::types::{
    CONTACTS_KEY, Notification, NotificationKind, NotificationOutcome, PENDING_REQUESTS_KEY,
    SETTINGS_KEY, USER_ACTIVITIES_KEY, USERS_KEY,
};
use sesmine_portal::error::PortalError;
use sesmine_portal::infra::storage::{KeyValueStorage, MemoryStorage, StorageError};
use sesmine_portal::infra::store::LocalStore;
use sesmine_portal::usecase::registration::SubmitRegistrationInput;
use sesmine_portal::usecase::seed::SeedDefaultsUseCase;
use sesmine_testing::fixture::Fixture;

// ── RecordingNotifier ────────────────────────────────────────────────────────

/// Records every notification; succeeds or fails every send.
#[derive(Clone)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<Notification>>>,
    pub succeed: bool,
}

impl RecordingNotifier {
    pub fn succeeding() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            succeed: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            succeed: false,
            ..Self::succeeding()
        }
    }

    /// Returns a shared handle to the sent notifications for post-execution inspection.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<Notification>>> {
        Arc::clone(&self.sent)
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.sent.lock().unwrap().iter().map(|n| n.kind()).collect()
    }
}

impl NotificationPort for RecordingNotifier {
    async fn send(&self, notification: &Notification) -> NotificationOutcome {
        self.sent.lock().unwrap().push(notification.clone());
        if self.succeed {
            NotificationOutcome::sent()
        } else {
            NotificationOutcome::failed("smtp unreachable")
        }
    }
}

// ── MockActivityRepo ─────────────────────────────────────────────────────────

pub struct MockActivityRepo {
    pub entries: Arc<Mutex<Vec<UserActivity>>>,
    pub fail: bool,
}

impl MockActivityRepo {
    pub fn empty() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    pub fn entries_handle(&self) -> Arc<Mutex<Vec<UserActivity>>> {
        Arc::clone(&self.entries)
    }
}

impl ActivityRepository for MockActivityRepo {
    async fn record(&self, entry: UserActivity) -> Result<(), PortalError> {
        if self.fail {
            return Err(StorageError::QuotaExceeded {
                key: USER_ACTIVITIES_KEY.to_owned(),
            }
            .into());
        }
        push_capped(&mut self.entries.lock().unwrap(), entry);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserActivity>, PortalError> {
        Ok(self.entries.lock().unwrap().clone())
    }
}

// ── Stores ───────────────────────────────────────────────────────────────────

/// In-memory store with the built-in accounts and default settings.
pub async fn seeded_store() -> LocalStore {
    let store = LocalStore::in_memory();
    SeedDefaultsUseCase {
        users: store.clone(),
        settings: store.clone(),
        seed_users: true,
    }
    .execute()
    .await
    .unwrap();
    store
}

/// Store whose durable scope holds the fixture files byte-for-byte.
pub async fn fixture_store() -> (LocalStore, MemoryStorage) {
    let durable = MemoryStorage::new();
    for (key, file) in [
        (USERS_KEY, "store/users.json"),
        (PENDING_REQUESTS_KEY, "store/pending_requests.json"),
        (CONTACTS_KEY, "store/contacts.json"),
        (USER_ACTIVITIES_KEY, "store/user_activities.json"),
        (SETTINGS_KEY, "store/settings.json"),
    ] {
        durable.set(key, Fixture::raw(file)).await.unwrap();
    }
    let store = LocalStore::new(durable.clone().into(), MemoryStorage::new().into());
    (store, durable)
}

// ── Builders ─────────────────────────────────────────────────────────────────

pub fn signup_input(email: &str) -> SubmitRegistrationInput {
    SubmitRegistrationInput {
        first_name: " Ada ".to_owned(),
        last_name: "Lovelace".to_owned(),
        email: email.to_owned(),
        company: "Analytical Engines".to_owned(),
        job_title: "Mathematician".to_owned(),
        phone: "555-0100".to_owned(),
        plan: Plan::Professional,
        newsletter: true,
    }
}

pub fn session(role: Role, plan: Plan) -> Session {
    Session {
        username: "someone@sesmine.com".to_owned(),
        email: "someone@sesmine.com".to_owned(),
        name: "Someone".to_owned(),
        role,
        plan,
        login_time: Utc::now(),
    }
}
