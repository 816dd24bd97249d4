use sesmine_domain::user::IdentifierMatching;
use sesmine_domain::validation::PasswordRules;
use sesmine_session_types::cookie::CookieSettings;

use crate::config::PortalConfig;
use crate::infra::notify::{EmailJsNotifier, Notifier};
use crate::infra::storage::{FileStorage, MemoryStorage, StorageBackend};
use crate::infra::store::LocalStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: LocalStore,
    pub notifier: Notifier,
    pub cookie: CookieSettings,
    pub enable_registration: bool,
    pub identifier_matching: IdentifierMatching,
    pub password_rules: PasswordRules,
}

impl AppState {
    /// Durable scope on disk when `DATA_DIR` is set, in memory otherwise.
    /// The short-lived scope is always in memory.
    pub fn from_config(config: &PortalConfig) -> anyhow::Result<Self> {
        let durable: StorageBackend = match &config.data_dir {
            Some(dir) => FileStorage::new(dir).into(),
            None => {
                tracing::warn!("DATA_DIR not set, durable store is in memory");
                MemoryStorage::new().into()
            }
        };
        let notifier = match &config.emailjs {
            Some(emailjs) => Notifier::EmailJs(EmailJsNotifier::new(emailjs.clone())?),
            None => {
                tracing::warn!("EmailJS not configured, notifications are disabled");
                Notifier::Disabled
            }
        };
        Ok(Self {
            store: LocalStore::new(durable, MemoryStorage::new().into()),
            notifier,
            cookie: config.cookie.clone(),
            enable_registration: config.enable_registration,
            identifier_matching: config.identifier_matching,
            password_rules: config.password_rules,
        })
    }

    /// In-memory state with notifications disabled and default policies.
    pub fn in_memory() -> Self {
        Self {
            store: LocalStore::in_memory(),
            notifier: Notifier::Disabled,
            cookie: CookieSettings::default(),
            enable_registration: true,
            identifier_matching: IdentifierMatching::default(),
            password_rules: PasswordRules::default(),
        }
    }

    pub fn user_repo(&self) -> LocalStore {
        self.store.clone()
    }

    pub fn request_repo(&self) -> LocalStore {
        self.store.clone()
    }

    pub fn session_repo(&self) -> LocalStore {
        self.store.clone()
    }

    pub fn contact_repo(&self) -> LocalStore {
        self.store.clone()
    }

    pub fn activity_repo(&self) -> LocalStore {
        self.store.clone()
    }

    pub fn settings_repo(&self) -> LocalStore {
        self.store.clone()
    }

    pub fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }
}
