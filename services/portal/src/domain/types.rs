use sesmine_domain::contact::ContactMessage;
use sesmine_domain::id::SessionId;
use sesmine_domain::request::PendingRequest;
use sesmine_domain::session::{Session, SessionScope};
use sesmine_domain::user::Credential;

/// Storage key of the Users collection.
pub const USERS_KEY: &str = "sesmine_users";
/// Storage key of the PendingRequests collection.
pub const PENDING_REQUESTS_KEY: &str = "sesmine_pending_requests";
/// Storage key of the Contacts collection.
pub const CONTACTS_KEY: &str = "sesmine_contacts";
/// Storage key of the UserActivities ring.
pub const USER_ACTIVITIES_KEY: &str = "sesmine_user_activities";
/// Storage key of the Settings value.
pub const SETTINGS_KEY: &str = "sesmine_settings";

/// Storage key of one browser's session record.
pub fn session_key(id: SessionId) -> String {
    format!("sesmine_session:{id}")
}

/// Session resolved for the current request. Built once per page load from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionContext {
    pub id: SessionId,
    pub scope: SessionScope,
    pub session: Session,
}

/// Kinds of outbound email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    RegistrationNotification,
    WelcomeEmail,
    ContactForm,
    UserApproval,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RegistrationNotification => "registration_notification",
            Self::WelcomeEmail => "welcome_email",
            Self::ContactForm => "contact_form",
            Self::UserApproval => "user_approval",
        }
    }
}

/// An email to deliver through the notification port.
#[derive(Debug, Clone)]
pub enum Notification {
    /// Tells the site admin about a new signup.
    Registration(PendingRequest),
    /// Acknowledges a signup to the applicant.
    Welcome(PendingRequest),
    Contact(ContactMessage),
    /// Delivers the one-time credential of an approved account.
    UserApproval {
        request: PendingRequest,
        credential: Credential,
    },
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Registration(_) => NotificationKind::RegistrationNotification,
            Self::Welcome(_) => NotificationKind::WelcomeEmail,
            Self::Contact(_) => NotificationKind::ContactForm,
            Self::UserApproval { .. } => NotificationKind::UserApproval,
        }
    }
}

/// Result of one delivery attempt. Failures are reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub success: bool,
    pub error: Option<String>,
}

impl NotificationOutcome {
    pub fn sent() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}
