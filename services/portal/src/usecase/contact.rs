use chrono::Utc;

use sesmine_domain::contact::ContactMessage;
use sesmine_domain::id::ContactId;
use sesmine_domain::validation::is_valid_email;

use crate::domain::repository::{ContactRepository, NotificationPort};
use crate::domain::types::{Notification, NotificationOutcome};
use crate::error::PortalError;
use crate::usecase::ids::{CONTACT_ID_PREFIX, generate_id};

// ── SubmitContact ────────────────────────────────────────────────────────────

pub struct SubmitContactInput {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug)]
pub struct ContactOutcome {
    pub message: ContactMessage,
    pub delivery: NotificationOutcome,
}

impl ContactOutcome {
    pub fn email_sent(&self) -> bool {
        self.delivery.success
    }
}

pub struct SubmitContactUseCase<C, N>
where
    C: ContactRepository,
    N: NotificationPort,
{
    pub contacts: C,
    pub notifier: N,
}

impl<C, N> SubmitContactUseCase<C, N>
where
    C: ContactRepository,
    N: NotificationPort,
{
    pub async fn execute(&self, input: SubmitContactInput) -> Result<ContactOutcome, PortalError> {
        let email = input.email.trim().to_owned();
        if !is_valid_email(&email) {
            return Err(PortalError::InvalidEmail);
        }
        let message = ContactMessage {
            id: ContactId(generate_id(CONTACT_ID_PREFIX)),
            name: input.name.trim().to_owned(),
            email,
            subject: input.subject.trim().to_owned(),
            message: input.message,
            timestamp: Utc::now(),
        };
        self.contacts.append(&message).await?;

        let delivery = self
            .notifier
            .send(&Notification::Contact(message.clone()))
            .await;
        if !delivery.success {
            tracing::warn!(
                contact_id = %message.id,
                error = delivery.error.as_deref().unwrap_or_default(),
                "contact form email failed"
            );
        }
        Ok(ContactOutcome { message, delivery })
    }
}

// ── ListContacts ─────────────────────────────────────────────────────────────

pub struct ListContactsUseCase<C: ContactRepository> {
    pub contacts: C,
}

impl<C: ContactRepository> ListContactsUseCase<C> {
    pub async fn execute(&self) -> Result<Vec<ContactMessage>, PortalError> {
        self.contacts.list().await
    }
}
