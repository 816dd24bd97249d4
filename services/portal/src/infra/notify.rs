use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::domain::repository::NotificationPort;
use crate::domain::types::{Notification, NotificationKind, NotificationOutcome};

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// EmailJS account settings.
#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub public_key: String,
    pub service_id: String,
    pub endpoint: String,
    pub timeout: Duration,
    /// Recipient of registration notifications.
    pub admin_email: String,
    /// Base URL used for the login link in approval emails.
    pub site_url: String,
}

impl EmailJsConfig {
    pub fn new(public_key: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            service_id: service_id.into(),
            endpoint: EMAILJS_SEND_URL.to_owned(),
            timeout: Duration::from_millis(10_000),
            admin_email: "admin@sesmine.com".to_owned(),
            site_url: "https://sesmine.com".to_owned(),
        }
    }
}

pub fn template_id(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::RegistrationNotification => "template_registration",
        NotificationKind::WelcomeEmail => "template_welcome",
        NotificationKind::ContactForm => "template_contact",
        NotificationKind::UserApproval => "template_approval",
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: Map<String, Value>,
}

/// Template variables for one notification.
pub fn template_params(notification: &Notification, config: &EmailJsConfig) -> Map<String, Value> {
    let params = match notification {
        Notification::Registration(request) => json!({
            "to_email": config.admin_email,
            "from_name": request.name,
            "from_email": request.email,
            "company": request.company,
            "job_title": request.job_title,
            "phone": request.phone,
            "plan": request.plan.as_str(),
            "newsletter": if request.newsletter { "yes" } else { "no" },
            "request_id": request.id.to_string(),
            "timestamp": request.timestamp.to_rfc3339(),
        }),
        Notification::Welcome(request) => json!({
            "to_email": request.email,
            "to_name": request.name,
            "plan": request.plan.as_str(),
        }),
        Notification::Contact(message) => json!({
            "to_email": config.admin_email,
            "from_name": message.name,
            "from_email": message.email,
            "subject": message.subject,
            "message": message.message,
            "timestamp": message.timestamp.to_rfc3339(),
        }),
        Notification::UserApproval {
            request,
            credential,
        } => json!({
            "to_email": request.email,
            "to_name": request.name,
            "username": request.email,
            "password": credential.expose(),
            "plan": request.plan.as_str(),
            "login_url": format!("{}/login.html", config.site_url.trim_end_matches('/')),
        }),
    };
    match params {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

// ── EmailJsNotifier ──────────────────────────────────────────────────────────

/// Sends notifications through the EmailJS REST API.
#[derive(Clone)]
pub struct EmailJsNotifier {
    client: Client,
    config: Arc<EmailJsConfig>,
}

impl EmailJsNotifier {
    pub fn new(config: EmailJsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }
}

impl NotificationPort for EmailJsNotifier {
    async fn send(&self, notification: &Notification) -> NotificationOutcome {
        let kind = notification.kind();
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id: template_id(kind),
            user_id: &self.config.public_key,
            template_params: template_params(notification, &self.config),
        };
        let result = self
            .client
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await;
        match result {
            Ok(resp) if resp.status().is_success() => {
                tracing::info!(kind = kind.as_str(), "notification sent");
                NotificationOutcome::sent()
            }
            Ok(resp) => {
                let status = resp.status();
                let detail = resp.text().await.unwrap_or_default();
                tracing::warn!(
                    kind = kind.as_str(),
                    %status,
                    detail = %detail,
                    "notification rejected"
                );
                NotificationOutcome::failed(format!("emailjs responded {status}: {detail}"))
            }
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), error = %e, "notification failed");
                NotificationOutcome::failed(e.to_string())
            }
        }
    }
}

// ── Notifier ─────────────────────────────────────────────────────────────────

/// Notification port selected at startup.
#[derive(Clone)]
pub enum Notifier {
    EmailJs(EmailJsNotifier),
    /// No email service configured. Every send reports failure.
    Disabled,
}

impl NotificationPort for Notifier {
    async fn send(&self, notification: &Notification) -> NotificationOutcome {
        match self {
            Self::EmailJs(n) => n.send(notification).await,
            Self::Disabled => {
                tracing::debug!(
                    kind = notification.kind().as_str(),
                    "email service not configured"
                );
                NotificationOutcome::failed("email service not configured")
            }
        }
    }
}
