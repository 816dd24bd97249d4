use chrono::Utc;

use sesmine_domain::id::RequestId;
use sesmine_domain::plan::Plan;
use sesmine_domain::request::{PendingRequest, RequestStatus};
use sesmine_domain::user::{Credential, Role, User};
use sesmine_domain::validation::{is_valid_company, is_valid_email, normalize_email};

use crate::domain::repository::{NotificationPort, PendingRequestRepository};
use crate::domain::types::{Notification, NotificationOutcome};
use crate::error::PortalError;
use crate::usecase::account::NewUser;
use crate::usecase::ids::{REQUEST_ID_PREFIX, generate_id, generate_temp_credential};

// ── SubmitRegistration ───────────────────────────────────────────────────────

pub struct SubmitRegistrationInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub job_title: String,
    pub phone: String,
    pub plan: Plan,
    pub newsletter: bool,
}

#[derive(Debug)]
pub struct RegistrationOutcome {
    pub request: PendingRequest,
    pub admin_notified: NotificationOutcome,
    pub welcome_sent: NotificationOutcome,
}

pub struct SubmitRegistrationUseCase<R, N>
where
    R: PendingRequestRepository,
    N: NotificationPort,
{
    pub requests: R,
    pub notifier: N,
    pub enabled: bool,
}

impl<R, N> SubmitRegistrationUseCase<R, N>
where
    R: PendingRequestRepository,
    N: NotificationPort,
{
    pub async fn execute(
        &self,
        input: SubmitRegistrationInput,
    ) -> Result<RegistrationOutcome, PortalError> {
        if !self.enabled {
            return Err(PortalError::RegistrationDisabled);
        }

        let email = normalize_email(&input.email);
        if !is_valid_email(&email) {
            return Err(PortalError::InvalidEmail);
        }
        let company = input.company.trim().to_owned();
        if !is_valid_company(&company) {
            return Err(PortalError::InvalidCompany);
        }

        let name = format!("{} {}", input.first_name.trim(), input.last_name.trim())
            .trim()
            .to_owned();
        let request = PendingRequest {
            id: RequestId(generate_id(REQUEST_ID_PREFIX)),
            name,
            email,
            company,
            job_title: input.job_title.trim().to_owned(),
            phone: input.phone.trim().to_owned(),
            plan: input.plan,
            newsletter: input.newsletter,
            timestamp: Utc::now(),
            status: RequestStatus::Pending,
            approved_at: None,
        };
        self.requests.insert_unique(&request).await?;
        tracing::info!(
            request_id = %request.id,
            plan = request.plan.as_str(),
            "registration submitted"
        );

        let registration = Notification::Registration(request.clone());
        let welcome = Notification::Welcome(request.clone());
        let (admin_notified, welcome_sent) = futures::join!(
            self.notifier.send(&registration),
            self.notifier.send(&welcome),
        );
        let outcomes = [
            ("admin notification", &admin_notified),
            ("welcome email", &welcome_sent),
        ];
        for (label, outcome) in outcomes {
            if !outcome.success {
                tracing::warn!(
                    request_id = %request.id,
                    error = outcome.error.as_deref().unwrap_or_default(),
                    "{label} failed"
                );
            }
        }

        Ok(RegistrationOutcome {
            request,
            admin_notified,
            welcome_sent,
        })
    }
}

// ── ApproveRequest ───────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApprovalOutcome {
    pub user: User,
    pub request: PendingRequest,
    pub delivery: NotificationOutcome,
    /// The temporary credential, kept only when its email was not delivered so the
    /// admin can pass it on by hand.
    pub credential: Option<Credential>,
}

impl ApprovalOutcome {
    /// `false` means the account exists but its credential must be sent manually.
    pub fn credential_delivered(&self) -> bool {
        self.delivery.success
    }
}

pub struct ApproveRequestUseCase<R, N>
where
    R: PendingRequestRepository,
    N: NotificationPort,
{
    pub requests: R,
    pub notifier: N,
}

impl<R, N> ApproveRequestUseCase<R, N>
where
    R: PendingRequestRepository,
    N: NotificationPort,
{
    pub async fn execute(&self, id: &RequestId) -> Result<ApprovalOutcome, PortalError> {
        let request = self
            .requests
            .find_by_id(id)
            .await?
            .filter(PendingRequest::is_pending)
            .ok_or(PortalError::RequestNotFound)?;

        let credential = Credential::new(generate_temp_credential());
        let now = Utc::now();
        let user = NewUser {
            name: request.name.clone(),
            email: request.email.clone(),
            role: Role::User,
            plan: request.plan,
            company: Some(request.company.clone()),
            job_title: Some(request.job_title.clone()),
            phone: Some(request.phone.clone()),
        }
        .into_user(credential.clone(), now);

        let approved = self.requests.approve_with_user(id, now, &user).await?;
        tracing::info!(request_id = %id, user_id = %user.id, "registration approved");

        let delivery = self
            .notifier
            .send(&Notification::UserApproval {
                request: approved.clone(),
                credential: credential.clone(),
            })
            .await;
        if !delivery.success {
            tracing::warn!(
                request_id = %id,
                error = delivery.error.as_deref().unwrap_or_default(),
                "approval email failed, credential must be sent manually"
            );
        }

        let credential = (!delivery.success).then_some(credential);
        Ok(ApprovalOutcome {
            user,
            request: approved,
            delivery,
            credential,
        })
    }
}

// ── ListRequests ─────────────────────────────────────────────────────────────

pub struct ListRequestsUseCase<R: PendingRequestRepository> {
    pub requests: R,
}

impl<R: PendingRequestRepository> ListRequestsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<PendingRequest>, PortalError> {
        self.requests.list().await
    }
}
