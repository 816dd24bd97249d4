use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use sesmine_domain::plan::Plan;
use sesmine_domain::request::RequestStatus;

use crate::error::PortalError;
use crate::state::AppState;
use crate::usecase::registration::{SubmitRegistrationInput, SubmitRegistrationUseCase};

// ── POST /signup ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub phone: String,
    pub plan: Plan,
    #[serde(default)]
    pub newsletter: bool,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub id: String,
    pub status: RequestStatus,
    pub admin_notified: bool,
    pub welcome_sent: bool,
}

pub async fn submit_signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), PortalError> {
    let usecase = SubmitRegistrationUseCase {
        requests: state.request_repo(),
        notifier: state.notifier(),
        enabled: state.enable_registration,
    };
    let out = usecase
        .execute(SubmitRegistrationInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            company: body.company,
            job_title: body.job_title,
            phone: body.phone,
            plan: body.plan,
            newsletter: body.newsletter,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            id: out.request.id.to_string(),
            status: out.request.status,
            admin_notified: out.admin_notified.success,
            welcome_sent: out.welcome_sent.success,
        }),
    ))
}
