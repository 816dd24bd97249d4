use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::PortalError;
use crate::state::AppState;
use crate::usecase::contact::{SubmitContactInput, SubmitContactUseCase};

// ── POST /contact ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactResponse {
    pub id: String,
    pub email_sent: bool,
    pub message: &'static str,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), PortalError> {
    let usecase = SubmitContactUseCase {
        contacts: state.contact_repo(),
        notifier: state.notifier(),
    };
    let out = usecase
        .execute(SubmitContactInput {
            name: body.name,
            email: body.email,
            subject: body.subject,
            message: body.message,
        })
        .await?;
    let email_sent = out.email_sent();
    let message = if email_sent {
        "Message sent successfully! We will get back to you soon."
    } else {
        "Message received! We will get back to you soon."
    };
    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            id: out.message.id.to_string(),
            email_sent,
            message,
        }),
    ))
}
