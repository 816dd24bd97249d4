use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::PortalError;
use crate::handlers::context::RequireSession;
use crate::state::AppState;
use crate::usecase::account::{ChangePasswordInput, ChangePasswordUseCase};

// ── PATCH /account/password ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    RequireSession(context): RequireSession,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, PortalError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
        rules: state.password_rules,
    };
    usecase
        .execute(
            &context.session,
            ChangePasswordInput {
                current: body.current_password,
                new: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
