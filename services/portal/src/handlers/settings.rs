use axum::{Json, extract::State};

use sesmine_domain::settings::Settings;

use crate::error::PortalError;
use crate::handlers::context::RequireAdmin;
use crate::state::AppState;
use crate::usecase::settings::{GetSettingsUseCase, SaveSettingsUseCase};

// ── GET /settings ────────────────────────────────────────────────────────────

pub async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, PortalError> {
    let usecase = GetSettingsUseCase {
        settings: state.settings_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── PUT /settings ────────────────────────────────────────────────────────────

/// Settings are site-wide, so only admins may change them.
pub async fn put_settings(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(body): Json<Settings>,
) -> Result<Json<Settings>, PortalError> {
    let usecase = SaveSettingsUseCase {
        settings: state.settings_repo(),
    };
    usecase.execute(&body).await?;
    Ok(Json(body))
}
