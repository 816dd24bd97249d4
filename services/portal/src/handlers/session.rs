use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sesmine_domain::page::Page;
use sesmine_domain::plan::Plan;
use sesmine_domain::session::SessionScope;
use sesmine_domain::user::Role;
use sesmine_session_types::cookie::{clear_session_cookie, set_session_cookie};
use sesmine_session_types::extract::SessionCookie;

use crate::domain::types::SessionContext;
use crate::error::PortalError;
use crate::handlers::context::RequireSession;
use crate::state::AppState;
use crate::usecase::session::{LoginInput, LoginUseCase, LogoutUseCase};

#[derive(Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub plan: Plan,
    #[serde(serialize_with = "sesmine_core::serde::to_rfc3339_ms")]
    pub login_time: DateTime<Utc>,
    pub scope: SessionScope,
}

impl From<&SessionContext> for SessionResponse {
    fn from(context: &SessionContext) -> Self {
        let s = &context.session;
        Self {
            username: s.username.clone(),
            email: s.email.clone(),
            name: s.name.clone(),
            role: s.role,
            plan: s.plan,
            login_time: s.login_time,
            scope: context.scope,
        }
    }
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    /// Username or email.
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub redirect: Page,
    pub session: SessionResponse,
}

pub async fn login(
    State(state): State<AppState>,
    SessionCookie(previous): SessionCookie,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, PortalError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
        matching: state.identifier_matching,
    };
    let out = usecase
        .execute(LoginInput {
            identifier: body.username,
            password: body.password,
            remember: body.remember,
            previous,
        })
        .await?;

    let jar = set_session_cookie(jar, out.context.id, out.context.scope, &state.cookie);
    let body = LoginResponse {
        redirect: out.redirect,
        session: SessionResponse::from(&out.context),
    };
    Ok((StatusCode::CREATED, jar, Json(body)))
}

// ── GET /session ─────────────────────────────────────────────────────────────

pub async fn get_session(
    RequireSession(context): RequireSession,
) -> Result<Json<SessionResponse>, PortalError> {
    Ok(Json(SessionResponse::from(&context)))
}

// ── DELETE /session ──────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    SessionCookie(id): SessionCookie,
    jar: CookieJar,
) -> Result<impl IntoResponse, PortalError> {
    let usecase = LogoutUseCase {
        sessions: state.session_repo(),
    };
    usecase.execute(id).await?;
    let jar = clear_session_cookie(jar, &state.cookie);
    Ok((StatusCode::NO_CONTENT, jar))
}
