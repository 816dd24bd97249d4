use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use sesmine_session_types::extract::SessionCookie;

use crate::domain::types::SessionContext;
use crate::error::PortalError;
use crate::state::AppState;
use crate::usecase::session::LoadSessionUseCase;

fn load(
    parts: &Parts,
    state: &AppState,
) -> impl std::future::Future<Output = Result<Option<SessionContext>, PortalError>> + Send + use<>
{
    let cookie = SessionCookie::from_parts(parts);
    let usecase = LoadSessionUseCase {
        users: state.user_repo(),
        sessions: state.session_repo(),
    };
    async move { usecase.execute(cookie.0).await }
}

/// Session of the browser making this request, re-validated against the user directory.
pub struct CurrentSession(pub Option<SessionContext>);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = PortalError;

    // Extract synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = load(parts, state);
        async move { Ok(Self(session.await?)) }
    }
}

/// Any authenticated session, otherwise `401`.
pub struct RequireSession(pub SessionContext);

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = PortalError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = load(parts, state);
        async move {
            session
                .await?
                .map(Self)
                .ok_or(PortalError::Unauthorized)
        }
    }
}

/// An admin session: `401` without a session, `403` for non-admins.
pub struct RequireAdmin(pub SessionContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = PortalError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session = load(parts, state);
        async move {
            let context = session.await?.ok_or(PortalError::Unauthorized)?;
            if !context.session.is_admin() {
                return Err(PortalError::Forbidden);
            }
            Ok(Self(context))
        }
    }
}
