use chrono::Utc;

use sesmine_domain::id::SessionId;
use sesmine_domain::page::{Page, PageAction, allowed, enforce_page_access};
use sesmine_domain::session::{Session, SessionScope};
use sesmine_domain::user::IdentifierMatching;

use crate::domain::repository::{ActivityRepository, SessionRepository, UserRepository};
use crate::domain::types::SessionContext;
use crate::error::PortalError;
use crate::usecase::account::{authenticate, record_login};
use crate::usecase::activity::record_activity;

/// Lookup order when resolving a session id.
const SCOPES: [SessionScope; 2] = [SessionScope::Persistent, SessionScope::ShortLived];

async fn remove_everywhere<S: SessionRepository>(
    sessions: &S,
    id: SessionId,
) -> Result<(), PortalError> {
    for scope in SCOPES {
        sessions.remove(scope, id).await?;
    }
    Ok(())
}

/// Dashboard a freshly logged-in user lands on.
pub fn landing_page(session: &Session) -> Page {
    if session.is_admin() {
        Page::AdminPanel
    } else {
        Page::Home
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub identifier: String,
    pub password: String,
    pub remember: bool,
    /// Session the browser presented, replaced by the new one.
    pub previous: Option<SessionId>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub context: SessionContext,
    pub redirect: Page,
}

pub struct LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: U,
    pub sessions: S,
    pub matching: IdentifierMatching,
}

impl<U, S> LoginUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, PortalError> {
        let user =
            authenticate(&self.users, &input.identifier, &input.password, self.matching).await?;

        let now = Utc::now();
        let session = Session::for_user(&user, now);
        let id = SessionId::new();
        let scope = SessionScope::for_remember(input.remember);
        record_login(&self.users, &user.id, now).await?;
        if let Some(previous) = input.previous {
            remove_everywhere(&self.sessions, previous).await?;
        }
        // Written last so a failed login never leaves a record behind.
        self.sessions.put(scope, id, &session).await?;

        tracing::info!(user_id = %user.id, scope = ?scope, "login");
        let redirect = landing_page(&session);
        Ok(LoginOutput {
            context: SessionContext { id, scope, session },
            redirect,
        })
    }
}

// ── LoadSession ──────────────────────────────────────────────────────────────

pub struct LoadSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub users: U,
    pub sessions: S,
}

impl<U, S> LoadSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Durable scope first, then short-lived. A session whose user is gone or
    /// deactivated is removed from both scopes and reported as absent.
    pub async fn execute(
        &self,
        id: Option<SessionId>,
    ) -> Result<Option<SessionContext>, PortalError> {
        let Some(id) = id else {
            return Ok(None);
        };

        let mut found = None;
        for scope in SCOPES {
            if let Some(session) = self.sessions.get(scope, id).await? {
                found = Some((scope, session));
                break;
            }
        }
        let Some((scope, session)) = found else {
            return Ok(None);
        };

        let active = self
            .users
            .list()
            .await?
            .iter()
            .any(|u| u.username == session.username && u.is_active);
        if !active {
            tracing::warn!(
                username = %session.username,
                "dropping session of missing or inactive user"
            );
            remove_everywhere(&self.sessions, id).await?;
            return Ok(None);
        }

        Ok(Some(SessionContext { id, scope, session }))
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionRepository> {
    pub sessions: S,
}

impl<S: SessionRepository> LogoutUseCase<S> {
    pub async fn execute(&self, id: Option<SessionId>) -> Result<(), PortalError> {
        if let Some(id) = id {
            remove_everywhere(&self.sessions, id).await?;
            tracing::info!(session_id = %id, "logout");
        }
        Ok(())
    }
}

// ── VisitPage ────────────────────────────────────────────────────────────────

pub struct VisitPageUseCase<A: ActivityRepository> {
    pub activities: A,
}

impl<A: ActivityRepository> VisitPageUseCase<A> {
    /// Page load: log the visit, apply the session redirects, then the admin-only
    /// and plan rules.
    pub async fn execute(
        &self,
        context: Option<&SessionContext>,
        page: Page,
    ) -> Result<PageAction, PortalError> {
        let session = context.map(|c| &c.session);
        if let Some(session) = session {
            record_activity(&self.activities, session, page).await?;
        }

        let action = enforce_page_access(session, page);
        if action != PageAction::Allow {
            return Ok(action);
        }
        let Some(session) = session else {
            return Ok(PageAction::Allow);
        };
        if page == Page::AdminPanel && !session.is_admin() {
            return Ok(PageAction::RedirectTo(Page::Home));
        }
        if !allowed(session.plan, page) {
            return Ok(PageAction::RedirectTo(Page::Home));
        }
        Ok(PageAction::Allow)
    }
}
