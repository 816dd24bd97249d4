use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;

use sesmine_domain::page::{Page, PageAction};

use crate::error::PortalError;
use crate::handlers::context::CurrentSession;
use crate::handlers::session::SessionResponse;
use crate::state::AppState;
use crate::usecase::session::VisitPageUseCase;

/// Path of the page endpoint for `page`.
pub fn page_path(page: Page) -> String {
    format!("/pages/{}", page.as_str())
}

// ── GET /pages/{page} ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PageResponse {
    pub page: Page,
    pub session: Option<SessionResponse>,
}

/// Page load: `200` when the page may be shown, `303` to the page to show instead.
pub async fn visit_page(
    State(state): State<AppState>,
    CurrentSession(context): CurrentSession,
    Path(name): Path<String>,
) -> Result<Response, PortalError> {
    let page: Page = name.parse().map_err(|_| PortalError::PageNotFound)?;
    let usecase = VisitPageUseCase {
        activities: state.activity_repo(),
    };
    match usecase.execute(context.as_ref(), page).await? {
        PageAction::Allow => Ok(Json(PageResponse {
            page,
            session: context.as_ref().map(SessionResponse::from),
        })
        .into_response()),
        PageAction::RedirectTo(target) => Ok(Redirect::to(&page_path(target)).into_response()),
    }
}
