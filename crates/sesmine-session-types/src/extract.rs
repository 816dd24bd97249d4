//! Session-cookie extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::request::Parts;

use sesmine_domain::id::SessionId;

use crate::cookie::SESMINE_SESSION;

/// Session id presented by the browser, if any.
///
/// Never rejects: a missing or malformed cookie yields `SessionCookie(None)`, which the
/// service treats the same as "no session".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie(pub Option<SessionId>);

impl SessionCookie {
    pub fn from_parts(parts: &Parts) -> Self {
        let jar = CookieJar::from_headers(&parts.headers);
        let id = jar.get(SESMINE_SESSION).and_then(|c| {
            let parsed = c.value().parse::<SessionId>();
            if parsed.is_err() && !c.value().is_empty() {
                tracing::debug!(value = c.value(), "ignoring malformed session cookie");
            }
            parsed.ok()
        });
        Self(id)
    }
}

impl<S> FromRequestParts<S> for SessionCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // Extract synchronously and return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let cookie = Self::from_parts(parts);
        async move { Ok(cookie) }
    }
}
