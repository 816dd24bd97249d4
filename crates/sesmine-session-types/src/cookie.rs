//! Cookie builders for the session id.
//!
//! A remembered login gets a cookie with a Max-Age; otherwise the cookie lives for
//! the browser session only, mirroring the durable vs short-lived storage scopes.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use sesmine_domain::id::SessionId;
use sesmine_domain::session::SessionScope;

/// Cookie name carrying the session id.
pub const SESMINE_SESSION: &str = "sesmine_session";

/// Max-Age of a remembered session cookie in seconds (30 days).
pub const PERSISTENT_SESSION_MAX_AGE: i64 = 2_592_000;

/// Attributes shared by every session cookie the service writes.
#[derive(Debug, Clone, Default)]
pub struct CookieSettings {
    pub domain: Option<String>,
    pub secure: bool,
}

fn base(value: String, settings: &CookieSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build((SESMINE_SESSION, value))
        .path("/")
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .build();
    if let Some(domain) = &settings.domain {
        cookie.set_domain(domain.clone());
    }
    cookie
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use sesmine_domain::{id::SessionId, session::SessionScope};
/// use sesmine_session_types::cookie::{set_session_cookie, CookieSettings, SESMINE_SESSION};
///
/// let settings = CookieSettings { domain: Some("sesmine.com".to_owned()), secure: true };
/// let jar = set_session_cookie(
///     CookieJar::new(),
///     SessionId::new(),
///     SessionScope::Persistent,
///     &settings,
/// );
/// let cookie = jar.get(SESMINE_SESSION).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("sesmine.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(2_592_000)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    id: SessionId,
    scope: SessionScope,
    settings: &CookieSettings,
) -> CookieJar {
    let mut cookie = base(id.to_string(), settings);
    if scope == SessionScope::Persistent {
        cookie.set_max_age(Duration::seconds(PERSISTENT_SESSION_MAX_AGE));
    }
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use sesmine_session_types::cookie::{clear_session_cookie, CookieSettings, SESMINE_SESSION};
///
/// let jar = clear_session_cookie(CookieJar::new(), &CookieSettings::default());
/// let cookie = jar.get(SESMINE_SESSION).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_session_cookie(jar: CookieJar, settings: &CookieSettings) -> CookieJar {
    let mut cookie = base(String::new(), settings);
    cookie.set_max_age(Duration::ZERO);
    jar.add(cookie)
}
