//! Browser-session helpers for router tests.
//!
//! Builds the `cookie` request header a browser would send after login, and reads the
//! session id back out of a `set-cookie` response header.

use http::{HeaderMap, HeaderName, HeaderValue};

use sesmine_domain::id::SessionId;
use sesmine_session_types::cookie::SESMINE_SESSION;

/// A browser holding a session cookie.
pub struct MockBrowser {
    pub session_id: SessionId,
}

impl MockBrowser {
    pub fn new(session_id: SessionId) -> Self {
        Self { session_id }
    }

    /// Return the `cookie` header as the browser would send it.
    pub fn cookie_header(&self) -> (HeaderName, HeaderValue) {
        (
            HeaderName::from_static("cookie"),
            HeaderValue::from_str(&format!("{SESMINE_SESSION}={}", self.session_id)).unwrap(),
        )
    }

    /// Extract the session id from the `set-cookie` headers of a login response.
    pub fn from_set_cookie(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.trim().strip_prefix(&format!("{SESMINE_SESSION}=")))
            .find_map(|value| value.parse::<SessionId>().ok())
            .map(Self::new)
    }
}
