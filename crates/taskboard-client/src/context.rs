//! Request context.
//!
//! Everything a request needs from the host page (backend origin, CSRF
//! token, session cookie) is carried explicitly by [`RequestContext`] so the
//! client can run outside a browser and be tested against a mock server.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use serde::{Deserialize, Serialize};

/// Header the backend reads the CSRF token from.
pub const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Backend origin and session credentials for one user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Base URL of the backend (e.g., "https://app.taskboard.dev").
    pub base_url: String,

    /// CSRF token issued with the session.
    pub csrf_token: Option<String>,

    /// Value of the `Cookie` header carrying the session.
    pub session_cookie: Option<String>,
}

impl RequestContext {
    /// Creates a context without credentials.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token: None,
            session_cookie: None,
        }
    }

    /// Set the CSRF token.
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Set the session cookie header value.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Check if session credentials are available.
    pub fn has_session(&self) -> bool {
        self.csrf_token.is_some() && self.session_cookie.is_some()
    }

    /// Headers sent with every request.
    ///
    /// Credentials that contain characters not allowed in a header value are
    /// left out.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            "X-Requested-With",
            HeaderValue::from_static("XMLHttpRequest"),
        );

        if let Some(value) = self
            .csrf_token
            .as_deref()
            .and_then(|token| HeaderValue::from_str(token).ok())
        {
            headers.insert(CSRF_HEADER, value);
        }
        if let Some(value) = self
            .session_cookie
            .as_deref()
            .and_then(|cookie| HeaderValue::from_str(cookie).ok())
        {
            headers.insert(COOKIE, value);
        }

        headers
    }
}
