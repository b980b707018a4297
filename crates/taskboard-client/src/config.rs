//! Client configuration.
//!
//! Provides the backend location, session credentials, timeouts, search
//! tuning and route templates. Configuration is loaded from environment
//! variables with sensible defaults for local development.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::context::RequestContext;
use crate::search::SearchSettings;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for talking to the Taskboard backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend location and session credentials.
    pub context: RequestContext,

    /// Default request timeout in seconds.
    pub default_timeout_secs: u64,

    /// Whether to verify TLS certificates (disable only for testing).
    pub verify_tls: bool,

    /// Member search debounce in milliseconds.
    pub search_debounce_ms: u64,

    /// Minimum query length before member search hits the backend.
    pub search_min_chars: usize,

    /// Backend route templates.
    #[serde(default)]
    pub routes: Routes,
}

impl Default for ClientConfig {
    /// Returns default configuration suitable for local development.
    fn default() -> Self {
        Self {
            context: RequestContext::new("http://localhost:8000"),
            default_timeout_secs: 30,
            verify_tls: true,
            search_debounce_ms: 300,
            search_min_chars: 2,
            routes: Routes::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TASKBOARD_BASE_URL`: Backend URL (default: http://localhost:8000)
    /// - `TASKBOARD_CSRF_TOKEN`: CSRF token issued with the session
    /// - `TASKBOARD_SESSION_COOKIE`: Session cookie header value
    /// - `TASKBOARD_TIMEOUT_SECS`: Request timeout in seconds (default: 30)
    /// - `TASKBOARD_VERIFY_TLS`: Whether to verify TLS (default: true)
    /// - `TASKBOARD_SEARCH_DEBOUNCE_MS`: Member search debounce (default: 300)
    /// - `TASKBOARD_SEARCH_MIN_CHARS`: Minimum search query length (default: 2)
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            context: RequestContext {
                base_url: std::env::var("TASKBOARD_BASE_URL")
                    .unwrap_or(default.context.base_url),
                csrf_token: std::env::var("TASKBOARD_CSRF_TOKEN").ok(),
                session_cookie: std::env::var("TASKBOARD_SESSION_COOKIE").ok(),
            },
            default_timeout_secs: std::env::var("TASKBOARD_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.default_timeout_secs),
            verify_tls: std::env::var("TASKBOARD_VERIFY_TLS")
                .map(|s| s != "false" && s != "0")
                .unwrap_or(default.verify_tls),
            search_debounce_ms: std::env::var("TASKBOARD_SEARCH_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.search_debounce_ms),
            search_min_chars: std::env::var("TASKBOARD_SEARCH_MIN_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.search_min_chars),
            routes: default.routes,
        }
    }

    /// Get the default request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }

    /// Member search tuning derived from this configuration.
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_chars: self.search_min_chars,
        }
    }

    /// Check that the configuration can be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.context.base_url.as_str();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "TASKBOARD_BASE_URL".to_string(),
                message: format!("expected an http(s) URL, got {:?}", base),
            });
        }
        if self.default_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "TASKBOARD_TIMEOUT_SECS".to_string(),
                message: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Backend route templates.
///
/// Paths are owned by the backend; placeholders `{project}`, `{invitation}`
/// and `{token}` are substituted per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routes {
    /// GET, project-scoped member search.
    pub member_search: String,

    /// POST, bulk invitation across projects.
    pub bulk_invite: String,

    /// POST, single member invitation into one project.
    pub member_invite: String,

    /// GET, invitations of one project.
    pub project_invitations: String,

    /// POST, accept by token.
    pub accept_invitation: String,

    /// POST, decline by token.
    pub decline_invitation: String,

    /// POST, resend by id.
    pub resend_invitation: String,

    /// POST, cancel by id.
    pub cancel_invitation: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self {
            member_search: "/projects/{project}/members/search".to_string(),
            bulk_invite: "/invitations/bulk".to_string(),
            member_invite: "/projects/{project}/members/invite".to_string(),
            project_invitations: "/projects/{project}/invitations".to_string(),
            accept_invitation: "/invitations/{token}/accept".to_string(),
            decline_invitation: "/invitations/{token}/decline".to_string(),
            resend_invitation: "/invitations/{invitation}/resend".to_string(),
            cancel_invitation: "/invitations/{invitation}/cancel".to_string(),
        }
    }
}

impl Routes {
    /// Substitute `{name}` placeholders in `template`.
    pub fn render(template: &str, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(template.to_string(), |path, (name, value)| {
                path.replace(&format!("{{{}}}", name), value)
            })
    }
}
