//! Taskboard backend client.
//!
//! HTTP client for the invitation routes of the Taskboard backend: member
//! search, bulk and single invitations, and the invitation lifecycle
//! (accept, decline, resend, cancel).

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use taskboard_invite::{
    BulkInviteRequest, FieldErrors, Invitation, InvitationId, MemberInviteRequest, ProjectId,
    UserSummary,
};
use tracing::{debug, error, instrument, warn};

use crate::config::{ClientConfig, Routes};
use crate::context::RequestContext;
use crate::error::{ClientError, ClientResult};

/// Acknowledgement returned by state-changing invitation routes.
///
/// The backend may answer with an empty body; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteReceipt {
    /// Flash message to show the user.
    #[serde(default)]
    pub message: Option<String>,

    /// Number of invitations created.
    #[serde(default)]
    pub invitations_sent: Option<u32>,

    /// Page the browser would be sent to next.
    #[serde(default)]
    pub redirect: Option<String>,
}

/// Error body shape used by the backend for non-success responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

/// Taskboard backend client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct TaskboardClient {
    /// HTTP client instance.
    client: Client,

    /// Backend origin and session credentials.
    context: RequestContext,

    /// Route templates.
    routes: Routes,
}

impl TaskboardClient {
    /// Create a client with the default routes.
    pub fn new(context: RequestContext, timeout: Duration) -> ClientResult<Self> {
        Self::build(context, Routes::default(), timeout, true)
    }

    /// Create a client from a full configuration.
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;
        Self::build(
            config.context.clone(),
            config.routes.clone(),
            config.timeout(),
            config.verify_tls,
        )
    }

    fn build(
        context: RequestContext,
        routes: Routes,
        timeout: Duration,
        verify_tls: bool,
    ) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(context.headers())
            .danger_accept_invalid_certs(!verify_tls)
            .build()?;

        Ok(Self {
            client,
            context,
            routes,
        })
    }

    /// The request context this client sends with every call.
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Search users that can be invited to a project.
    ///
    /// Sends the raw query; callers decide when a query is long enough.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn search_users(
        &self,
        project_id: ProjectId,
        query: &str,
    ) -> ClientResult<Vec<UserSummary>> {
        debug!("Searching users with query: {}", query);

        let project = project_id.to_string();
        let url = self.url(&self.routes.member_search, &[("project", &project)]);
        let response = self
            .client
            .get(&url)
            .query(&[("search", query)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Invite every email to every project in one request.
    #[instrument(skip(self, request), fields(
        emails = request.emails.len(),
        projects = request.project_ids.len(),
        role = %request.role,
    ))]
    pub async fn send_bulk_invitations(
        &self,
        request: &BulkInviteRequest,
    ) -> ClientResult<InviteReceipt> {
        debug!(
            "Sending {} invitations",
            request.emails.len() * request.project_ids.len()
        );

        let url = self.url(&self.routes.bulk_invite, &[]);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_receipt(response).await
    }

    /// Invite one user or email address to a project.
    #[instrument(skip(self, request), fields(project_id = %project_id, role = %request.role))]
    pub async fn send_member_invitation(
        &self,
        project_id: ProjectId,
        request: &MemberInviteRequest,
    ) -> ClientResult<InviteReceipt> {
        debug!("Inviting member to project {}", project_id);

        let project = project_id.to_string();
        let url = self.url(&self.routes.member_invite, &[("project", &project)]);
        let response = self.client.post(&url).json(request).send().await?;
        self.handle_receipt(response).await
    }

    /// List the invitations of a project.
    #[instrument(skip(self), fields(project_id = %project_id))]
    pub async fn list_project_invitations(
        &self,
        project_id: ProjectId,
    ) -> ClientResult<Vec<Invitation>> {
        debug!("Fetching invitations for project {}", project_id);

        let project = project_id.to_string();
        let url = self.url(&self.routes.project_invitations, &[("project", &project)]);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Accept an invitation by its emailed token.
    #[instrument(skip(self, token))]
    pub async fn accept_invitation(&self, token: &str) -> ClientResult<InviteReceipt> {
        let url = self.url(&self.routes.accept_invitation, &[("token", token)]);
        self.post_empty(&url).await
    }

    /// Decline an invitation by its emailed token.
    #[instrument(skip(self, token))]
    pub async fn decline_invitation(&self, token: &str) -> ClientResult<InviteReceipt> {
        let url = self.url(&self.routes.decline_invitation, &[("token", token)]);
        self.post_empty(&url).await
    }

    /// Send the invitation email again.
    #[instrument(skip(self))]
    pub async fn resend_invitation(&self, id: InvitationId) -> ClientResult<InviteReceipt> {
        let invitation = id.to_string();
        let url = self.url(&self.routes.resend_invitation, &[("invitation", &invitation)]);
        self.post_empty(&url).await
    }

    /// Withdraw a pending invitation.
    #[instrument(skip(self))]
    pub async fn cancel_invitation(&self, id: InvitationId) -> ClientResult<InviteReceipt> {
        let invitation = id.to_string();
        let url = self.url(&self.routes.cancel_invitation, &[("invitation", &invitation)]);
        self.post_empty(&url).await
    }

    fn url(&self, template: &str, params: &[(&str, &str)]) -> String {
        self.context.url(&Routes::render(template, params))
    }

    async fn post_empty(&self, url: &str) -> ClientResult<InviteReceipt> {
        let response = self.client.post(url).send().await?;
        self.handle_receipt(response).await
    }

    /// Handle API response and parse JSON.
    async fn handle_response<T>(&self, response: Response) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Like `handle_response`, but an empty success body is a default receipt.
    async fn handle_receipt(&self, response: Response) -> ClientResult<InviteReceipt> {
        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(InviteReceipt::default());
        }
        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    async fn error_from(&self, response: Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();

        match status.as_u16() {
            401 | 419 => {
                error!("Taskboard session rejected ({})", status.as_u16());
                ClientError::SessionExpired
            }
            403 => {
                warn!("Taskboard refused the action");
                ClientError::Forbidden(
                    parsed
                        .message
                        .unwrap_or_else(|| "This action is unauthorized.".to_string()),
                )
            }
            code if code == StatusCode::UNPROCESSABLE_ENTITY.as_u16()
                || parsed.errors.as_ref().is_some_and(|e| !e.is_empty()) =>
            {
                debug!("Taskboard rejected fields ({})", code);
                ClientError::Validation {
                    message: parsed
                        .message
                        .unwrap_or_else(|| "The given data was invalid.".to_string()),
                    errors: parsed.errors.unwrap_or_default(),
                }
            }
            code => {
                let message = match parsed.message {
                    Some(message) => message,
                    None if body.trim().is_empty() => "Unknown error".to_string(),
                    None => body,
                };
                warn!("Taskboard API error ({}): {}", code, message);
                ClientError::Api {
                    status: code,
                    message,
                }
            }
        }
    }
}

impl std::fmt::Debug for TaskboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskboardClient")
            .field("base_url", &self.context.base_url)
            .field("has_session", &self.context.has_session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_urls() {
        let client = TaskboardClient::new(
            RequestContext::new("https://app.example.com/"),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.url("/projects/{project}/members/search", &[("project", "7")]),
            "https://app.example.com/projects/7/members/search"
        );
    }

    #[test]
    fn test_from_config_validates() {
        let mut config = ClientConfig::default();
        config.context.base_url = "not a url".to_string();
        assert!(matches!(
            TaskboardClient::from_config(&config),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = TaskboardClient::new(
            RequestContext::new("http://localhost").with_csrf_token("secret"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_receipt_defaults() {
        let receipt: InviteReceipt = serde_json::from_str("{}").unwrap();
        assert_eq!(receipt, InviteReceipt::default());
    }
}
