//! Invitation records
//!
//! An [`Invitation`] is what the backend stores once a draft has been sent:
//! one per recipient and project. Records are read back for the pending
//! invitations list and the accept/decline page.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::roles::InviteRole;
use crate::roster::UserId;
use crate::targets::ProjectId;

/// Days an invitation stays valid after it is sent.
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

/// Integer invitation identifier as used by the backend.
pub type InvitationId = i64;

/// Stored lifecycle state of an invitation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    /// Sent and awaiting an answer
    Pending,

    /// Accepted by the invitee
    Accepted,

    /// Declined by the invitee
    Declined,

    /// Withdrawn by the inviter
    Cancelled,

    /// Marked expired by the backend
    Expired,
}

impl InvitationStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Cancelled => "cancelled",
            Self::Expired => "expired",
        }
    }

    /// Check if the invitation has been answered or withdrawn.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined | Self::Cancelled)
    }
}

/// An invitation for one email address to join one project.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use taskboard_invite::{Invitation, InvitationStatus, InviteRole};
///
/// let invitation = Invitation::new(1, "tok", "ada@example.com", 10, InviteRole::Editor);
/// assert!(invitation.can_accept(Utc::now()));
///
/// let later = Utc::now() + Duration::days(30);
/// assert_eq!(invitation.effective_status(later), InvitationStatus::Expired);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    /// Invitation ID
    pub id: InvitationId,

    /// Opaque token carried by the emailed link
    pub token: String,

    /// Invited email address
    pub email: String,

    /// Project the invitee is asked to join
    pub project_id: ProjectId,

    /// Project name for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,

    /// Role granted on acceptance
    pub role: InviteRole,

    /// Stored status
    pub status: InvitationStatus,

    /// Who sent the invitation
    #[serde(default)]
    pub invited_by: Option<UserId>,

    /// Personal note from the inviter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// When the invitation stops being valid
    pub expires_at: DateTime<Utc>,

    /// When the invitation was sent
    pub created_at: DateTime<Utc>,
}

impl Invitation {
    /// Creates a pending invitation valid for [`DEFAULT_EXPIRY_DAYS`].
    pub fn new(
        id: InvitationId,
        token: impl Into<String>,
        email: impl Into<String>,
        project_id: ProjectId,
        role: InviteRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            token: token.into(),
            email: email.into(),
            project_id,
            project_name: None,
            role,
            status: InvitationStatus::Pending,
            invited_by: None,
            message: None,
            expires_at: now + Duration::days(DEFAULT_EXPIRY_DAYS),
            created_at: now,
        }
    }

    /// Set who sent the invitation.
    pub fn with_inviter(mut self, inviter_id: UserId) -> Self {
        self.invited_by = Some(inviter_id);
        self
    }

    /// Attach the inviter's personal note.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check if the invitation is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status == InvitationStatus::Expired || now >= self.expires_at
    }

    /// Status as the invitee experiences it at `now`.
    ///
    /// A pending invitation past its expiry reads as expired even if the
    /// backend has not swept it yet.
    pub fn effective_status(&self, now: DateTime<Utc>) -> InvitationStatus {
        match self.status {
            InvitationStatus::Pending if self.is_expired_at(now) => InvitationStatus::Expired,
            status => status,
        }
    }

    /// Check if the invitee can still accept or decline.
    pub fn can_accept(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == InvitationStatus::Pending
    }

    /// Check if the inviter can send the email again.
    ///
    /// Expired invitations may be resent; the backend renews the expiry.
    pub fn can_resend(&self) -> bool {
        matches!(
            self.status,
            InvitationStatus::Pending | InvitationStatus::Expired
        )
    }

    /// Check if the inviter can withdraw the invitation.
    pub fn can_cancel(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == InvitationStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invitation() -> Invitation {
        Invitation::new(1, "abc123", "ada@x.com", 5, InviteRole::Viewer)
    }

    #[test]
    fn test_new_invitation_is_pending() {
        let inv = invitation().with_inviter(9).with_message("welcome");
        assert_eq!(inv.status, InvitationStatus::Pending);
        assert_eq!(inv.invited_by, Some(9));
        assert_eq!(inv.message.as_deref(), Some("welcome"));
        assert_eq!(inv.expires_at - inv.created_at, Duration::days(DEFAULT_EXPIRY_DAYS));
    }

    #[test]
    fn test_expiry_detection() {
        let inv = invitation();
        let before = inv.expires_at - Duration::seconds(1);
        assert!(!inv.is_expired_at(before));
        assert!(inv.is_expired_at(inv.expires_at));
        assert_eq!(inv.effective_status(before), InvitationStatus::Pending);
        assert_eq!(
            inv.effective_status(inv.expires_at),
            InvitationStatus::Expired
        );
    }

    #[test]
    fn test_final_status_is_not_overridden_by_expiry() {
        let mut inv = invitation();
        inv.status = InvitationStatus::Accepted;
        let later = inv.expires_at + Duration::days(1);
        assert_eq!(inv.effective_status(later), InvitationStatus::Accepted);
        assert!(inv.status.is_final());
    }

    #[test]
    fn test_lifecycle_permissions() {
        let now = Utc::now();
        let mut inv = invitation();
        assert!(inv.can_accept(now));
        assert!(inv.can_cancel(now));
        assert!(inv.can_resend());

        inv.status = InvitationStatus::Expired;
        assert!(!inv.can_accept(now));
        assert!(!inv.can_cancel(now));
        assert!(inv.can_resend());

        inv.status = InvitationStatus::Declined;
        assert!(!inv.can_resend());
    }

    #[test]
    fn test_deserialize_backend_record() {
        let inv: Invitation = serde_json::from_value(serde_json::json!({
            "id": 12,
            "token": "tok-12",
            "email": "grace@x.com",
            "project_id": 3,
            "project_name": "Website",
            "role": "editor",
            "status": "pending",
            "expires_at": "2030-01-01T00:00:00Z",
            "created_at": "2029-12-25T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(inv.role, InviteRole::Editor);
        assert_eq!(inv.invited_by, None);
        assert_eq!(inv.project_name.as_deref(), Some("Website"));
    }
}
