//! Invitation drafts
//!
//! A draft is everything the invite dialog holds before it is sent. Two
//! shapes exist: the bulk draft (many emails into many projects) and the
//! member draft (one person into one project). Both turn into exactly one
//! request body.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recipients::{is_valid_email, RecipientSet};
use crate::roles::InviteRole;
use crate::roster::{UserId, UserSummary};
use crate::targets::{ProjectCandidate, ProjectId, TargetSelection};

/// Reason a draft cannot be submitted right now.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitBlocked {
    /// No email address has been added
    #[error("Add at least one email address")]
    NoRecipients,

    /// No project has been selected
    #[error("Select at least one project")]
    NoTargets,

    /// Neither a user nor an email was provided
    #[error("Select a user or enter an email address")]
    MissingInvitee,

    /// Both a user and an email were provided
    #[error("Invite either a selected user or an email address, not both")]
    AmbiguousInvitee,

    /// The typed email is malformed
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// A request for this draft is already in flight
    #[error("Invitation is already being sent")]
    AlreadySubmitting,

    /// The dialog has been closed
    #[error("Invitation dialog is closed")]
    Closed,
}

/// A draft that can be serialized into one request.
pub trait InviteDraft {
    /// Request body produced by the draft.
    type Request: Serialize;

    /// Build the request body, or explain why the draft is not ready.
    fn to_request(&self) -> Result<Self::Request, SubmitBlocked>;

    /// Return to the initial empty state.
    fn reset(&mut self);
}

/// Body of the bulk invitation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkInviteRequest {
    /// Target projects
    pub project_ids: Vec<ProjectId>,

    /// Recipient addresses in insertion order
    pub emails: Vec<String>,

    /// Role granted in every target project
    pub role: InviteRole,

    /// Personal note, empty when none was written
    pub message: String,
}

/// Body of the single-project member invitation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInviteRequest {
    /// Existing user to invite, when picked from search
    pub user_id: Option<UserId>,

    /// Typed address, empty when a user was picked
    pub email: String,

    /// Role granted on acceptance
    pub role: InviteRole,
}

/// Bulk invitation: every recipient is invited to every selected project.
///
/// # Examples
///
/// ```
/// use taskboard_invite::{InvitationDraft, InviteDraft, InviteRole, ProjectCandidate};
///
/// let mut draft = InvitationDraft::new(vec![
///     ProjectCandidate::new(1, "Website"),
///     ProjectCandidate::new(2, "Mobile"),
/// ]);
/// draft.recipients.add_bulk("a@x.com, b@x.com");
/// draft.targets.select_all([1, 2]);
/// draft.role = InviteRole::Editor;
///
/// assert_eq!(draft.total_invitations(), 4);
/// let request = draft.to_request().unwrap();
/// assert_eq!(request.project_ids, vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvitationDraft {
    /// Who is invited
    pub recipients: RecipientSet,

    /// Which projects they are invited to
    pub targets: TargetSelection,

    /// Role granted in every project
    pub role: InviteRole,

    /// Optional personal note
    pub message: String,
}

impl InvitationDraft {
    /// Creates an empty draft over the projects the inviter may target.
    pub fn new(candidates: Vec<ProjectCandidate>) -> Self {
        Self {
            recipients: RecipientSet::new(),
            targets: TargetSelection::new(candidates),
            role: InviteRole::default(),
            message: String::new(),
        }
    }

    /// Number of invitations the backend will create.
    ///
    /// Always `recipients × targets`; shown as a confirmation count and not
    /// checked against any backend limit.
    pub fn total_invitations(&self) -> usize {
        self.recipients.len() * self.targets.len()
    }

    /// Check if the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.to_request().is_ok()
    }
}

impl InviteDraft for InvitationDraft {
    type Request = BulkInviteRequest;

    fn to_request(&self) -> Result<BulkInviteRequest, SubmitBlocked> {
        if self.recipients.is_empty() {
            return Err(SubmitBlocked::NoRecipients);
        }
        if self.targets.is_empty() {
            return Err(SubmitBlocked::NoTargets);
        }
        Ok(BulkInviteRequest {
            project_ids: self.targets.ids(),
            emails: self.recipients.as_slice().to_vec(),
            role: self.role,
            message: self.message.clone(),
        })
    }

    fn reset(&mut self) {
        self.recipients.clear();
        self.targets.clear();
        self.role = InviteRole::default();
        self.message.clear();
    }
}

/// Single-project invitation of one person, either an existing user found
/// through search or a bare email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInviteDraft {
    project_id: ProjectId,
    selected_user: Option<UserSummary>,
    email: String,
    /// Role granted on acceptance
    pub role: InviteRole,
}

impl MemberInviteDraft {
    /// Creates an empty draft for `project_id`.
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            selected_user: None,
            email: String::new(),
            role: InviteRole::default(),
        }
    }

    /// Project the member is invited to.
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Pick an existing user from the search results. Clears the typed email.
    pub fn select_user(&mut self, user: UserSummary) {
        self.email.clear();
        self.selected_user = Some(user);
    }

    /// Drop the picked user.
    pub fn clear_user(&mut self) {
        self.selected_user = None;
    }

    /// The picked user, if any.
    pub fn selected_user(&self) -> Option<&UserSummary> {
        self.selected_user.as_ref()
    }

    /// Replace the typed email address. A non-blank email drops the picked
    /// user.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
        if !self.email.trim().is_empty() {
            self.selected_user = None;
        }
    }

    /// The typed email address as entered.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl InviteDraft for MemberInviteDraft {
    type Request = MemberInviteRequest;

    fn to_request(&self) -> Result<MemberInviteRequest, SubmitBlocked> {
        let email = self.email.trim();
        match (&self.selected_user, email.is_empty()) {
            (None, true) => Err(SubmitBlocked::MissingInvitee),
            (Some(_), false) => Err(SubmitBlocked::AmbiguousInvitee),
            (Some(user), true) => Ok(MemberInviteRequest {
                user_id: Some(user.id),
                email: String::new(),
                role: self.role,
            }),
            (None, false) if !is_valid_email(email) => {
                Err(SubmitBlocked::InvalidEmail(email.to_string()))
            }
            (None, false) => Ok(MemberInviteRequest {
                user_id: None,
                email: email.to_string(),
                role: self.role,
            }),
        }
    }

    fn reset(&mut self) {
        self.selected_user = None;
        self.email.clear();
        self.role = InviteRole::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk_draft() -> InvitationDraft {
        InvitationDraft::new(vec![
            ProjectCandidate::new(1, "One"),
            ProjectCandidate::new(2, "Two"),
            ProjectCandidate::new(3, "Three"),
        ])
    }

    #[test]
    fn test_total_invitations_tracks_every_mutation() {
        let mut draft = bulk_draft();
        assert_eq!(draft.total_invitations(), 0);

        draft.recipients.add_single("a@x.com").unwrap();
        assert_eq!(draft.total_invitations(), 0);

        draft.targets.toggle(1);
        assert_eq!(draft.total_invitations(), 1);

        draft.recipients.add_single("b@x.com").unwrap();
        draft.targets.toggle_all_visible("");
        assert_eq!(draft.total_invitations(), 6);

        draft.recipients.remove("a@x.com");
        assert_eq!(draft.total_invitations(), 3);
    }

    #[test]
    fn test_bulk_request_scenario() {
        let mut draft = bulk_draft();
        draft.recipients.add_bulk("a@x.com b@x.com");
        draft.targets.select_all([3, 1, 2]);
        draft.role = InviteRole::Viewer;

        assert_eq!(draft.total_invitations(), 6);

        let body = serde_json::to_value(draft.to_request().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "project_ids": [1, 2, 3],
                "emails": ["a@x.com", "b@x.com"],
                "role": "viewer",
                "message": ""
            })
        );
    }

    #[test]
    fn test_bulk_preconditions() {
        let mut draft = bulk_draft();
        assert_eq!(draft.to_request(), Err(SubmitBlocked::NoRecipients));

        draft.recipients.add_single("a@x.com").unwrap();
        assert_eq!(draft.to_request(), Err(SubmitBlocked::NoTargets));
        assert!(!draft.can_submit());

        draft.targets.toggle(2);
        assert!(draft.can_submit());
    }

    #[test]
    fn test_bulk_reset_keeps_candidates() {
        let mut draft = bulk_draft();
        draft.recipients.add_single("a@x.com").unwrap();
        draft.targets.toggle(1);
        draft.role = InviteRole::Admin;
        draft.message = "hi".to_string();

        draft.reset();
        assert!(draft.recipients.is_empty());
        assert!(draft.targets.is_empty());
        assert_eq!(draft.targets.candidates().len(), 3);
        assert_eq!(draft.role, InviteRole::Viewer);
        assert!(draft.message.is_empty());
    }

    #[test]
    fn test_member_draft_requires_exactly_one_invitee() {
        let mut draft = MemberInviteDraft::new(4);
        assert_eq!(draft.to_request(), Err(SubmitBlocked::MissingInvitee));

        draft.select_user(UserSummary::new(8, "Ada", "ada@x.com"));
        draft.set_email("   ");
        assert!(draft.selected_user().is_some());
        let request = draft.to_request().unwrap();
        assert_eq!(request.user_id, Some(8));
        assert_eq!(request.email, "");

        let both = MemberInviteDraft {
            email: "other@x.com".to_string(),
            ..draft
        };
        assert_eq!(both.to_request(), Err(SubmitBlocked::AmbiguousInvitee));
    }

    #[test]
    fn test_selecting_user_clears_typed_email() {
        let mut draft = MemberInviteDraft::new(4);
        draft.set_email("typed@x.com");
        draft.select_user(UserSummary::new(8, "Ada", "ada@x.com"));

        assert_eq!(draft.email(), "");
        let request = draft.to_request().unwrap();
        assert_eq!(request.user_id, Some(8));
        assert_eq!(request.email, "");
    }

    #[test]
    fn test_typing_email_clears_selected_user() {
        let mut draft = MemberInviteDraft::new(4);
        draft.select_user(UserSummary::new(8, "Ada", "ada@x.com"));
        draft.set_email("typed@x.com");

        assert_eq!(draft.selected_user(), None);
        let request = draft.to_request().unwrap();
        assert_eq!(request.user_id, None);
        assert_eq!(request.email, "typed@x.com");
    }

    #[test]
    fn test_member_draft_with_email() {
        let mut draft = MemberInviteDraft::new(4);
        draft.role = InviteRole::Editor;
        draft.set_email("not-an-email");
        assert_eq!(
            draft.to_request(),
            Err(SubmitBlocked::InvalidEmail("not-an-email".to_string()))
        );

        draft.set_email(" new@x.com ");
        let body = serde_json::to_value(draft.to_request().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "user_id": null, "email": "new@x.com", "role": "editor" })
        );
    }
}
