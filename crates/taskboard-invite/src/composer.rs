//! Submission state of an invite dialog
//!
//! A [`Composer`] wraps a draft with the dialog lifecycle:
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──complete_success──▶ Closed
//!   ▲                        │
//!   │                        └──complete_failure──▶ Errored ──begin_submit──▶ Submitting
//!   └──────────── reopen ─────────────────────────────────────┘
//! ```
//!
//! While submitting, further submits are refused. Outcomes that arrive when
//! no submission is outstanding (for example after the dialog was closed)
//! are ignored.

use crate::draft::{InvitationDraft, InviteDraft, MemberInviteDraft, SubmitBlocked};
use crate::field_errors::FieldErrors;

/// Lifecycle state of an invite dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    /// Editing, nothing sent
    Idle,

    /// One request is in flight
    Submitting,

    /// Sent successfully or dismissed; the draft has been discarded
    Closed,

    /// The last request failed; the draft is intact for correction
    Errored,
}

/// Composer for the bulk invite dialog.
pub type BulkInviteComposer = Composer<InvitationDraft>;

/// Composer for the single-project member invite dialog.
pub type MemberInviteComposer = Composer<MemberInviteDraft>;

/// A draft plus its submission state and the errors of the last attempt.
///
/// # Examples
///
/// ```
/// use taskboard_invite::{BulkInviteComposer, FieldErrors, InvitationDraft, ProjectCandidate, SubmissionState};
///
/// let mut composer = BulkInviteComposer::new(InvitationDraft::new(vec![
///     ProjectCandidate::new(1, "Website"),
/// ]));
/// composer.draft_mut().recipients.add_single("a@x.com").unwrap();
/// composer.draft_mut().targets.toggle(1);
///
/// let _request = composer.begin_submit().unwrap();
/// assert!(composer.begin_submit().is_err());
///
/// let mut errors = FieldErrors::new();
/// errors.insert("emails", "already invited");
/// composer.complete_failure(errors);
/// assert_eq!(composer.state(), SubmissionState::Errored);
/// assert_eq!(composer.field_error("emails"), Some("already invited"));
/// ```
#[derive(Debug, Clone)]
pub struct Composer<D> {
    draft: D,
    state: SubmissionState,
    errors: FieldErrors,
}

impl<D: InviteDraft> Composer<D> {
    /// Opens a dialog around `draft`.
    pub fn new(draft: D) -> Self {
        Self {
            draft,
            state: SubmissionState::Idle,
            errors: FieldErrors::new(),
        }
    }

    /// The current draft.
    pub fn draft(&self) -> &D {
        &self.draft
    }

    /// Mutable access for input events.
    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Check if a request is in flight.
    pub fn is_submitting(&self) -> bool {
        self.state == SubmissionState::Submitting
    }

    /// Check if the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, SubmissionState::Idle | SubmissionState::Errored)
            && self.draft.to_request().is_ok()
    }

    /// Errors from the last failed submission.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Message to render under `field`, if the last submission flagged it.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Start a submission.
    ///
    /// On success the composer is `Submitting` and the returned body must be
    /// sent exactly once; the outcome is reported through
    /// [`complete_success`](Self::complete_success) or
    /// [`complete_failure`](Self::complete_failure).
    pub fn begin_submit(&mut self) -> Result<D::Request, SubmitBlocked> {
        match self.state {
            SubmissionState::Submitting => return Err(SubmitBlocked::AlreadySubmitting),
            SubmissionState::Closed => return Err(SubmitBlocked::Closed),
            SubmissionState::Idle | SubmissionState::Errored => {}
        }

        let request = self.draft.to_request()?;
        self.errors = FieldErrors::new();
        self.state = SubmissionState::Submitting;
        Ok(request)
    }

    /// Apply a successful response: discard the draft and close.
    ///
    /// # Returns
    ///
    /// `false` if no submission was outstanding and nothing changed
    pub fn complete_success(&mut self) -> bool {
        if !self.is_submitting() {
            return false;
        }
        self.draft.reset();
        self.errors = FieldErrors::new();
        self.state = SubmissionState::Closed;
        true
    }

    /// Apply a failed response: keep the draft and show `errors`.
    ///
    /// # Returns
    ///
    /// `false` if no submission was outstanding and nothing changed
    pub fn complete_failure(&mut self, errors: FieldErrors) -> bool {
        if !self.is_submitting() {
            return false;
        }
        self.errors = errors;
        self.state = SubmissionState::Errored;
        true
    }

    /// Dismiss the dialog, discarding the draft.
    pub fn close(&mut self) {
        self.draft.reset();
        self.errors = FieldErrors::new();
        self.state = SubmissionState::Closed;
    }

    /// Open the dialog again with an empty draft.
    pub fn reopen(&mut self) {
        self.draft.reset();
        self.errors = FieldErrors::new();
        self.state = SubmissionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::InviteRole;
    use crate::roster::UserSummary;
    use crate::targets::ProjectCandidate;

    fn ready_bulk() -> BulkInviteComposer {
        let mut composer = BulkInviteComposer::new(InvitationDraft::new(vec![
            ProjectCandidate::new(1, "One"),
            ProjectCandidate::new(2, "Two"),
        ]));
        composer.draft_mut().recipients.add_single("a@x.com").unwrap();
        composer.draft_mut().targets.toggle(1);
        composer
    }

    #[test]
    fn test_empty_draft_cannot_submit() {
        let mut composer = BulkInviteComposer::new(InvitationDraft::new(vec![]));
        assert!(!composer.can_submit());
        assert_eq!(composer.begin_submit(), Err(SubmitBlocked::NoRecipients));
        assert_eq!(composer.state(), SubmissionState::Idle);
    }

    #[test]
    fn test_submitting_blocks_duplicate_dispatch() {
        let mut composer = ready_bulk();
        assert!(composer.can_submit());
        composer.begin_submit().unwrap();

        assert!(composer.is_submitting());
        assert!(!composer.can_submit());
        assert_eq!(
            composer.begin_submit(),
            Err(SubmitBlocked::AlreadySubmitting)
        );
    }

    #[test]
    fn test_success_discards_draft_and_closes() {
        let mut composer = ready_bulk();
        composer.draft_mut().role = InviteRole::Admin;
        composer.begin_submit().unwrap();

        assert!(composer.complete_success());
        assert_eq!(composer.state(), SubmissionState::Closed);
        assert!(composer.draft().recipients.is_empty());
        assert!(composer.draft().targets.is_empty());
        assert_eq!(composer.draft().role, InviteRole::Viewer);
        assert_eq!(composer.begin_submit(), Err(SubmitBlocked::Closed));
    }

    #[test]
    fn test_failure_keeps_draft_and_allows_resubmit() {
        let mut composer = MemberInviteComposer::new(MemberInviteDraft::new(3));
        composer.draft_mut().set_email("dup@x.com");
        composer.draft_mut().role = InviteRole::Editor;
        composer.begin_submit().unwrap();

        let mut errors = FieldErrors::new();
        errors.insert("email", "already invited");
        assert!(composer.complete_failure(errors));

        assert_eq!(composer.state(), SubmissionState::Errored);
        assert_eq!(composer.field_error("email"), Some("already invited"));
        assert_eq!(composer.draft().email(), "dup@x.com");
        assert_eq!(composer.draft().role, InviteRole::Editor);

        composer
            .draft_mut()
            .select_user(UserSummary::new(5, "Ada", "ada@x.com"));
        assert_eq!(composer.draft().email(), "");
        let request = composer.begin_submit().unwrap();
        assert_eq!(request.user_id, Some(5));
        assert!(composer.errors().is_empty());
    }

    #[test]
    fn test_late_outcomes_are_ignored() {
        let mut composer = ready_bulk();
        composer.begin_submit().unwrap();
        composer.close();

        assert!(!composer.complete_failure(FieldErrors::general("timeout")));
        assert!(!composer.complete_success());
        assert_eq!(composer.state(), SubmissionState::Closed);
        assert!(composer.errors().is_empty());
    }

    #[test]
    fn test_reopen_starts_fresh() {
        let mut composer = ready_bulk();
        composer.close();
        composer.reopen();
        assert_eq!(composer.state(), SubmissionState::Idle);
        assert!(composer.draft().recipients.is_empty());
    }
}
