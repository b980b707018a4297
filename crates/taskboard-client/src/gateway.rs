//! Submission gateway.
//!
//! Sends the draft held by a composer as exactly one request and applies the
//! outcome back to the composer: success discards the draft and closes the
//! dialog, failure keeps the draft and shows field errors. There is no
//! automatic retry.

use async_trait::async_trait;
use taskboard_invite::{
    BulkInviteComposer, BulkInviteRequest, Composer, FieldErrors, InviteDraft,
    MemberInviteComposer, MemberInviteRequest, ProjectId, SubmitBlocked,
};
use tracing::{info, warn};

use crate::client::{InviteReceipt, TaskboardClient};
use crate::error::ClientResult;

/// Destination for invitation submissions.
#[async_trait]
pub trait InvitationGateway: Send + Sync {
    /// Send a bulk invitation.
    async fn send_bulk(&self, request: &BulkInviteRequest) -> ClientResult<InviteReceipt>;

    /// Send a single member invitation into `project_id`.
    async fn send_member(
        &self,
        project_id: ProjectId,
        request: &MemberInviteRequest,
    ) -> ClientResult<InviteReceipt>;
}

#[async_trait]
impl InvitationGateway for TaskboardClient {
    async fn send_bulk(&self, request: &BulkInviteRequest) -> ClientResult<InviteReceipt> {
        self.send_bulk_invitations(request).await
    }

    async fn send_member(
        &self,
        project_id: ProjectId,
        request: &MemberInviteRequest,
    ) -> ClientResult<InviteReceipt> {
        self.send_member_invitation(project_id, request).await
    }
}

/// How a dispatched submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Accepted by the backend; the composer is closed.
    Sent(InviteReceipt),

    /// Rejected or failed; the composer shows these errors.
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    /// Check if the backend accepted the submission.
    pub fn is_sent(&self) -> bool {
        matches!(self, SubmitOutcome::Sent(_))
    }
}

/// Submit the bulk invite dialog.
///
/// Returns `Err` without sending anything when the draft is incomplete or a
/// submission is already in flight.
pub async fn submit_bulk<G>(
    gateway: &G,
    composer: &mut BulkInviteComposer,
) -> Result<SubmitOutcome, SubmitBlocked>
where
    G: InvitationGateway + ?Sized,
{
    let request = composer.begin_submit()?;
    info!(
        emails = request.emails.len(),
        projects = request.project_ids.len(),
        role = %request.role,
        "Submitting bulk invitations"
    );

    let result = gateway.send_bulk(&request).await;
    Ok(apply_outcome(composer, result))
}

/// Submit the member invite dialog.
pub async fn submit_member<G>(
    gateway: &G,
    composer: &mut MemberInviteComposer,
) -> Result<SubmitOutcome, SubmitBlocked>
where
    G: InvitationGateway + ?Sized,
{
    let request = composer.begin_submit()?;
    let project_id = composer.draft().project_id();
    info!(
        project_id,
        existing_user = request.user_id.is_some(),
        role = %request.role,
        "Submitting member invitation"
    );

    let result = gateway.send_member(project_id, &request).await;
    Ok(apply_outcome(composer, result))
}

fn apply_outcome<D: InviteDraft>(
    composer: &mut Composer<D>,
    result: ClientResult<InviteReceipt>,
) -> SubmitOutcome {
    match result {
        Ok(receipt) => {
            composer.complete_success();
            SubmitOutcome::Sent(receipt)
        }
        Err(e) => {
            warn!(error = %e, "Invitation submission failed");
            let errors = e.into_field_errors();
            composer.complete_failure(errors.clone());
            SubmitOutcome::Rejected(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::Mutex;
    use taskboard_invite::{
        InvitationDraft, InviteRole, MemberInviteDraft, ProjectCandidate, SubmissionState,
    };

    #[derive(Default)]
    struct RecordingGateway {
        bulk: Mutex<Vec<BulkInviteRequest>>,
        member: Mutex<Vec<(ProjectId, MemberInviteRequest)>>,
        reject_with: Option<FieldErrors>,
    }

    #[async_trait]
    impl InvitationGateway for RecordingGateway {
        async fn send_bulk(&self, request: &BulkInviteRequest) -> ClientResult<InviteReceipt> {
            self.bulk.lock().unwrap().push(request.clone());
            self.respond()
        }

        async fn send_member(
            &self,
            project_id: ProjectId,
            request: &MemberInviteRequest,
        ) -> ClientResult<InviteReceipt> {
            self.member
                .lock()
                .unwrap()
                .push((project_id, request.clone()));
            self.respond()
        }
    }

    impl RecordingGateway {
        fn respond(&self) -> ClientResult<InviteReceipt> {
            match &self.reject_with {
                Some(errors) => Err(ClientError::Validation {
                    message: "The given data was invalid.".to_string(),
                    errors: errors.clone(),
                }),
                None => Ok(InviteReceipt {
                    message: Some("Invitations sent".to_string()),
                    ..Default::default()
                }),
            }
        }
    }

    fn bulk_composer() -> BulkInviteComposer {
        BulkInviteComposer::new(InvitationDraft::new(vec![
            ProjectCandidate::new(1, "One"),
            ProjectCandidate::new(2, "Two"),
            ProjectCandidate::new(3, "Three"),
        ]))
    }

    #[tokio::test]
    async fn test_blocked_submission_sends_nothing() {
        let gateway = RecordingGateway::default();
        let mut composer = bulk_composer();
        composer.draft_mut().targets.toggle(1);

        let result = submit_bulk(&gateway, &mut composer).await;
        assert_eq!(result, Err(SubmitBlocked::NoRecipients));
        assert!(gateway.bulk.lock().unwrap().is_empty());

        composer.draft_mut().targets.clear();
        composer.draft_mut().recipients.add_single("a@x.com").unwrap();
        let result = submit_bulk(&gateway, &mut composer).await;
        assert_eq!(result, Err(SubmitBlocked::NoTargets));
        assert!(gateway.bulk.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_success_resets_and_closes() {
        let gateway = RecordingGateway::default();
        let mut composer = bulk_composer();
        composer.draft_mut().recipients.add_bulk("a@x.com b@x.com");
        composer.draft_mut().targets.toggle_all_visible("");
        composer.draft_mut().role = InviteRole::Viewer;
        assert_eq!(composer.draft().total_invitations(), 6);

        let outcome = submit_bulk(&gateway, &mut composer).await.unwrap();
        assert!(outcome.is_sent());
        assert_eq!(composer.state(), SubmissionState::Closed);
        assert!(composer.draft().recipients.is_empty());

        let sent = gateway.bulk.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].emails, vec!["a@x.com", "b@x.com"]);
        assert_eq!(sent[0].project_ids, vec![1, 2, 3]);
        assert_eq!(sent[0].role, InviteRole::Viewer);
    }

    #[tokio::test]
    async fn test_member_rejection_keeps_draft() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "already invited");
        let gateway = RecordingGateway {
            reject_with: Some(errors),
            ..Default::default()
        };

        let mut composer = MemberInviteComposer::new(MemberInviteDraft::new(12));
        composer.draft_mut().set_email("ada@x.com");
        composer.draft_mut().role = InviteRole::Admin;

        let outcome = submit_member(&gateway, &mut composer).await.unwrap();
        assert!(!outcome.is_sent());
        assert_eq!(composer.state(), SubmissionState::Errored);
        assert_eq!(composer.field_error("email"), Some("already invited"));
        assert_eq!(composer.draft().email(), "ada@x.com");
        assert_eq!(composer.draft().role, InviteRole::Admin);

        let sent = gateway.member.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 12);
    }
}
