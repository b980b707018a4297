//! # Taskboard Invitations
//!
//! This crate holds the state behind Taskboard's invite dialogs: who is
//! invited, to which projects, with what role, and whether the draft may be
//! sent. It performs no I/O; `taskboard-client` sends what it produces.
//!
//! ## Overview
//!
//! The taskboard-invite crate handles:
//! - **Recipients**: De-duplicated, validated email addresses from typing or pasting
//! - **Targets**: Project selection with filter-scoped "select all"
//! - **Drafts**: Bulk (emails × projects) and single-member invitations
//! - **Composer**: The `Idle → Submitting → Closed | Errored` dialog lifecycle
//! - **Roles**: Invite roles and the project role hierarchy
//! - **Invitations**: Stored invitation records and expiry
//! - **Roster**: Team page grouping of members by role
//!
//! ## Architecture
//!
//! ```text
//! Composer<D: InviteDraft>
//!   ├─ InvitationDraft ─→ BulkInviteRequest
//!   │     ├─ RecipientSet
//!   │     ├─ TargetSelection ─→ ProjectCandidate
//!   │     └─ InviteRole
//!   ├─ MemberInviteDraft ─→ MemberInviteRequest
//!   └─ FieldErrors (last failure)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use taskboard_invite::{BulkInviteComposer, InvitationDraft, ProjectCandidate};
//!
//! let mut composer = BulkInviteComposer::new(InvitationDraft::new(vec![
//!     ProjectCandidate::new(1, "Website"),
//!     ProjectCandidate::new(2, "Mobile"),
//! ]));
//!
//! composer.draft_mut().recipients.add_bulk("a@x.com, b@x.com");
//! composer.draft_mut().targets.toggle_all_visible("");
//! assert_eq!(composer.draft().total_invitations(), 4);
//!
//! let request = composer.begin_submit().unwrap();
//! assert_eq!(request.emails.len(), 2);
//! ```

pub mod composer;
pub mod draft;
pub mod field_errors;
pub mod invitation;
pub mod recipients;
pub mod roles;
pub mod roster;
pub mod targets;

// Re-export main types for convenience
pub use composer::{BulkInviteComposer, Composer, MemberInviteComposer, SubmissionState};
pub use draft::{
    BulkInviteRequest, InvitationDraft, InviteDraft, MemberInviteDraft, MemberInviteRequest,
    SubmitBlocked,
};
pub use field_errors::{FieldErrors, GENERAL_FIELD};
pub use invitation::{Invitation, InvitationId, InvitationStatus, DEFAULT_EXPIRY_DAYS};
pub use recipients::{is_valid_email, BulkAddReport, RecipientRejection, RecipientSet};
pub use roles::{InviteRole, ProjectRole};
pub use roster::{filter_members, group_by_role, ProjectMember, RoleGroup, UserId, UserSummary};
pub use targets::{ProjectCandidate, ProjectId, TargetSelection};
