//! Project members and the team page listing
//!
//! The team page shows project members grouped by role, with a free-text
//! filter over names and emails.

use serde::{Deserialize, Serialize};

use crate::roles::ProjectRole;

/// Integer user identifier as used by the backend.
pub type UserId = i64;

/// Short user record, as returned by the member search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User ID
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserSummary {
    /// Creates a user summary without an avatar.
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

/// A user together with their role in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// The member
    #[serde(flatten)]
    pub user: UserSummary,

    /// Role within the project
    pub role: ProjectRole,
}

impl ProjectMember {
    /// Creates a project member.
    pub fn new(user: UserSummary, role: ProjectRole) -> Self {
        Self { user, role }
    }
}

/// Members sharing one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroup<'a> {
    /// The shared role
    pub role: ProjectRole,

    /// Members sorted by name
    pub members: Vec<&'a ProjectMember>,
}

/// Group members by role, highest role first.
///
/// Empty groups are omitted. Within a group members are sorted by name
/// (case-insensitive), then by email.
pub fn group_by_role(members: &[ProjectMember]) -> Vec<RoleGroup<'_>> {
    const ORDER: [ProjectRole; 4] = [
        ProjectRole::Owner,
        ProjectRole::Admin,
        ProjectRole::Editor,
        ProjectRole::Viewer,
    ];

    ORDER
        .iter()
        .filter_map(|&role| {
            let mut group: Vec<&ProjectMember> =
                members.iter().filter(|m| m.role == role).collect();
            if group.is_empty() {
                return None;
            }
            group.sort_by(|a, b| {
                a.user
                    .name
                    .to_lowercase()
                    .cmp(&b.user.name.to_lowercase())
                    .then_with(|| a.user.email.cmp(&b.user.email))
            });
            Some(RoleGroup {
                role,
                members: group,
            })
        })
        .collect()
}

/// Members whose name or email contains `query` (case-insensitive).
pub fn filter_members<'a>(members: &'a [ProjectMember], query: &str) -> Vec<&'a ProjectMember> {
    let needle = query.trim().to_lowercase();
    members
        .iter()
        .filter(|m| needle.is_empty() || m.user.matches(&needle))
        .collect()
}
