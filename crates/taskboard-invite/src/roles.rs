//! Invitation and project roles
//!
//! This module defines the role a new member is invited with, and the role
//! hierarchy of existing project members that decides who may invite.

use serde::{Deserialize, Serialize};

/// Role offered to an invitee.
///
/// The invite dialogs only ever offer these three roles. Ownership is never
/// granted through an invitation.
///
/// # Examples
///
/// ```
/// use taskboard_invite::InviteRole;
///
/// let role = InviteRole::default();
/// assert_eq!(role, InviteRole::Viewer);
/// assert_eq!(role.as_str(), "viewer");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InviteRole {
    /// Read-only access to the project
    Viewer = 1,

    /// Can create and edit boards, lists and tasks
    Editor = 2,

    /// Can manage project settings and members
    Admin = 3,
}

impl InviteRole {
    /// All roles in the order the role picker lists them.
    pub const ALL: [InviteRole; 3] = [Self::Admin, Self::Editor, Self::Viewer];

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(InviteRole)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use taskboard_invite::InviteRole;
    ///
    /// assert_eq!(InviteRole::parse("admin"), Some(InviteRole::Admin));
    /// assert_eq!(InviteRole::parse("EDITOR"), Some(InviteRole::Editor));
    /// assert_eq!(InviteRole::parse("owner"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "editor" => Some(Self::Editor),
            "viewer" => Some(Self::Viewer),
            _ => None,
        }
    }

    /// Get the wire representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }

    /// Describe what the role allows, as shown under the role picker.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Admin => "Full access to the project, including settings and members",
            Self::Editor => "Can create and edit boards, task lists and tasks",
            Self::Viewer => "Can view the project but cannot make changes",
        }
    }
}

impl Default for InviteRole {
    fn default() -> Self {
        Self::Viewer
    }
}

impl std::fmt::Display for InviteRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of an existing member within a project.
///
/// The hierarchy is: Viewer < Editor < Admin < Owner
///
/// # Permission Model
///
/// - **Viewer**: Read-only access to project resources
/// - **Editor**: Can create and edit boards, lists and tasks
/// - **Admin**: Can manage project settings and invite members
/// - **Owner**: Full project control including deletion
///
/// # Examples
///
/// ```
/// use taskboard_invite::ProjectRole;
///
/// assert!(ProjectRole::Admin.can_invite());
/// assert!(!ProjectRole::Editor.can_invite());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
    /// Read-only access
    Viewer = 1,

    /// Can create and edit content
    Editor = 2,

    /// Can manage project settings and members
    Admin = 3,

    /// Project owner (can delete)
    Owner = 4,
}

impl ProjectRole {
    /// Check if this role can edit content.
    ///
    /// # Returns
    ///
    /// `true` for Editor, Admin, and Owner roles
    pub fn can_edit(&self) -> bool {
        *self >= ProjectRole::Editor
    }

    /// Check if this role can send invitations to the project.
    ///
    /// # Returns
    ///
    /// `true` for Admin and Owner roles
    pub fn can_invite(&self) -> bool {
        *self >= ProjectRole::Admin
    }

    /// Check if this role can manage the project.
    ///
    /// # Returns
    ///
    /// `true` for Admin and Owner roles
    pub fn can_manage(&self) -> bool {
        *self >= ProjectRole::Admin
    }

    /// Check if this role can delete the project.
    ///
    /// # Returns
    ///
    /// `true` only for Owner role
    pub fn can_delete(&self) -> bool {
        *self >= ProjectRole::Owner
    }

    /// Roles this member may hand out when inviting.
    ///
    /// Owners may invite at any level, admins only below themselves.
    pub fn assignable_invite_roles(&self) -> &'static [InviteRole] {
        match self {
            Self::Owner => &InviteRole::ALL,
            Self::Admin => &[InviteRole::Editor, InviteRole::Viewer],
            Self::Editor | Self::Viewer => &[],
        }
    }

    /// Parse role from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Get string representation of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
            Self::Owner => "Owner",
        }
    }
}

impl Default for ProjectRole {
    fn default() -> Self {
        Self::Viewer
    }
}

impl From<InviteRole> for ProjectRole {
    fn from(role: InviteRole) -> Self {
        match role {
            InviteRole::Viewer => Self::Viewer,
            InviteRole::Editor => Self::Editor,
            InviteRole::Admin => Self::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_role_parse() {
        assert_eq!(InviteRole::parse("admin"), Some(InviteRole::Admin));
        assert_eq!(InviteRole::parse(" Viewer "), Some(InviteRole::Viewer));
        assert_eq!(InviteRole::parse("owner"), None);
        assert_eq!(InviteRole::parse(""), None);
    }

    #[test]
    fn test_invite_role_serde() {
        let json = serde_json::to_string(&InviteRole::Editor).unwrap();
        assert_eq!(json, "\"editor\"");

        let role: InviteRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, InviteRole::Admin);
    }

    #[test]
    fn test_every_invite_role_has_a_description() {
        for role in InviteRole::ALL {
            assert!(!role.description().is_empty());
            assert_eq!(InviteRole::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_project_role_hierarchy() {
        assert!(ProjectRole::Owner > ProjectRole::Admin);
        assert!(ProjectRole::Admin > ProjectRole::Editor);
        assert!(ProjectRole::Editor > ProjectRole::Viewer);
    }

    #[test]
    fn test_project_role_permissions() {
        assert!(!ProjectRole::Viewer.can_edit());
        assert!(ProjectRole::Editor.can_edit());
        assert!(!ProjectRole::Editor.can_invite());
        assert!(ProjectRole::Admin.can_invite());
        assert!(ProjectRole::Admin.can_manage());
        assert!(!ProjectRole::Admin.can_delete());
        assert!(ProjectRole::Owner.can_delete());
    }

    #[test]
    fn test_assignable_invite_roles() {
        assert_eq!(ProjectRole::Owner.assignable_invite_roles().len(), 3);
        assert_eq!(
            ProjectRole::Admin.assignable_invite_roles(),
            &[InviteRole::Editor, InviteRole::Viewer]
        );
        assert!(ProjectRole::Editor.assignable_invite_roles().is_empty());
    }

    #[test]
    fn test_invite_role_into_project_role() {
        assert_eq!(ProjectRole::from(InviteRole::Admin), ProjectRole::Admin);
        assert_eq!(ProjectRole::from(InviteRole::Viewer), ProjectRole::Viewer);
    }
}
