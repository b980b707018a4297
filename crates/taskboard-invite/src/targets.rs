//! Project target selection
//!
//! Tracks which projects a bulk invitation is sent to. Candidates come from
//! the page payload and are trusted as-is; the selection never holds an id
//! that is not among them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::roles::ProjectRole;

/// Integer project identifier as used by the backend.
pub type ProjectId = i64;

/// A project the inviter may pick as an invitation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCandidate {
    /// Project ID
    pub id: ProjectId,

    /// Project name shown in the picker
    pub name: String,

    /// Optional short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ProjectCandidate {
    /// Creates a candidate without a description.
    pub fn new(id: ProjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    /// Keep only the projects in which the inviter holds an inviting role.
    ///
    /// # Arguments
    ///
    /// * `projects` - Each project paired with the inviter's role in it
    pub fn invitable<I>(projects: I) -> Vec<ProjectCandidate>
    where
        I: IntoIterator<Item = (ProjectCandidate, ProjectRole)>,
    {
        projects
            .into_iter()
            .filter(|(_, role)| role.can_invite())
            .map(|(candidate, _)| candidate)
            .collect()
    }

    fn matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(needle)
    }
}

/// Selected invitation targets over a fixed candidate list.
///
/// # Examples
///
/// ```
/// use taskboard_invite::{ProjectCandidate, TargetSelection};
///
/// let mut targets = TargetSelection::new(vec![
///     ProjectCandidate::new(1, "Website"),
///     ProjectCandidate::new(2, "Mobile app"),
/// ]);
///
/// targets.toggle(2);
/// assert_eq!(targets.ids(), vec![2]);
///
/// targets.toggle_all_visible("");
/// assert_eq!(targets.ids(), vec![1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    candidates: Vec<ProjectCandidate>,
    selected: BTreeSet<ProjectId>,
}

impl TargetSelection {
    /// Creates an empty selection over `candidates`.
    pub fn new(candidates: Vec<ProjectCandidate>) -> Self {
        Self {
            candidates,
            selected: BTreeSet::new(),
        }
    }

    /// The candidate list this selection draws from.
    pub fn candidates(&self) -> &[ProjectCandidate] {
        &self.candidates
    }

    /// Flip membership of `id`.
    ///
    /// # Returns
    ///
    /// `true` if the project is selected afterwards. Unknown ids are ignored
    /// and report `false`.
    pub fn toggle(&mut self, id: ProjectId) -> bool {
        if !self.is_candidate(id) {
            return false;
        }
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Select every given id that is a candidate.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = ProjectId>,
    {
        for id in ids {
            if self.is_candidate(id) {
                self.selected.insert(id);
            }
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Candidates whose name contains `filter` (case-insensitive).
    ///
    /// An empty or blank filter shows every candidate.
    pub fn visible(&self, filter: &str) -> Vec<&ProjectCandidate> {
        let needle = filter.trim().to_lowercase();
        self.candidates
            .iter()
            .filter(|candidate| candidate.matches(&needle))
            .collect()
    }

    /// Check if every visible candidate is selected.
    ///
    /// `false` when nothing is visible.
    pub fn all_visible_selected(&self, filter: &str) -> bool {
        let visible = self.visible(filter);
        !visible.is_empty() && visible.iter().all(|c| self.selected.contains(&c.id))
    }

    /// The "select all" checkbox of the project picker.
    ///
    /// Operates on the visible subset only: when all of it is selected it is
    /// deselected, otherwise all of it is selected. Selections outside the
    /// visible subset are untouched.
    pub fn toggle_all_visible(&mut self, filter: &str) {
        let visible: Vec<ProjectId> = self.visible(filter).iter().map(|c| c.id).collect();
        if self.all_visible_selected(filter) {
            for id in visible {
                self.selected.remove(&id);
            }
        } else {
            self.selected.extend(visible);
        }
    }

    /// Check if `id` is selected.
    pub fn contains(&self, id: ProjectId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<ProjectId> {
        self.selected.iter().copied().collect()
    }

    /// Selected candidates in candidate-list order.
    pub fn selected_projects(&self) -> Vec<&ProjectCandidate> {
        self.candidates
            .iter()
            .filter(|c| self.selected.contains(&c.id))
            .collect()
    }

    /// Number of selected projects.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    fn is_candidate(&self, id: ProjectId) -> bool {
        self.candidates.iter().any(|c| c.id == id)
    }
}
