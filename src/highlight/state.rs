use crate::points::PointId;
use std::collections::HashSet;

/// The one listing the user is pointing at, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Focus {
    /// Hovered in the results list
    Hovered(PointId),
    /// Clicked on the map
    Selected(PointId),
}

impl Focus {
    pub fn id(&self) -> &str {
        match self {
            Focus::Hovered(id) | Focus::Selected(id) => id,
        }
    }
}

/// Snapshot of user interaction read by a recomputation pass.
///
/// Owned by the caller; the engine never mutates a snapshot in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionState {
    pub liked: HashSet<PointId>,
    pub disliked: HashSet<PointId>,
    /// Listings the guest has applied to
    pub applied: HashSet<PointId>,
    pub focus: Option<Focus>,
    /// Sorted member ids of a clicked cluster marker
    pub selected_cluster: Option<Vec<PointId>>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Like a listing, clearing any dislike
    pub fn like(&mut self, id: impl Into<PointId>) {
        let id = id.into();
        self.disliked.remove(&id);
        self.liked.insert(id);
    }

    /// Dislike a listing, clearing any like
    pub fn dislike(&mut self, id: impl Into<PointId>) {
        let id = id.into();
        self.liked.remove(&id);
        self.disliked.insert(id);
    }

    pub fn apply(&mut self, id: impl Into<PointId>) {
        self.applied.insert(id.into());
    }

    pub fn hover(&mut self, id: impl Into<PointId>) {
        self.focus = Some(Focus::Hovered(id.into()));
    }

    pub fn select(&mut self, id: impl Into<PointId>) {
        self.focus = Some(Focus::Selected(id.into()));
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn is_selected(&self, id: &str) -> bool {
        matches!(&self.focus, Some(Focus::Selected(selected)) if selected == id)
    }

    pub fn select_cluster(&mut self, member_ids: &[PointId]) {
        let mut ids = member_ids.to_vec();
        ids.sort();
        self.selected_cluster = Some(ids);
    }
}
