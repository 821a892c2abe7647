use crate::points::PointId;
use serde::Serialize;

/// Value consumed by the results list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub enum VisibleListings {
    /// No filter: the list shows everything
    #[default]
    Unfiltered,
    /// Only these ids
    Only(Vec<PointId>),
}

impl VisibleListings {
    pub fn allows(&self, id: &str) -> bool {
        match self {
            VisibleListings::Unfiltered => true,
            VisibleListings::Only(ids) => ids.iter().any(|i| i == id),
        }
    }

    pub fn ids(&self) -> Option<&[PointId]> {
        match self {
            VisibleListings::Unfiltered => None,
            VisibleListings::Only(ids) => Some(ids),
        }
    }
}

/// Decides what the map publishes to the visible-listings store.
///
/// Before the user has panned or zoomed the list stays unfiltered. While a
/// single listing is pinned by a marker click, viewport passes leave the
/// store alone.
#[derive(Debug, Clone, Default)]
pub struct VisibilityPublisher {
    interacted: bool,
    pinned: Option<PointId>,
}

impl VisibilityPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_interacted(&mut self) {
        self.interacted = true;
    }

    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    pub fn pin(&mut self, id: PointId) -> VisibleListings {
        let published = VisibleListings::Only(vec![id.clone()]);
        self.pinned = Some(id);
        published
    }

    pub fn unpin(&mut self) -> Option<PointId> {
        self.pinned.take()
    }

    pub fn pinned(&self) -> Option<&str> {
        self.pinned.as_deref()
    }

    /// `None` means leave the store untouched
    pub fn decide(&self, visible: &[PointId]) -> Option<VisibleListings> {
        if self.pinned.is_some() {
            return None;
        }
        if !self.interacted {
            return Some(VisibleListings::Unfiltered);
        }
        Some(VisibleListings::Only(visible.to_vec()))
    }
}
