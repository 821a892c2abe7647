use serde::{Deserialize, Serialize};

/// Visual classification of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighlightKind {
    Default,
    Hovered,
    Selected,
    Liked,
    Disliked,
    Applied,
}

impl HighlightKind {
    /// Z-order on the surface; higher draws on top
    pub fn stacking_order(self) -> u8 {
        match self {
            HighlightKind::Hovered => 10,
            HighlightKind::Selected => 5,
            HighlightKind::Liked => 3,
            HighlightKind::Applied => 2,
            HighlightKind::Default => 1,
            HighlightKind::Disliked => 0,
        }
    }

    pub fn is_focused(self) -> bool {
        matches!(self, HighlightKind::Hovered | HighlightKind::Selected)
    }
}

/// Shape of a single-listing marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointStyle {
    /// Price label bubble, used while few listings are on screen
    PriceBubble,
    /// Compact pin for crowded views
    Pin,
}

impl PointStyle {
    pub fn for_visible_count(visible: usize, threshold: usize) -> Self {
        if visible > threshold {
            PointStyle::Pin
        } else {
            PointStyle::PriceBubble
        }
    }
}
