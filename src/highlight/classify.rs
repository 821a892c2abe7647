use super::{Focus, HighlightKind, InteractionState};
use crate::points::PointId;

/// Highlight for a marker showing `member_ids`.
///
/// Precedence, highest first: focus (selected/hovered), disliked, liked,
/// applied, default. A cluster marker (more than one member) only reacts to
/// focus on any member, or to being the clicked cluster.
pub fn classify(member_ids: &[PointId], state: &InteractionState) -> HighlightKind {
    if let Some(focus) = &state.focus {
        if member_ids.iter().any(|id| id == focus.id()) {
            return match focus {
                Focus::Hovered(_) => HighlightKind::Hovered,
                Focus::Selected(_) => HighlightKind::Selected,
            };
        }
    }

    match member_ids {
        [id] => {
            if state.disliked.contains(id) {
                HighlightKind::Disliked
            } else if state.liked.contains(id) {
                HighlightKind::Liked
            } else if state.applied.contains(id) {
                HighlightKind::Applied
            } else {
                HighlightKind::Default
            }
        }
        _ => {
            let clicked = state
                .selected_cluster
                .as_deref()
                .is_some_and(|selected| is_same_members(selected, member_ids));

            if clicked {
                HighlightKind::Selected
            } else {
                HighlightKind::Default
            }
        }
    }
}

fn is_same_members(sorted: &[PointId], members: &[PointId]) -> bool {
    if sorted.len() != members.len() {
        return false;
    }
    let mut members = members.to_vec();
    members.sort();
    members == sorted
}
