use crate::geo::GeoBounds;
use crate::points::{Point, PointId};

/// Points whose coordinate lies inside `bounds` (closed on both axes).
///
/// A degenerate viewport yields nothing.
pub fn visible_points<'a, P: 'a>(
    points: impl IntoIterator<Item = &'a Point<P>>,
    bounds: &GeoBounds,
) -> Vec<&'a Point<P>> {
    if bounds.is_degenerate() {
        return Vec::new();
    }

    points
        .into_iter()
        .filter(|p| bounds.contains(p.position()))
        .collect()
}

pub fn visible_ids<P>(visible: &[&Point<P>]) -> Vec<PointId> {
    visible.iter().map(|p| p.id.clone()).collect()
}
