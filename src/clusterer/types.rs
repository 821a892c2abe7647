use super::centroid::compute_centroid;
use crate::geo::LatLng;
use crate::points::{Point, PointId};

/// Points merged into one marker for the current pass.
///
/// Clusters are rebuilt on every pass and carry no identity of their own.
/// `member_ids` is sorted and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub centroid: LatLng,
    pub member_ids: Vec<PointId>,
}

impl Cluster {
    /// Returns `None` for an empty member list
    pub fn from_members<'a, P: 'a>(members: impl IntoIterator<Item = &'a Point<P>>) -> Option<Self> {
        let members: Vec<&Point<P>> = members.into_iter().collect();
        let centroid = compute_centroid(members.iter().map(|p| p.position()))?;

        let mut member_ids: Vec<PointId> = members.iter().map(|p| p.id.clone()).collect();
        member_ids.sort();

        Some(Self {
            centroid,
            member_ids,
        })
    }

    pub fn single<P>(point: &Point<P>) -> Self {
        Self {
            centroid: point.position(),
            member_ids: vec![point.id.clone()],
        }
    }

    pub fn len(&self) -> usize {
        self.member_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.member_ids.is_empty()
    }

    /// Size-1 clusters render as plain point markers
    pub fn is_single(&self) -> bool {
        self.member_ids.len() == 1
    }
}

/// How visible points are turned into markers at the current zoom
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Granularity {
    Clustered { pixel_radius: f64 },
    Individual,
}

impl Granularity {
    pub fn is_clustered(&self) -> bool {
        matches!(self, Granularity::Clustered { .. })
    }
}
