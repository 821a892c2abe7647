use super::MarkerKey;
use crate::geo::LatLng;
use crate::highlight::{HighlightKind, PointStyle};
use crate::points::PointId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Point(PointStyle),
    Cluster { count: usize },
}

/// A marker as planned for, or currently placed on, the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: MarkerKey,
    pub kind: MarkerKind,
    pub position: LatLng,
    pub member_ids: Vec<PointId>,
    pub highlight: HighlightKind,
}

impl Marker {
    pub fn is_cluster(&self) -> bool {
        matches!(self.kind, MarkerKind::Cluster { .. })
    }

    /// Point id of a single-listing marker
    pub fn point_id(&self) -> Option<&str> {
        match (self.kind, self.member_ids.as_slice()) {
            (MarkerKind::Point(_), [id]) => Some(id),
            _ => None,
        }
    }
}

/// Pass-wide inputs for turning clusters into markers
#[derive(Debug, Clone, Copy)]
pub struct MarkerLayout<'a> {
    pub point_style: PointStyle,
    pub delimiter: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recolor {
    pub key: MarkerKey,
    pub from: HighlightKind,
    pub to: HighlightKind,
}

/// Everything one pass changes on the surface
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerCommands {
    pub to_create: Vec<Marker>,
    pub to_remove: Vec<MarkerKey>,
    pub to_recolor: Vec<Recolor>,
}

impl MarkerCommands {
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty() && self.to_recolor.is_empty()
    }

    pub fn len(&self) -> usize {
        self.to_create.len() + self.to_remove.len() + self.to_recolor.len()
    }
}
