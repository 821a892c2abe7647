use super::{Point, PointId};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Counts of input points dropped during sanitation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SanitizeReport {
    pub accepted: usize,
    pub duplicate_ids: usize,
    pub invalid_coordinates: usize,
    /// Ids containing the marker key delimiter
    pub reserved_ids: usize,
}

impl SanitizeReport {
    pub fn dropped(&self) -> usize {
        self.duplicate_ids + self.invalid_coordinates + self.reserved_ids
    }
}

/// Deduplicated, coordinate-checked point collection with an id index
#[derive(Debug, Clone)]
pub struct PointSet<P> {
    points: Vec<Point<P>>,
    index: HashMap<PointId, usize>,
    report: SanitizeReport,
}

impl<P> PointSet<P> {
    /// Build a set from raw caller input.
    ///
    /// The first occurrence of a duplicated id wins. Points with NaN,
    /// infinite or out-of-range coordinates are dropped.
    pub fn new(raw: Vec<Point<P>>) -> Self {
        Self::build(raw, None)
    }

    /// Like [`PointSet::new`], also dropping ids that contain `delimiter`,
    /// which would be indistinguishable from a cluster key.
    pub fn with_key_delimiter(raw: Vec<Point<P>>, delimiter: &str) -> Self {
        Self::build(raw, Some(delimiter).filter(|d| !d.is_empty()))
    }

    fn build(raw: Vec<Point<P>>, delimiter: Option<&str>) -> Self {
        let mut points = Vec::with_capacity(raw.len());
        let mut index = HashMap::with_capacity(raw.len());
        let mut report = SanitizeReport::default();

        for point in raw {
            if !point.position().is_valid() {
                debug!(id = %point.id, lat = point.lat, lng = point.lng, "dropping point with invalid coordinates");
                report.invalid_coordinates += 1;
                continue;
            }
            if delimiter.is_some_and(|d| point.id.contains(d)) {
                debug!(id = %point.id, "dropping point whose id contains the key delimiter");
                report.reserved_ids += 1;
                continue;
            }
            if index.contains_key(&point.id) {
                debug!(id = %point.id, "dropping duplicate point id");
                report.duplicate_ids += 1;
                continue;
            }

            index.insert(point.id.clone(), points.len());
            points.push(point);
        }

        report.accepted = points.len();
        if report.dropped() > 0 {
            warn!(
                duplicates = report.duplicate_ids,
                invalid = report.invalid_coordinates,
                reserved = report.reserved_ids,
                accepted = report.accepted,
                "malformed points dropped from map input"
            );
        }

        Self {
            points,
            index,
            report,
        }
    }

    pub fn empty() -> Self {
        Self {
            points: Vec::new(),
            index: HashMap::new(),
            report: SanitizeReport::default(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Point<P>> {
        self.index.get(id).map(|&i| &self.points[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point<P>> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point<P>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn report(&self) -> SanitizeReport {
        self.report
    }
}

impl<P> Default for PointSet<P> {
    fn default() -> Self {
        Self::empty()
    }
}
