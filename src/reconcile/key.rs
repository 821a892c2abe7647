use crate::points::PointId;
use serde::Serialize;
use std::fmt;

/// Identity of a rendered marker across passes.
///
/// A single-point marker is keyed by its point id; a cluster marker by its
/// sorted member ids joined with a delimiter, so an unchanged membership maps
/// to the same key no matter which pass produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MarkerKey(String);

impl MarkerKey {
    pub fn for_members(member_ids: &[PointId], delimiter: &str) -> Self {
        match member_ids {
            [id] => Self(id.clone()),
            _ => {
                let mut sorted: Vec<&str> = member_ids.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                Self(sorted.join(delimiter))
            }
        }
    }

    pub fn for_point(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
