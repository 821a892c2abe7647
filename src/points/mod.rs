mod set;
mod types;


pub use set::{PointSet, SanitizeReport};
pub use types::{Point, PointId};
