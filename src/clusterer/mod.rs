mod centroid;
mod grid;
mod proximity;
mod radius;
mod types;

#[cfg(test)]
mod tests;

pub use centroid::compute_centroid;
pub use proximity::{cluster, singletons};
pub use radius::{MIN_RADIUS_PX, RadiusPolicy, RadiusStep};
pub use types::{Cluster, Granularity};
