mod distance;
mod error;
mod projection;
mod types;

pub use distance::{EARTH_RADIUS_MILES, haversine_miles};
pub use error::ProjectionError;
pub use projection::{Projector, TILE_SIZE, WebMercatorProjector};
pub use types::{GeoBounds, LatLng, PixelPoint, Viewport};
