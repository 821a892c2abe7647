use super::{GeoBounds, LatLng, PixelPoint, ProjectionError, Viewport};
use std::f64::consts::PI;

/// Adapter over the base map that owns projection math.
///
/// The engine asks it for the current viewport once per pass and projects
/// visible points through it; it never computes projections itself.
pub trait Projector {
    /// Geographic coordinate -> pixel on the current rendering surface
    fn project(&self, at: LatLng) -> Result<PixelPoint, ProjectionError>;

    /// Current visible bounds and zoom level
    fn viewport(&self) -> Result<Viewport, ProjectionError>;
}

/// Web Mercator latitude limit
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Vector tile size used by the base map
pub const TILE_SIZE: f64 = 512.0;

/// Web Mercator projector for a fixed-size container.
///
/// Pixels are relative to the container's top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMercatorProjector {
    center: LatLng,
    zoom: f64,
    width: f64,
    height: f64,
}

impl WebMercatorProjector {
    pub fn new(center: LatLng, zoom: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            zoom,
            width,
            height,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan_to(&mut self, center: LatLng) {
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }

    pub fn fly_to(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = zoom;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    fn to_world(&self, at: LatLng) -> PixelPoint {
        let size = self.world_size();
        let lat = at.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
        let sin = lat.to_radians().sin();

        PixelPoint::new(
            (at.lng + 180.0) / 360.0 * size,
            (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size,
        )
    }

    fn from_world(&self, p: PixelPoint) -> LatLng {
        let size = self.world_size();
        let lng = p.x / size * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * p.y / size)).sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    /// Pixel on the container -> coordinate
    pub fn unproject(&self, p: PixelPoint) -> LatLng {
        let origin = self.to_world(self.center);
        self.from_world(PixelPoint::new(
            p.x - self.width / 2.0 + origin.x,
            p.y - self.height / 2.0 + origin.y,
        ))
    }

    fn check_mounted(&self) -> Result<(), ProjectionError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(ProjectionError::ZeroSizeContainer {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn wrap_longitude(lng: f64) -> f64 {
    if lng < -180.0 {
        lng + 360.0
    } else if lng > 180.0 {
        lng - 360.0
    } else {
        lng
    }
}

impl Projector for WebMercatorProjector {
    fn project(&self, at: LatLng) -> Result<PixelPoint, ProjectionError> {
        self.check_mounted()?;

        let origin = self.to_world(self.center);
        let world = self.to_world(at);

        // Use the world copy nearest the centre so the antimeridian is seamless
        let size = self.world_size();
        let mut dx = world.x - origin.x;
        if dx > size / 2.0 {
            dx -= size;
        } else if dx < -size / 2.0 {
            dx += size;
        }

        let p = PixelPoint::new(
            dx + self.width / 2.0,
            world.y - origin.y + self.height / 2.0,
        );

        if !p.is_finite() {
            return Err(ProjectionError::NonFinite {
                lat: at.lat,
                lng: at.lng,
            });
        }
        Ok(p)
    }

    fn viewport(&self) -> Result<Viewport, ProjectionError> {
        self.check_mounted()?;

        let north_west = self.unproject(PixelPoint::new(0.0, 0.0));
        let south_east = self.unproject(PixelPoint::new(self.width, self.height));

        let (west, east) = if south_east.lng - north_west.lng >= 360.0 {
            (-180.0, 180.0)
        } else {
            (wrap_longitude(north_west.lng), wrap_longitude(south_east.lng))
        };

        let bounds = GeoBounds {
            south: south_east.lat,
            west,
            north: north_west.lat,
            east,
        };
        Ok(Viewport::new(bounds, self.zoom))
    }
}
