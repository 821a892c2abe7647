use serde::{Deserialize, Serialize};

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the valid degree ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Position on the rendering surface, in screen pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Geographic bounding box.
///
/// `west > east` describes a box crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south: south_west.lat,
            west: south_west.lng,
            north: north_east.lat,
            east: north_east.lng,
        }
    }

    /// A box that is not finite, is inverted in latitude, or has zero area.
    ///
    /// Map surfaces report this before their first layout.
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.south, self.west, self.north, self.east]
            .iter()
            .all(|v| v.is_finite());

        !finite || self.south >= self.north || self.west == self.east
    }

    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Closed-interval containment on both axes
    pub fn contains(&self, at: LatLng) -> bool {
        if at.lat < self.south || at.lat > self.north {
            return false;
        }

        if self.crosses_antimeridian() {
            at.lng >= self.west || at.lng <= self.east
        } else {
            at.lng >= self.west && at.lng <= self.east
        }
    }

    pub fn center(&self) -> LatLng {
        let lat = (self.south + self.north) / 2.0;
        let lng = if self.crosses_antimeridian() {
            let mid = (self.west + self.east + 360.0) / 2.0;
            if mid > 180.0 { mid - 360.0 } else { mid }
        } else {
            (self.west + self.east) / 2.0
        };

        LatLng::new(lat, lng)
    }
}

/// What the map currently shows: bounds plus zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub bounds: GeoBounds,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(bounds: GeoBounds, zoom: f64) -> Self {
        Self { bounds, zoom }
    }
}
