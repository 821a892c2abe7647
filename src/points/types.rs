use crate::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Stable identifier of a listing on the map
pub type PointId = String;

/// One listing marker candidate.
///
/// `payload` is the caller's listing record; the engine only hands it back
/// to the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point<P = ()> {
    pub id: PointId,
    pub lat: f64,
    pub lng: f64,
    pub payload: P,
}

impl<P> Point<P> {
    pub fn new(id: impl Into<PointId>, lat: f64, lng: f64, payload: P) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            payload,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

impl Point<()> {
    pub fn bare(id: impl Into<PointId>, lat: f64, lng: f64) -> Self {
        Self::new(id, lat, lng, ())
    }
}
