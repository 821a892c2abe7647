#![allow(dead_code)]

use mapsync::{
    EngineConfig, GeoBounds, LatLng, MapEngine, PixelPoint, Point, ProjectionError, Projector,
    RadiusPolicy, RecordingSurface, Viewport,
};
use std::time::{Duration, Instant};

/// Equirectangular projector: `10 * 2^zoom` pixels per degree on both axes
#[derive(Debug, Clone)]
pub struct LinearProjector {
    pub center: LatLng,
    pub zoom: f64,
    pub width: f64,
    pub height: f64,
}

impl LinearProjector {
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            width: 1000.0,
            height: 800.0,
        }
    }

    pub fn pixels_per_degree(&self) -> f64 {
        10.0 * 2f64.powf(self.zoom)
    }
}

impl Projector for LinearProjector {
    fn project(&self, at: LatLng) -> Result<PixelPoint, ProjectionError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ProjectionError::NotMounted);
        }
        let scale = self.pixels_per_degree();
        Ok(PixelPoint::new(
            (at.lng - self.center.lng) * scale + self.width / 2.0,
            (self.center.lat - at.lat) * scale + self.height / 2.0,
        ))
    }

    fn viewport(&self) -> Result<Viewport, ProjectionError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ProjectionError::NotMounted);
        }
        let scale = self.pixels_per_degree();
        let half_w = self.width / 2.0 / scale;
        let half_h = self.height / 2.0 / scale;
        let bounds = GeoBounds::new(
            LatLng::new(self.center.lat - half_h, self.center.lng - half_w),
            LatLng::new(self.center.lat + half_h, self.center.lng + half_w),
        );
        Ok(Viewport::new(bounds, self.zoom))
    }
}

pub type Engine = MapEngine<(), LinearProjector, RecordingSurface>;

pub const ORIGIN: LatLng = LatLng {
    lat: 10.0,
    lng: 20.0,
};

/// Fixed 40 px radius so distances are easy to reason about
pub fn config() -> EngineConfig {
    EngineConfig {
        radius_policy: RadiusPolicy::constant(40.0),
        ..EngineConfig::default()
    }
}

/// At zoom 10, with 10240 px per degree:
/// "p1" and "p2" are ~20 px apart, "p3" ~102 px and "p4" ~410 px east of the origin
pub fn neighbourhood() -> Vec<Point> {
    vec![
        Point::bare("p1", 10.0, 20.000),
        Point::bare("p2", 10.0, 20.002),
        Point::bare("p3", 10.0, 20.010),
        Point::bare("p4", 10.0, 20.040),
    ]
}

pub fn mounted(config: EngineConfig, points: Vec<Point>) -> (Engine, Instant) {
    let projector = LinearProjector::new(ORIGIN, 10.0);
    let mut engine = MapEngine::new(config, projector, RecordingSurface::new()).unwrap();
    let t0 = Instant::now();
    engine.set_points(points, t0);
    (engine, t0)
}

pub fn after(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

pub fn keys(engine: &Engine) -> Vec<String> {
    engine
        .surface()
        .keys()
        .into_iter()
        .map(|k| k.as_str().to_string())
        .collect()
}
