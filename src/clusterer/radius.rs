use crate::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Lower bound applied to every radius the policy hands out
pub const MIN_RADIUS_PX: f64 = 1.0;

/// From `min_zoom` upward (until the next step), merge within `radius_px`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusStep {
    pub min_zoom: f64,
    pub radius_px: f64,
}

/// Step function zoom -> clustering pixel radius.
///
/// Steps are ordered by `min_zoom`; the radius never grows as zoom grows.
/// Zooms below the first step (and NaN) use `fallback_radius_px`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusPolicy {
    pub steps: Vec<RadiusStep>,
    pub fallback_radius_px: f64,
}

impl RadiusPolicy {
    pub fn new(steps: Vec<RadiusStep>, fallback_radius_px: f64) -> Self {
        Self {
            steps,
            fallback_radius_px,
        }
    }

    /// Same radius at every zoom
    pub fn constant(radius_px: f64) -> Self {
        Self::new(Vec::new(), radius_px)
    }

    /// `max(40, 100 - 4 * zoom)` sampled at integer zooms
    pub fn search_map() -> Self {
        let steps = (0..=15)
            .map(|z| RadiusStep {
                min_zoom: z as f64,
                radius_px: (100.0 - 4.0 * z as f64).max(40.0),
            })
            .collect();
        Self::new(steps, 100.0)
    }

    pub fn radius_for(&self, zoom: f64) -> f64 {
        let radius = self
            .steps
            .iter()
            .take_while(|step| step.min_zoom <= zoom)
            .last()
            .map(|step| step.radius_px)
            .unwrap_or(self.fallback_radius_px);

        if radius.is_nan() {
            return MIN_RADIUS_PX;
        }
        radius.max(MIN_RADIUS_PX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |r: f64| r.is_finite() && r > 0.0;

        if !positive(self.fallback_radius_px) {
            return Err(ConfigError::NonPositiveRadius(self.fallback_radius_px));
        }

        let mut previous_zoom = f64::NEG_INFINITY;
        let mut previous_radius = self.fallback_radius_px;
        for step in &self.steps {
            if !positive(step.radius_px) {
                return Err(ConfigError::NonPositiveRadius(step.radius_px));
            }
            if !step.min_zoom.is_finite() || step.min_zoom <= previous_zoom {
                return Err(ConfigError::UnorderedRadiusSteps(step.min_zoom));
            }
            if step.radius_px > previous_radius {
                return Err(ConfigError::IncreasingRadius {
                    zoom: step.min_zoom,
                    radius: step.radius_px,
                });
            }
            previous_zoom = step.min_zoom;
            previous_radius = step.radius_px;
        }

        Ok(())
    }
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self::search_map()
    }
}
