use super::ConfigError;
use crate::clusterer::{Granularity, RadiusPolicy};
use crate::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// What a click on a single listing marker does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickMode {
    /// Pin the results list to the clicked listing
    FilterList,
    /// Open a detail card for the clicked listing
    OpenDetail,
}

/// Surfaces that share the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapVariant {
    Desktop,
    Fullscreen,
    Mobile,
}

impl MapVariant {
    pub fn simple_marker_threshold(self) -> usize {
        match self {
            MapVariant::Fullscreen => 60,
            MapVariant::Desktop | MapVariant::Mobile => 30,
        }
    }

    pub fn click_mode(self) -> ClickMode {
        match self {
            MapVariant::Desktop => ClickMode::FilterList,
            MapVariant::Fullscreen | MapVariant::Mobile => ClickMode::OpenDetail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Zoom -> merge radius in pixels
    pub radius_policy: RadiusPolicy,
    /// At or above this zoom every point renders on its own
    pub cluster_max_zoom: f64,
    pub max_zoom: f64,
    /// Zoom increment applied when a cluster marker is clicked
    pub cluster_click_zoom_step: f64,
    /// Above this many visible points, point markers switch to compact pins
    pub simple_marker_threshold: usize,
    pub debounce_window_ms: u64,
    /// Joins member ids in cluster marker keys
    pub key_delimiter: String,
    pub click_mode: ClickMode,
    /// Search origin used to annotate opened listings with a distance
    pub search_center: Option<LatLng>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_variant(MapVariant::Desktop)
    }
}

impl EngineConfig {
    pub fn for_variant(variant: MapVariant) -> Self {
        Self {
            radius_policy: RadiusPolicy::search_map(),
            cluster_max_zoom: 17.0,
            max_zoom: 22.0,
            cluster_click_zoom_step: 2.0,
            simple_marker_threshold: variant.simple_marker_threshold(),
            debounce_window_ms: 100,
            key_delimiter: ",".to_string(),
            click_mode: variant.click_mode(),
            search_center: None,
        }
    }

    /// Switch variant-specific behaviour, keeping tuning values
    pub fn apply_variant(&mut self, variant: MapVariant) {
        self.simple_marker_threshold = variant.simple_marker_threshold();
        self.click_mode = variant.click_mode();
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.radius_policy.validate()?;

        if !self.cluster_max_zoom.is_finite() {
            return Err(ConfigError::Invalid {
                field: "cluster_max_zoom",
                reason: "must be finite".to_string(),
            });
        }
        if !(self.max_zoom.is_finite() && self.max_zoom > 0.0) {
            return Err(ConfigError::Invalid {
                field: "max_zoom",
                reason: format!("must be positive, got {}", self.max_zoom),
            });
        }
        if !(self.cluster_click_zoom_step.is_finite() && self.cluster_click_zoom_step >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "cluster_click_zoom_step",
                reason: format!("must be non-negative, got {}", self.cluster_click_zoom_step),
            });
        }
        if self.debounce_window_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "debounce_window_ms",
                reason: "must be at least 1 ms".to_string(),
            });
        }
        if self.key_delimiter.is_empty() {
            return Err(ConfigError::Invalid {
                field: "key_delimiter",
                reason: "must not be empty".to_string(),
            });
        }
        if let Some(center) = self.search_center {
            if !center.is_valid() {
                return Err(ConfigError::Invalid {
                    field: "search_center",
                    reason: format!("({}, {}) is not a coordinate", center.lat, center.lng),
                });
            }
        }

        Ok(())
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }

    pub fn granularity(&self, zoom: f64) -> Granularity {
        if zoom < self.cluster_max_zoom {
            Granularity::Clustered {
                pixel_radius: self.radius_policy.radius_for(zoom),
            }
        } else {
            Granularity::Individual
        }
    }

    /// Zoom to fly to after clicking a cluster at `current`
    pub fn cluster_click_zoom(&self, current: f64) -> f64 {
        (current + self.cluster_click_zoom_step).min(self.max_zoom)
    }
}
