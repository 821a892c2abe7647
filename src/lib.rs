// Public API exports
pub mod clusterer;
pub mod config;
pub mod engine;
pub mod geo;
pub mod highlight;
pub mod points;
pub mod reconcile;
pub mod router;
pub mod store;
pub mod surface;
pub mod visibility;

// Re-export main types for convenience
pub use engine::{EventOutcome, MapEngine, PassError, PassOutcome, PassReport};

pub use config::{ClickMode, ConfigError, EngineConfig, MapVariant};

pub use geo::{
    GeoBounds, LatLng, PixelPoint, ProjectionError, Projector, Viewport, WebMercatorProjector,
    haversine_miles,
};

pub use points::{Point, PointId, PointSet, SanitizeReport};

pub use clusterer::{Cluster, Granularity, RadiusPolicy, RadiusStep, cluster};

pub use highlight::{Focus, HighlightKind, InteractionState, PointStyle, classify};

pub use reconcile::{Marker, MarkerCommands, MarkerKey, MarkerKind, MarkerLayer, reconcile};

pub use surface::{RecordingSurface, RenderSurface, SurfaceError};

pub use router::{MapAction, MapEvent};

pub use store::{InteractionStore, SharedStore, VisibleListingsStore};

pub use visibility::VisibleListings;
