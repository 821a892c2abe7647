use crate::geo::ProjectionError;
use crate::surface::SurfaceError;
use thiserror::Error;

/// Why a pass left the map as it was
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PassError {
    #[error("Projection unavailable: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Rendering surface unavailable: {0}")]
    Surface(#[from] SurfaceError),
}
