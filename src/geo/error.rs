use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("Map surface is not mounted")]
    NotMounted,

    #[error("Map container has no area: {width}x{height} px")]
    ZeroSizeContainer { width: f64, height: f64 },

    #[error("Projection produced a non-finite pixel for ({lat}, {lng})")]
    NonFinite { lat: f64, lng: f64 },
}
