use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Rendering surface is not mounted")]
    NotMounted,

    #[error("Surface rejected marker {key}: {reason}")]
    Rejected { key: String, reason: String },
}
