mod classify;
mod state;
mod style;


pub use classify::classify;
pub use state::{Focus, InteractionState};
pub use style::{HighlightKind, PointStyle};
