mod diff;
mod key;
mod layer;
mod types;


pub use diff::{plan_markers, reconcile};
pub use key::MarkerKey;
pub use layer::MarkerLayer;
pub use types::{Marker, MarkerCommands, MarkerKind, MarkerLayout, Recolor};
