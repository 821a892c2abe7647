mod filter;
mod publish;


pub use filter::{visible_ids, visible_points};
pub use publish::{VisibilityPublisher, VisibleListings};
