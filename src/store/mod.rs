mod shared;

pub use shared::SharedStore;

use crate::highlight::InteractionState;
use crate::visibility::VisibleListings;

/// Written by the map, read by the results list
pub type VisibleListingsStore = SharedStore<VisibleListings>;

/// Written by list hover and map clicks, read by the map
pub type InteractionStore = SharedStore<InteractionState>;
