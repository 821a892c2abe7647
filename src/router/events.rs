use crate::config::MapVariant;
use crate::geo::LatLng;
use crate::points::PointId;
use crate::reconcile::MarkerKey;

/// Something that happened on or around the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map finished its first layout
    Loaded,
    PanEnded,
    ZoomEnded,
    MarkerClicked(MarkerKey),
    /// Click on the map itself, not on a marker
    BackgroundClicked,
    /// The caller replaced the interaction snapshot (like, dislike, hover)
    InteractionChanged,
    /// The caller replaced the listing collection
    PointsChanged,
    /// Switched between desktop, fullscreen and mobile presentation
    VariantChanged(MapVariant),
}

impl MapEvent {
    /// Viewport events arrive in bursts and are coalesced
    pub fn is_debounced(&self) -> bool {
        self.is_user_navigation()
    }

    /// The user moved the map themselves
    pub fn is_user_navigation(&self) -> bool {
        matches!(self, MapEvent::PanEnded | MapEvent::ZoomEnded)
    }
}

/// Which stages of a pass must run. Classification and reconciliation
/// always run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rerun {
    pub visibility: bool,
    pub clustering: bool,
    /// Push the visible ids to the results list
    pub publish: bool,
}

impl Rerun {
    pub fn full() -> Self {
        Self {
            visibility: true,
            clustering: true,
            publish: true,
        }
    }

    pub fn highlight_only() -> Self {
        Self::default()
    }

    pub fn with_publish(mut self) -> Self {
        self.publish = true;
        self
    }

    pub fn union(self, other: Rerun) -> Self {
        Self {
            visibility: self.visibility || other.visibility,
            clustering: self.clustering || other.clustering,
            publish: self.publish || other.publish,
        }
    }

    pub fn for_event(event: &MapEvent) -> Self {
        match event {
            MapEvent::Loaded
            | MapEvent::PanEnded
            | MapEvent::ZoomEnded
            | MapEvent::PointsChanged
            | MapEvent::VariantChanged(_) => Self::full(),
            MapEvent::InteractionChanged
            | MapEvent::MarkerClicked(_)
            | MapEvent::BackgroundClicked => Self::highlight_only(),
        }
    }
}

/// Side effect the caller should perform after an event
#[derive(Debug, Clone, PartialEq)]
pub enum MapAction {
    /// Animate the map to `center` at `zoom`
    FlyTo { center: LatLng, zoom: f64 },
    /// Show the detail card for a listing
    OpenDetail {
        id: PointId,
        distance_miles: Option<f64>,
    },
    CloseDetail,
}
