use super::PassError;
use crate::clusterer::Granularity;
use crate::highlight::PointStyle;
use crate::router::{Dispatch, MapAction};

/// Summary of one applied pass
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    pub zoom: f64,
    pub granularity: Granularity,
    pub point_style: PointStyle,
    pub visible: usize,
    pub clusters: usize,
    /// Markers on the surface after the pass
    pub markers: usize,
    pub created: usize,
    pub removed: usize,
    pub recolored: usize,
    /// Whether the visible-listings store was written
    pub published: bool,
}

impl PassReport {
    pub fn changes(&self) -> usize {
        self.created + self.removed + self.recolored
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome {
    Applied(PassReport),
    /// Nothing changed on the surface or in the stores
    Skipped(PassError),
}

impl PassOutcome {
    pub fn report(&self) -> Option<&PassReport> {
        match self {
            PassOutcome::Applied(report) => Some(report),
            PassOutcome::Skipped(_) => None,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, PassOutcome::Applied(_))
    }
}

/// Result of handing one event to the engine
#[derive(Debug, Clone, PartialEq)]
pub struct EventOutcome {
    pub dispatch: Dispatch,
    pub actions: Vec<MapAction>,
    /// Present when the event ran a pass immediately
    pub pass: Option<PassOutcome>,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self {
            dispatch: Dispatch::Ignored,
            actions: Vec::new(),
            pass: None,
        }
    }
}
