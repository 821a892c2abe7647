use super::{RenderSurface, SurfaceError};
use crate::geo::LatLng;
use crate::highlight::HighlightKind;
use crate::reconcile::{Marker, MarkerKey, MarkerKind};
use std::collections::HashMap;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

/// What the surface currently displays for one marker
#[derive(Debug, Clone, PartialEq)]
pub struct LiveMarker {
    pub key: MarkerKey,
    pub kind: MarkerKind,
    pub position: LatLng,
    pub highlight: HighlightKind,
    pub stacking_order: u8,
    pub has_payload: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub created: usize,
    pub removed: usize,
    pub recolored: usize,
}

/// In-memory surface that keeps the markers it was told to draw.
///
/// Backs headless runs and tests; every operation is traced.
#[derive(Debug)]
pub struct RecordingSurface {
    next_handle: u64,
    live: HashMap<MarkerHandle, LiveMarker>,
    mounted: bool,
    stats: SurfaceStats,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            next_handle: 0,
            live: HashMap::new(),
            mounted: true,
            stats: SurfaceStats::default(),
        }
    }

    /// An unmounted surface refuses new markers
    pub fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    pub fn stats(&self) -> SurfaceStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SurfaceStats::default();
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn live_markers(&self) -> impl Iterator<Item = &LiveMarker> {
        self.live.values()
    }

    pub fn find(&self, key: &str) -> Option<&LiveMarker> {
        self.live.values().find(|m| m.key.as_str() == key)
    }

    /// Keys currently drawn, sorted
    pub fn keys(&self) -> Vec<MarkerKey> {
        let mut keys: Vec<MarkerKey> = self.live.values().map(|m| m.key.clone()).collect();
        keys.sort();
        keys
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> RenderSurface<P> for RecordingSurface {
    type Handle = MarkerHandle;

    fn create_marker(&mut self, marker: &Marker, payload: Option<&P>) -> Result<MarkerHandle, SurfaceError> {
        if !self.mounted {
            return Err(SurfaceError::NotMounted);
        }

        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;

        trace!(key = %marker.key, kind = ?marker.kind, highlight = ?marker.highlight, "create marker");
        self.live.insert(
            handle,
            LiveMarker {
                key: marker.key.clone(),
                kind: marker.kind,
                position: marker.position,
                highlight: marker.highlight,
                stacking_order: marker.highlight.stacking_order(),
                has_payload: payload.is_some(),
            },
        );
        self.stats.created += 1;
        Ok(handle)
    }

    fn recolor_marker(&mut self, handle: &MarkerHandle, highlight: HighlightKind) {
        if let Some(live) = self.live.get_mut(handle) {
            trace!(key = %live.key, from = ?live.highlight, to = ?highlight, "recolor marker");
            live.highlight = highlight;
            live.stacking_order = highlight.stacking_order();
            self.stats.recolored += 1;
        }
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        if let Some(live) = self.live.remove(&handle) {
            trace!(key = %live.key, "remove marker");
            self.stats.removed += 1;
        }
    }
}
