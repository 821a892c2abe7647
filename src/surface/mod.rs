mod error;
mod recording;

pub use error::SurfaceError;
pub use recording::{LiveMarker, MarkerHandle, RecordingSurface, SurfaceStats};

use crate::highlight::HighlightKind;
use crate::reconcile::Marker;

/// The map widget markers are drawn on.
///
/// Implementations place markers, attach a click listener that reports the
/// marker's key back as `MapEvent::MarkerClicked`, and release that listener
/// when the marker is removed.
pub trait RenderSurface<P> {
    /// Opaque reference to a placed marker
    type Handle;

    /// Place a marker. `payload` is the listing record for single-point markers.
    fn create_marker(&mut self, marker: &Marker, payload: Option<&P>) -> Result<Self::Handle, SurfaceError>;

    fn recolor_marker(&mut self, handle: &Self::Handle, highlight: HighlightKind);

    fn remove_marker(&mut self, handle: Self::Handle);
}
