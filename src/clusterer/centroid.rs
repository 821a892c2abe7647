use crate::geo::LatLng;

/// Arithmetic mean of the given coordinates.
///
/// Longitudes are averaged relative to the first position, so members on
/// both sides of the antimeridian centre near it instead of near 0°.
pub fn compute_centroid(positions: impl IntoIterator<Item = LatLng>) -> Option<LatLng> {
    let mut positions = positions.into_iter();
    let anchor = positions.next()?;

    let mut lat = anchor.lat;
    let mut offset = 0.0;
    let mut n = 1usize;

    for p in positions {
        let mut d = p.lng - anchor.lng;
        if d > 180.0 {
            d -= 360.0;
        } else if d < -180.0 {
            d += 360.0;
        }
        lat += p.lat;
        offset += d;
        n += 1;
    }

    let n = n as f64;
    let mut lng = anchor.lng + offset / n;
    if lng > 180.0 {
        lng -= 360.0;
    } else if lng < -180.0 {
        lng += 360.0;
    }
    Some(LatLng::new(lat / n, lng))
}
