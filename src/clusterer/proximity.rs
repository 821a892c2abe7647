use super::grid::SpatialGrid;
use super::types::Cluster;
use crate::geo::{LatLng, PixelPoint};
use crate::points::Point;
use std::collections::VecDeque;

/// Group points that are pixel-proximate at the current zoom.
///
/// Two points end up in the same cluster iff a chain of points links them
/// where each hop is strictly closer than `pixel_radius` on screen. Points
/// are bucketed into a grid of `pixel_radius`-sized cells so each BFS step
/// only examines its own cell and the 8 around it.
///
/// Expansion starts from points in id order, so the output is the same for
/// any input ordering. A projection error aborts the whole call. A
/// non-positive radius merges nothing.
pub fn cluster<P, E, F>(
    points: &[&Point<P>],
    pixel_radius: f64,
    mut project: F,
) -> Result<Vec<Cluster>, E>
where
    F: FnMut(LatLng) -> Result<PixelPoint, E>,
{
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let mut ordered: Vec<&Point<P>> = points.to_vec();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    // 1. Project everything up front so a failure leaves no partial result
    let pixels = ordered
        .iter()
        .map(|p| project(p.position()))
        .collect::<Result<Vec<PixelPoint>, E>>()?;

    if pixel_radius.is_nan() || pixel_radius <= 0.0 {
        return Ok(singletons(&ordered));
    }

    // 2. Bucket into radius-sized cells
    let mut grid = SpatialGrid::new(pixel_radius);
    for (i, px) in pixels.iter().enumerate() {
        grid.insert(i, *px);
    }

    // 3. Breadth-first expansion from each unvisited point
    let mut visited = vec![false; ordered.len()];
    let mut queue = VecDeque::new();
    let mut clusters = Vec::new();

    for start in 0..ordered.len() {
        if visited[start] {
            continue;
        }

        visited[start] = true;
        queue.push_back(start);
        let mut members = Vec::new();

        while let Some(current) = queue.pop_front() {
            members.push(ordered[current]);
            let here = pixels[current];

            for neighbour in grid.neighbourhood(grid.cell_of(here)) {
                if !visited[neighbour] && here.distance(&pixels[neighbour]) < pixel_radius {
                    visited[neighbour] = true;
                    queue.push_back(neighbour);
                }
            }
        }

        // 4. Members found by the BFS become one cluster
        if let Some(found) = Cluster::from_members(members) {
            clusters.push(found);
        }
    }

    Ok(clusters)
}

/// One cluster per point, used when clustering is switched off
pub fn singletons<P>(points: &[&Point<P>]) -> Vec<Cluster> {
    points.iter().map(|p| Cluster::single(*p)).collect()
}
