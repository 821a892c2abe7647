use super::*;
use crate::geo::{LatLng, PixelPoint, ProjectionError};
use crate::points::Point;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, HashSet};

/// Treat lng as x and lat as y so tests can think in pixels
fn screen(at: LatLng) -> Result<PixelPoint, ProjectionError> {
    Ok(PixelPoint::new(at.lng, at.lat))
}

fn px(id: &str, x: f64, y: f64) -> Point {
    Point::bare(id, y, x)
}

fn refs(points: &[Point]) -> Vec<&Point> {
    points.iter().collect()
}

fn partition(clusters: &[Cluster]) -> BTreeSet<Vec<String>> {
    clusters.iter().map(|c| c.member_ids.clone()).collect()
}

fn random_points(seed: u64, n: usize, extent: f64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            px(
                &format!("p{:03}", i),
                rng.random_range(0.0..extent),
                rng.random_range(0.0..extent),
            )
        })
        .collect()
}

/// Connected components of the "closer than radius" graph, by brute force
fn brute_force(points: &[Point], radius: f64) -> BTreeSet<Vec<String>> {
    let n = points.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut Vec<usize>, i: usize) -> usize {
        let mut root = i;
        while parent[root] != root {
            root = parent[root];
        }
        parent[i] = root;
        root
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let a = PixelPoint::new(points[i].lng, points[i].lat);
            let b = PixelPoint::new(points[j].lng, points[j].lat);
            if a.distance(&b) < radius {
                let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                parent[ri] = rj;
            }
        }
    }

    let mut groups: std::collections::BTreeMap<usize, Vec<String>> = Default::default();
    for i in 0..n {
        let root = find(&mut parent, i);
        groups.entry(root).or_default().push(points[i].id.clone());
    }
    groups
        .into_values()
        .map(|mut ids| {
            ids.sort();
            ids
        })
        .collect()
}

#[test]
fn test_chain_merges_through_middle_point() {
    let points = vec![px("p1", 0.0, 0.0), px("p2", 30.0, 0.0), px("p3", 60.0, 0.0)];
    let clusters = cluster(&refs(&points), 40.0, screen).unwrap();

    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].member_ids, vec!["p1", "p2", "p3"]);
}

#[test]
fn test_small_radius_keeps_points_apart() {
    let points = vec![px("p1", 0.0, 0.0), px("p2", 30.0, 0.0), px("p3", 60.0, 0.0)];
    let clusters = cluster(&refs(&points), 25.0, screen).unwrap();

    assert_eq!(clusters.len(), 3);
    assert!(clusters.iter().all(|c| c.is_single()));
}

#[test]
fn test_distance_equal_to_radius_does_not_merge() {
    let points = vec![px("a", 0.0, 0.0), px("b", 40.0, 0.0)];
    let clusters = cluster(&refs(&points), 40.0, screen).unwrap();
    assert_eq!(clusters.len(), 2);
}

#[test]
fn test_neighbour_across_cell_boundary_merges() {
    // Same distance, different cells
    let points = vec![px("a", 39.0, 39.0), px("b", 41.0, 41.0)];
    let clusters = cluster(&refs(&points), 40.0, screen).unwrap();
    assert_eq!(clusters.len(), 1);
}

#[test]
fn test_centroid_is_member_mean() {
    let points = vec![px("a", 0.0, 0.0), px("b", 10.0, 0.0), px("c", 2.0, 6.0)];
    let clusters = cluster(&refs(&points), 40.0, screen).unwrap();

    assert_eq!(clusters.len(), 1);
    assert!((clusters[0].centroid.lng - 4.0).abs() < 1e-12);
    assert!((clusters[0].centroid.lat - 2.0).abs() < 1e-12);
}

#[test]
fn test_compute_centroid_empty() {
    assert!(compute_centroid(Vec::new()).is_none());
}

#[test]
fn test_empty_input() {
    let clusters = cluster::<(), _, _>(&[], 40.0, screen).unwrap();
    assert!(clusters.is_empty());
}

#[test]
fn test_non_positive_radius_merges_nothing() {
    let points = vec![px("a", 0.0, 0.0), px("b", 0.0, 0.0)];
    assert_eq!(cluster(&refs(&points), 0.0, screen).unwrap().len(), 2);
    assert_eq!(cluster(&refs(&points), f64::NAN, screen).unwrap().len(), 2);
}

#[test]
fn test_projection_failure_aborts() {
    let points = vec![px("a", 0.0, 0.0)];
    let result = cluster(&refs(&points), 40.0, |_| {
        Err::<PixelPoint, _>(ProjectionError::NotMounted)
    });
    assert_eq!(result.unwrap_err(), ProjectionError::NotMounted);
}

#[test]
fn test_partition_is_complete() {
    let points = random_points(7, 300, 800.0);
    let clusters = cluster(&refs(&points), 35.0, screen).unwrap();

    let mut seen = HashSet::new();
    for c in &clusters {
        assert!(!c.is_empty());
        for id in &c.member_ids {
            assert!(seen.insert(id.clone()), "{} appears twice", id);
        }
    }
    assert_eq!(seen.len(), points.len());
}

#[test]
fn test_matches_brute_force_components() {
    for seed in 0..5 {
        let points = random_points(seed, 150, 600.0);
        let clusters = cluster(&refs(&points), 45.0, screen).unwrap();
        assert_eq!(partition(&clusters), brute_force(&points, 45.0));
    }
}

#[test]
fn test_larger_radius_never_splits() {
    let points = random_points(11, 200, 700.0);
    let small = cluster(&refs(&points), 20.0, screen).unwrap();
    let large = cluster(&refs(&points), 50.0, screen).unwrap();

    for inner in &small {
        let holder = large
            .iter()
            .find(|outer| outer.member_ids.contains(&inner.member_ids[0]))
            .unwrap();
        for id in &inner.member_ids {
            assert!(holder.member_ids.contains(id));
        }
    }
    assert!(large.len() <= small.len());
}

#[test]
fn test_order_independent() {
    let points = random_points(3, 250, 700.0);
    let baseline = partition(&cluster(&refs(&points), 40.0, screen).unwrap());

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..5 {
        let mut shuffled = refs(&points);
        shuffled.shuffle(&mut rng);
        let clusters = cluster(&shuffled, 40.0, screen).unwrap();
        assert_eq!(partition(&clusters), baseline);
    }
}

#[test]
fn test_singletons() {
    let points = vec![px("a", 0.0, 0.0), px("b", 0.0, 0.0)];
    let clusters = singletons(&refs(&points));
    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].centroid, points[0].position());
}

#[test]
fn test_granularity() {
    assert!(Granularity::Clustered { pixel_radius: 40.0 }.is_clustered());
    assert!(!Granularity::Individual.is_clustered());
}
