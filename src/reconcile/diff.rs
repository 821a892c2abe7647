use super::{Marker, MarkerCommands, MarkerKey, MarkerKind, MarkerLayout, Recolor};
use crate::clusterer::Cluster;
use crate::highlight::HighlightKind;
use crate::points::PointId;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Turn this pass's clusters into keyed, classified markers
pub fn plan_markers<F>(clusters: Vec<Cluster>, layout: &MarkerLayout<'_>, classify: F) -> Vec<Marker>
where
    F: Fn(&[PointId]) -> HighlightKind,
{
    let mut seen = HashSet::with_capacity(clusters.len());
    let mut markers = Vec::with_capacity(clusters.len());

    for cluster in clusters {
        if cluster.is_empty() {
            continue;
        }

        let key = MarkerKey::for_members(&cluster.member_ids, layout.delimiter);
        if !seen.insert(key.clone()) {
            warn!(%key, "two markers share a key; keeping the first");
            continue;
        }

        let kind = if cluster.is_single() {
            MarkerKind::Point(layout.point_style)
        } else {
            MarkerKind::Cluster {
                count: cluster.len(),
            }
        };

        markers.push(Marker {
            highlight: classify(&cluster.member_ids),
            key,
            kind,
            position: cluster.centroid,
            member_ids: cluster.member_ids,
        });
    }

    markers
}

/// Minimal command set moving the surface from `previous` to `clusters`.
///
/// Keys only in `previous` are removed, keys only in the new set are
/// created, and shared keys are recoloured only when their highlight
/// changed. A shared key whose marker shape changed (pin vs price bubble)
/// is removed and created again.
pub fn reconcile<F>(
    previous: &HashMap<MarkerKey, Marker>,
    clusters: Vec<Cluster>,
    layout: &MarkerLayout<'_>,
    classify: F,
) -> MarkerCommands
where
    F: Fn(&[PointId]) -> HighlightKind,
{
    let next = plan_markers(clusters, layout, classify);
    let next_keys: HashSet<MarkerKey> = next.iter().map(|m| m.key.clone()).collect();

    let mut commands = MarkerCommands::default();

    for marker in next {
        match previous.get(&marker.key) {
            None => commands.to_create.push(marker),
            Some(old) if old.kind != marker.kind => {
                commands.to_remove.push(marker.key.clone());
                commands.to_create.push(marker);
            }
            Some(old) if old.highlight != marker.highlight => {
                commands.to_recolor.push(Recolor {
                    key: marker.key,
                    from: old.highlight,
                    to: marker.highlight,
                });
            }
            Some(_) => {}
        }
    }

    commands.to_remove.extend(
        previous
            .keys()
            .filter(|key| !next_keys.contains(*key))
            .cloned(),
    );

    commands.to_remove.sort();
    commands.to_create.sort_by(|a, b| a.key.cmp(&b.key));
    commands.to_recolor.sort_by(|a, b| a.key.cmp(&b.key));
    commands
}
