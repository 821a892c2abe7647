use super::*;
use crate::clusterer::Granularity;
use crate::config::{ClickMode, EngineConfig, MapVariant};
use crate::geo::{LatLng, ProjectionError, WebMercatorProjector};
use crate::highlight::{Focus, HighlightKind, PointStyle};
use crate::points::Point;
use crate::reconcile::MarkerKey;
use crate::router::{Dispatch, MapAction, MapEvent};
use crate::surface::{RecordingSurface, SurfaceError};
use crate::visibility::VisibleListings;
use std::time::{Duration, Instant};

type TestEngine = MapEngine<(), WebMercatorProjector, RecordingSurface>;

const CENTER: LatLng = LatLng {
    lat: 40.7128,
    lng: -74.0060,
};

/// "a" and "b" sit ~12 px apart at zoom 12, "c" ~175 px away, "far" off screen
fn listings() -> Vec<Point> {
    vec![
        Point::bare("a", 40.7128, -74.0060),
        Point::bare("b", 40.7128, -74.0040),
        Point::bare("c", 40.7128, -73.9760),
        Point::bare("far", 41.5000, -74.0060),
    ]
}

fn engine_with(config: EngineConfig) -> (TestEngine, Instant) {
    let projector = WebMercatorProjector::new(CENTER, 12.0, 800.0, 600.0);
    let mut engine = MapEngine::new(config, projector, RecordingSurface::new()).unwrap();
    let t0 = Instant::now();
    let outcome = engine.set_points(listings(), t0);
    assert!(outcome.pass.unwrap().is_applied());
    (engine, t0)
}

fn engine() -> (TestEngine, Instant) {
    engine_with(EngineConfig::default())
}

fn ms(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

fn highlight_of(engine: &TestEngine, key: &str) -> HighlightKind {
    engine.surface().find(key).unwrap().highlight
}

fn only(ids: &[&str]) -> VisibleListings {
    VisibleListings::Only(ids.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_first_pass_draws_clusters_without_filtering() {
    let (engine, _) = engine();

    assert_eq!(
        engine.surface().keys(),
        vec![MarkerKey::for_point("a,b"), MarkerKey::for_point("c")]
    );
    assert_eq!(engine.visible_listings().get(), VisibleListings::Unfiltered);
    assert_eq!(engine.markers().len(), 2);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = EngineConfig {
        key_delimiter: String::new(),
        ..EngineConfig::default()
    };
    let projector = WebMercatorProjector::new(CENTER, 12.0, 800.0, 600.0);
    assert!(TestEngine::new(config, projector, RecordingSurface::new()).is_err());
}

#[test]
fn test_pan_is_debounced_then_publishes_visible_ids() {
    let (mut engine, t0) = engine();

    let outcome = engine.dispatch(MapEvent::PanEnded, ms(t0, 10));
    assert_eq!(outcome.dispatch, Dispatch::Deferred);
    assert!(outcome.pass.is_none());
    assert!(engine.has_pending_pass());

    assert!(engine.tick(ms(t0, 50)).is_none());

    let pass = engine.tick(ms(t0, 110)).unwrap();
    let report = pass.report().unwrap();
    assert!(report.published);
    assert_eq!(report.visible, 3);
    assert_eq!(report.changes(), 0);
    assert_eq!(engine.visible_listings().get(), only(&["a", "b", "c"]));
    assert!(!engine.has_pending_pass());
}

#[test]
fn test_burst_of_viewport_events_runs_one_pass() {
    let (mut engine, t0) = engine();

    engine.dispatch(MapEvent::PanEnded, ms(t0, 10));
    engine.dispatch(MapEvent::ZoomEnded, ms(t0, 40));
    engine.dispatch(MapEvent::PanEnded, ms(t0, 80));

    assert!(engine.tick(ms(t0, 150)).is_none());
    assert!(engine.tick(ms(t0, 180)).is_some());
    assert!(engine.tick(ms(t0, 500)).is_none());
}

#[test]
fn test_stale_event_is_ignored() {
    let (mut engine, t0) = engine();

    engine.dispatch(MapEvent::InteractionChanged, ms(t0, 200));
    let outcome = engine.dispatch(MapEvent::Loaded, ms(t0, 100));

    assert_eq!(outcome, EventOutcome::ignored());
}

#[test]
fn test_zooming_past_cluster_limit_splits_clusters() {
    let (mut engine, t0) = engine();

    engine.projector_mut().set_zoom(17.0);
    engine.dispatch(MapEvent::ZoomEnded, ms(t0, 10));
    let pass = engine.flush().unwrap();
    let report = pass.report().unwrap();

    assert_eq!(report.granularity, Granularity::Individual);
    assert_eq!(report.removed, 2);
    // "c" is off screen at zoom 17
    assert_eq!(
        engine.surface().keys(),
        vec![MarkerKey::for_point("a"), MarkerKey::for_point("b")]
    );
    assert_eq!(engine.visible_listings().get(), only(&["a", "b"]));
}

#[test]
fn test_interaction_change_only_recolors() {
    let (mut engine, t0) = engine();
    engine.surface_mut().reset_stats();

    engine.interaction().update(|state| state.like("c"));
    let outcome = engine.dispatch(MapEvent::InteractionChanged, ms(t0, 10));
    let report = outcome.pass.unwrap().report().cloned().unwrap();

    assert_eq!(report.recolored, 1);
    assert_eq!(report.created + report.removed, 0);
    assert!(!report.published);
    assert_eq!(highlight_of(&engine, "c"), HighlightKind::Liked);

    // liking a cluster member leaves the cluster alone
    engine.interaction().update(|state| state.like("a"));
    let outcome = engine.dispatch(MapEvent::InteractionChanged, ms(t0, 20));
    assert_eq!(outcome.pass.unwrap().report().unwrap().changes(), 0);
    assert_eq!(highlight_of(&engine, "a,b"), HighlightKind::Default);
}

#[test]
fn test_hovering_a_member_highlights_its_cluster() {
    let (mut engine, t0) = engine();

    engine.interaction().update(|state| state.hover("b"));
    engine.dispatch(MapEvent::InteractionChanged, ms(t0, 10));

    let live = engine.surface().find("a,b").unwrap();
    assert_eq!(live.highlight, HighlightKind::Hovered);
    assert_eq!(live.stacking_order, HighlightKind::Hovered.stacking_order());
}

#[test]
fn test_click_pins_and_unpins_results_list() {
    let (mut engine, t0) = engine();

    let outcome = engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 10));
    assert!(outcome.actions.is_empty());
    assert_eq!(engine.visible_listings().get(), only(&["c"]));
    assert_eq!(highlight_of(&engine, "c"), HighlightKind::Selected);
    assert_eq!(
        engine.interaction().get().focus,
        Some(Focus::Selected("c".to_string()))
    );

    // panning while pinned keeps the list pinned
    engine.dispatch(MapEvent::PanEnded, ms(t0, 20));
    let pass = engine.flush().unwrap();
    assert!(!pass.report().unwrap().published);
    assert_eq!(engine.visible_listings().get(), only(&["c"]));

    engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 200));
    assert_eq!(engine.interaction().get().focus, None);
    assert_eq!(highlight_of(&engine, "c"), HighlightKind::Default);
    assert_eq!(engine.visible_listings().get(), only(&["a", "b", "c"]));
}

#[test]
fn test_click_opens_detail_with_distance() {
    let config = EngineConfig {
        search_center: Some(CENTER),
        ..EngineConfig::for_variant(MapVariant::Fullscreen)
    };
    let (mut engine, t0) = engine_with(config);

    let outcome = engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 10));
    match outcome.actions.as_slice() {
        [MapAction::OpenDetail { id, distance_miles }] => {
            assert_eq!(id, "c");
            let miles = distance_miles.unwrap();
            assert!(miles > 1.0 && miles < 2.0, "got {miles}");
        }
        other => panic!("unexpected actions: {other:?}"),
    }
    assert_eq!(engine.visible_listings().get(), VisibleListings::Unfiltered);
    assert_eq!(highlight_of(&engine, "c"), HighlightKind::Selected);

    let outcome = engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 20));
    assert_eq!(outcome.actions, vec![MapAction::CloseDetail]);
}

#[test]
fn test_cluster_click_zooms_in_and_filters_to_members() {
    let config = EngineConfig {
        max_zoom: 13.0,
        ..EngineConfig::default()
    };
    let (mut engine, t0) = engine_with(config);

    let outcome = engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("a,b")), ms(t0, 10));

    match outcome.actions.as_slice() {
        [MapAction::FlyTo { center, zoom }] => {
            assert_eq!(*zoom, 13.0);
            assert!((center.lng - (-74.0050)).abs() < 1e-9);
        }
        other => panic!("unexpected actions: {other:?}"),
    }
    assert_eq!(engine.visible_listings().get(), only(&["a", "b"]));
    assert_eq!(highlight_of(&engine, "a,b"), HighlightKind::Selected);
    assert_eq!(
        engine.interaction().get().selected_cluster,
        Some(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn test_click_on_removed_marker_is_harmless() {
    let (mut engine, t0) = engine();

    let outcome = engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("gone")), ms(t0, 10));

    assert!(outcome.actions.is_empty());
    assert_eq!(outcome.pass.unwrap().report().unwrap().changes(), 0);
}

#[test]
fn test_background_click_clears_selection_and_republishes() {
    let (mut engine, t0) = engine();
    engine.dispatch(MapEvent::PanEnded, ms(t0, 5));
    engine.flush();

    engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 200));
    assert_eq!(engine.visible_listings().get(), only(&["c"]));

    let outcome = engine.dispatch(MapEvent::BackgroundClicked, ms(t0, 300));
    assert!(outcome.actions.is_empty());
    assert!(outcome.pass.unwrap().report().unwrap().published);
    assert_eq!(engine.interaction().get().focus, None);
    assert_eq!(highlight_of(&engine, "c"), HighlightKind::Default);
    assert_eq!(engine.visible_listings().get(), only(&["a", "b", "c"]));
}

#[test]
fn test_background_click_keeps_hover() {
    let (mut engine, t0) = engine();

    engine.interaction().update(|state| state.hover("c"));
    engine.dispatch(MapEvent::BackgroundClicked, ms(t0, 10));

    assert_eq!(
        engine.interaction().get().focus,
        Some(Focus::Hovered("c".to_string()))
    );
}

#[test]
fn test_projection_failure_keeps_previous_markers() {
    let (mut engine, t0) = engine();
    let before = engine.markers().clone();

    engine.projector_mut().resize(0.0, 0.0);
    engine.dispatch(MapEvent::PanEnded, ms(t0, 10));
    let pass = engine.flush().unwrap();

    assert!(matches!(
        pass,
        PassOutcome::Skipped(PassError::Projection(ProjectionError::ZeroSizeContainer { .. }))
    ));
    assert_eq!(engine.markers(), &before);
    assert_eq!(engine.surface().len(), 2);
    assert_eq!(engine.visible_listings().get(), VisibleListings::Unfiltered);

    engine.projector_mut().resize(800.0, 600.0);
    engine.dispatch(MapEvent::PanEnded, ms(t0, 20));
    assert!(engine.flush().unwrap().is_applied());
}

#[test]
fn test_unmounted_surface_skips_pass() {
    let (mut engine, t0) = engine();

    engine.surface_mut().set_mounted(false);
    engine.projector_mut().set_zoom(17.0);
    engine.dispatch(MapEvent::ZoomEnded, ms(t0, 10));
    let pass = engine.flush().unwrap();

    assert_eq!(pass, PassOutcome::Skipped(PassError::Surface(SurfaceError::NotMounted)));
    assert_eq!(
        engine.surface().keys(),
        vec![MarkerKey::for_point("a,b"), MarkerKey::for_point("c")]
    );
    assert_eq!(engine.visible_listings().get(), VisibleListings::Unfiltered);
}

#[test]
fn test_many_visible_points_use_pins() {
    let config = EngineConfig {
        simple_marker_threshold: 1,
        ..EngineConfig::default()
    };
    let (engine, _) = engine_with(config);

    assert_eq!(
        engine.surface().find("c").unwrap().kind,
        crate::reconcile::MarkerKind::Point(PointStyle::Pin)
    );
}

#[test]
fn test_variant_change_switches_click_mode() {
    let (mut engine, t0) = engine();

    let outcome = engine.dispatch(MapEvent::VariantChanged(MapVariant::Mobile), ms(t0, 10));
    assert!(outcome.pass.unwrap().is_applied());
    assert_eq!(engine.config().click_mode, ClickMode::OpenDetail);

    let outcome = engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 20));
    assert!(matches!(
        outcome.actions.as_slice(),
        [MapAction::OpenDetail { distance_miles: None, .. }]
    ));
}

#[test]
fn test_unmount_removes_every_marker() {
    let (mut engine, _) = engine();

    engine.unmount();

    assert!(engine.surface().is_empty());
    assert!(engine.markers().is_empty());
}

#[test]
fn test_shared_stores_see_engine_writes() {
    let interaction = crate::store::InteractionStore::default();
    let visible = crate::store::VisibleListingsStore::default();
    let projector = WebMercatorProjector::new(CENTER, 12.0, 800.0, 600.0);
    let mut engine: TestEngine = MapEngine::with_stores(
        EngineConfig::default(),
        projector,
        RecordingSurface::new(),
        interaction.clone(),
        visible.clone(),
    )
    .unwrap();
    let t0 = Instant::now();

    engine.set_points(listings(), t0);
    engine.dispatch(MapEvent::MarkerClicked(MarkerKey::for_point("c")), ms(t0, 10));

    assert_eq!(visible.get(), only(&["c"]));
    assert!(interaction.with(|state| state.is_selected("c")));
}

#[test]
fn test_points_replaced_with_late_stamp_are_laid_out() {
    let (mut engine, t0) = engine();
    engine.dispatch(MapEvent::InteractionChanged, ms(t0, 50));

    let outcome = engine.set_points(vec![Point::bare("z", 40.7128, -74.0060)], ms(t0, 20));
    assert!(matches!(outcome.dispatch, Dispatch::Now(_)));
    assert!(outcome.pass.unwrap().is_applied());
    assert_eq!(engine.surface().keys(), vec![MarkerKey::for_point("z")]);

    let later = engine.dispatch(MapEvent::InteractionChanged, ms(t0, 60));
    assert!(later.pass.unwrap().is_applied());
    assert_eq!(engine.surface().keys(), vec![MarkerKey::for_point("z")]);
}

#[test]
fn test_id_containing_delimiter_cannot_shadow_a_cluster() {
    let projector = WebMercatorProjector::new(CENTER, 12.0, 800.0, 600.0);
    let mut engine: TestEngine =
        MapEngine::new(EngineConfig::default(), projector, RecordingSurface::new()).unwrap();

    let mut points = listings();
    points.push(Point::bare("a,b", 40.7128, -73.9900));
    engine.set_points(points, Instant::now());

    assert!(!engine.points().contains("a,b"));
    assert_eq!(engine.points().report().reserved_ids, 1);
    assert_eq!(
        engine.surface().keys(),
        vec![MarkerKey::for_point("a,b"), MarkerKey::for_point("c")]
    );
    assert_eq!(engine.markers()[&MarkerKey::for_point("a,b")].member_ids.len(), 2);
}

#[test]
fn test_cluster_spans_the_antimeridian() {
    let projector = WebMercatorProjector::new(LatLng::new(0.0, 179.999), 12.0, 800.0, 600.0);
    let mut engine: TestEngine =
        MapEngine::new(EngineConfig::default(), projector, RecordingSurface::new()).unwrap();

    engine.set_points(
        vec![
            Point::bare("east", 0.0, 179.998),
            Point::bare("west", 0.0, -179.9995),
        ],
        Instant::now(),
    );

    assert_eq!(engine.surface().keys(), vec![MarkerKey::for_point("east,west")]);
    let position = engine.surface().find("east,west").unwrap().position;
    assert!(position.lng.abs() > 179.99, "got {}", position.lng);
}
