use super::{EventOutcome, PassError, PassOutcome, PassReport};
use crate::clusterer::{Cluster, Granularity, cluster, singletons};
use crate::config::{ClickMode, ConfigError, EngineConfig};
use crate::geo::{Projector, Viewport, haversine_miles};
use crate::highlight::{Focus, PointStyle, classify};
use crate::points::{Point, PointId, PointSet};
use crate::reconcile::{Marker, MarkerKey, MarkerLayer, MarkerLayout, reconcile};
use crate::router::{Dispatch, EventRouter, MapAction, MapEvent, Rerun};
use crate::store::{InteractionStore, VisibleListingsStore};
use crate::surface::RenderSurface;
use crate::visibility::{VisibilityPublisher, VisibleListings, visible_ids, visible_points};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Layout results reused by passes that only recolor
#[derive(Debug, Clone)]
struct Layout {
    viewport: Viewport,
    granularity: Granularity,
    visible_ids: Vec<PointId>,
    clusters: Vec<Cluster>,
}

/// Clustering and viewport-sync engine behind one map surface.
///
/// Everything runs synchronously on the caller's event loop. Each pass reads
/// the current points, viewport and interaction snapshot, and either applies
/// its full marker diff plus visible-listing update, or changes nothing.
pub struct MapEngine<P, J, S>
where
    J: Projector,
    S: RenderSurface<P>,
{
    config: EngineConfig,
    projector: J,
    surface: S,
    points: PointSet<P>,
    layer: MarkerLayer<S::Handle>,
    router: EventRouter,
    publisher: VisibilityPublisher,
    visible: VisibleListingsStore,
    interaction: InteractionStore,
    layout: Option<Layout>,
}

impl<P, J, S> MapEngine<P, J, S>
where
    J: Projector,
    S: RenderSurface<P>,
{
    pub fn new(config: EngineConfig, projector: J, surface: S) -> Result<Self, ConfigError> {
        Self::with_stores(
            config,
            projector,
            surface,
            InteractionStore::default(),
            VisibleListingsStore::default(),
        )
    }

    /// Build an engine sharing stores the caller already owns
    pub fn with_stores(
        config: EngineConfig,
        projector: J,
        surface: S,
        interaction: InteractionStore,
        visible: VisibleListingsStore,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            router: EventRouter::new(config.debounce_window()),
            config,
            projector,
            surface,
            points: PointSet::empty(),
            layer: MarkerLayer::new(),
            publisher: VisibilityPublisher::new(),
            visible,
            interaction,
            layout: None,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn projector(&self) -> &J {
        &self.projector
    }

    /// The base map moves through this; follow up with a pan or zoom event
    pub fn projector_mut(&mut self) -> &mut J {
        &mut self.projector
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn points(&self) -> &PointSet<P> {
        &self.points
    }

    pub fn markers(&self) -> &HashMap<MarkerKey, Marker> {
        self.layer.rendered()
    }

    /// Store the results list filters itself by
    pub fn visible_listings(&self) -> VisibleListingsStore {
        self.visible.clone()
    }

    /// Store holding likes, dislikes, applications and focus
    pub fn interaction(&self) -> InteractionStore {
        self.interaction.clone()
    }

    pub fn has_pending_pass(&self) -> bool {
        self.router.has_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.router.deadline()
    }

    /// Replace the listing collection
    pub fn set_points(&mut self, points: Vec<Point<P>>, at: Instant) -> EventOutcome {
        self.points = PointSet::with_key_delimiter(points, &self.config.key_delimiter);
        self.layout = None;
        self.dispatch(MapEvent::PointsChanged, at)
    }

    pub fn dispatch(&mut self, event: MapEvent, at: Instant) -> EventOutcome {
        let dispatch = self.router.route(&event, at);
        if dispatch == Dispatch::Ignored {
            return EventOutcome::ignored();
        }

        if event.is_user_navigation() {
            self.publisher.mark_interacted();
        }

        let mut actions = Vec::new();
        let extra = match &event {
            MapEvent::MarkerClicked(key) => self.on_marker_click(key, &mut actions),
            MapEvent::BackgroundClicked => self.on_background_click(&mut actions),
            MapEvent::VariantChanged(variant) => {
                self.config.apply_variant(*variant);
                Rerun::highlight_only()
            }
            _ => Rerun::highlight_only(),
        };

        let pass = match dispatch {
            Dispatch::Now(rerun) => Some(self.recompute(rerun.union(extra))),
            Dispatch::Deferred | Dispatch::Ignored => None,
        };

        EventOutcome {
            dispatch,
            actions,
            pass,
        }
    }

    /// Run the debounced pass once its window has elapsed
    pub fn tick(&mut self, now: Instant) -> Option<PassOutcome> {
        let rerun = self.router.poll(now)?;
        Some(self.recompute(rerun))
    }

    /// Run the debounced pass without waiting
    pub fn flush(&mut self) -> Option<PassOutcome> {
        let rerun = self.router.flush()?;
        Some(self.recompute(rerun))
    }

    /// Run one pass now
    pub fn recompute(&mut self, rerun: Rerun) -> PassOutcome {
        let rerun = if self.layout.is_none() {
            rerun.union(Rerun {
                visibility: true,
                clustering: true,
                publish: false,
            })
        } else {
            rerun
        };

        match self.run_pass(rerun) {
            Ok(report) => {
                debug!(
                    zoom = report.zoom,
                    visible = report.visible,
                    clusters = report.clusters,
                    created = report.created,
                    removed = report.removed,
                    recolored = report.recolored,
                    published = report.published,
                    "map pass applied"
                );
                PassOutcome::Applied(report)
            }
            Err(err) => {
                warn!(error = %err, "map pass skipped, keeping previous markers");
                PassOutcome::Skipped(err)
            }
        }
    }

    /// Take every marker off the surface
    pub fn unmount(&mut self) {
        info!(markers = self.layer.len(), "unmounting map markers");
        self.layer.clear::<P, S>(&mut self.surface);
        self.layout = None;
    }

    fn compute_layout(&self) -> Result<Layout, PassError> {
        let viewport = self.projector.viewport()?;
        let visible = visible_points(self.points.iter(), &viewport.bounds);
        let granularity = self.config.granularity(viewport.zoom);

        let clusters = match granularity {
            Granularity::Clustered { pixel_radius } => {
                cluster(&visible, pixel_radius, |at| self.projector.project(at))?
            }
            Granularity::Individual => singletons(&visible),
        };

        Ok(Layout {
            viewport,
            granularity,
            visible_ids: visible_ids(&visible),
            clusters,
        })
    }

    fn run_pass(&mut self, rerun: Rerun) -> Result<PassReport, PassError> {
        let layout = match &self.layout {
            Some(layout) if !rerun.visibility && !rerun.clustering => layout.clone(),
            _ => self.compute_layout()?,
        };

        let point_style = PointStyle::for_visible_count(
            layout.visible_ids.len(),
            self.config.simple_marker_threshold,
        );
        let marker_layout = MarkerLayout {
            point_style,
            delimiter: &self.config.key_delimiter,
        };

        let snapshot = self.interaction.get();
        let commands = reconcile(
            self.layer.rendered(),
            layout.clusters.clone(),
            &marker_layout,
            |ids| classify(ids, &snapshot),
        );
        let (created, removed, recolored) = (
            commands.to_create.len(),
            commands.to_remove.len(),
            commands.to_recolor.len(),
        );

        let points = &self.points;
        self.layer.apply(commands, &mut self.surface, |marker| {
            marker
                .point_id()
                .and_then(|id| points.get(id))
                .map(|p| &p.payload)
        })?;

        let published = rerun.publish && self.publish(&layout.visible_ids);

        let report = PassReport {
            zoom: layout.viewport.zoom,
            granularity: layout.granularity,
            point_style,
            visible: layout.visible_ids.len(),
            clusters: layout.clusters.len(),
            markers: self.layer.len(),
            created,
            removed,
            recolored,
            published,
        };
        self.layout = Some(layout);
        Ok(report)
    }

    /// Write the visible ids unless pinned or unchanged
    fn publish(&mut self, ids: &[PointId]) -> bool {
        match self.publisher.decide(ids) {
            Some(next) => self.write_visible(next),
            None => false,
        }
    }

    fn write_visible(&mut self, next: VisibleListings) -> bool {
        if self.visible.with(|current| *current == next) {
            return false;
        }
        self.visible.replace(next);
        true
    }

    fn on_marker_click(&mut self, key: &MarkerKey, actions: &mut Vec<MapAction>) -> Rerun {
        let Some(marker) = self.layer.get(key).cloned() else {
            debug!(%key, "click on a marker that is no longer rendered");
            return Rerun::highlight_only();
        };

        if marker.is_cluster() {
            self.interaction.update(|state| state.select_cluster(&marker.member_ids));
            self.publisher.unpin();
            self.write_visible(VisibleListings::Only(marker.member_ids.clone()));

            let current_zoom = match &self.layout {
                Some(layout) => Some(layout.viewport.zoom),
                None => self.projector.viewport().ok().map(|v| v.zoom),
            };
            if let Some(zoom) = current_zoom {
                actions.push(MapAction::FlyTo {
                    center: marker.position,
                    zoom: self.config.cluster_click_zoom(zoom),
                });
            }
            return Rerun::highlight_only();
        }

        let Some(id) = marker.point_id().map(str::to_string) else {
            return Rerun::highlight_only();
        };
        let was_selected = self.interaction.with(|state| state.is_selected(&id));

        if was_selected {
            self.interaction.update(|state| state.clear_focus());
        } else {
            self.interaction.update(|state| {
                state.selected_cluster = None;
                state.select(id.clone());
            });
        }

        match self.config.click_mode {
            ClickMode::FilterList if was_selected => {
                self.publisher.unpin();
                Rerun::highlight_only().with_publish()
            }
            ClickMode::FilterList => {
                let pinned = self.publisher.pin(id);
                self.write_visible(pinned);
                Rerun::highlight_only()
            }
            ClickMode::OpenDetail if was_selected => {
                actions.push(MapAction::CloseDetail);
                Rerun::highlight_only()
            }
            ClickMode::OpenDetail => {
                let distance_miles = self
                    .config
                    .search_center
                    .map(|center| haversine_miles(center, marker.position));
                actions.push(MapAction::OpenDetail { id, distance_miles });
                Rerun::highlight_only()
            }
        }
    }

    fn on_background_click(&mut self, actions: &mut Vec<MapAction>) -> Rerun {
        let had_selection = self
            .interaction
            .with(|state| matches!(state.focus, Some(Focus::Selected(_))));

        self.interaction.update(|state| {
            if had_selection {
                state.clear_focus();
            }
            state.selected_cluster = None;
        });

        if had_selection && self.config.click_mode == ClickMode::OpenDetail {
            actions.push(MapAction::CloseDetail);
        }

        self.publisher.unpin();
        Rerun::highlight_only().with_publish()
    }
}
