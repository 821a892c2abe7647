use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use mapsync::{
    EngineConfig, EventOutcome, LatLng, MapAction, MapEngine, MapEvent, MapVariant, PassOutcome,
    Point, RecordingSurface, WebMercatorProjector,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const CITY_CENTER: LatLng = LatLng {
    lat: 40.7128,
    lng: -74.0060,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    Desktop,
    Fullscreen,
    Mobile,
}

impl From<Variant> for MapVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Desktop => MapVariant::Desktop,
            Variant::Fullscreen => MapVariant::Fullscreen,
            Variant::Mobile => MapVariant::Mobile,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "mapsync", about = "Replay a map search session through the clustering engine")]
struct Cli {
    /// JSON array of listings ({"id", "lat", "lng", "price"}); synthetic if omitted
    #[arg(long)]
    listings: Option<PathBuf>,

    /// Engine configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map presentation; overrides the config file's click mode and marker threshold
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Number of synthetic listings
    #[arg(long, default_value_t = 400)]
    count: usize,

    /// Seed for synthetic listings
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Deserialize)]
struct ListingRecord {
    id: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    price: Option<u32>,
}

/// Monthly rent shown in price bubbles
type Rent = Option<u32>;

type DemoEngine = MapEngine<Rent, WebMercatorProjector, RecordingSurface>;

fn load_listings(path: &Path) -> Result<Vec<Point<Rent>>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read listings from {}", path.display()))?;
    let records: Vec<ListingRecord> =
        serde_json::from_str(&json).context("Listings file is not a JSON array of listings")?;

    Ok(records
        .into_iter()
        .map(|r| Point::new(r.id, r.lat, r.lng, r.price))
        .collect())
}

/// A few dense neighbourhoods plus scattered listings around the city centre
fn synthetic_city(count: usize, seed: u64) -> Vec<Point<Rent>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let hubs: Vec<LatLng> = (0..6)
        .map(|_| {
            LatLng::new(
                CITY_CENTER.lat + rng.random_range(-0.04..0.04),
                CITY_CENTER.lng + rng.random_range(-0.05..0.05),
            )
        })
        .collect();

    (0..count)
        .map(|i| {
            let (lat, lng) = if i % 4 == 0 {
                (
                    CITY_CENTER.lat + rng.random_range(-0.08..0.08),
                    CITY_CENTER.lng + rng.random_range(-0.1..0.1),
                )
            } else {
                let hub = hubs[i % hubs.len()];
                (
                    hub.lat + rng.random_range(-0.004..0.004),
                    hub.lng + rng.random_range(-0.005..0.005),
                )
            };
            let rent = Some(rng.random_range(1_200..4_800));
            Point::new(format!("listing-{i:04}"), lat, lng, rent)
        })
        .collect()
}

fn print_pass(pass: Option<&PassOutcome>) {
    match pass {
        Some(PassOutcome::Applied(report)) => println!(
            "  zoom {:.1}, {} visible, {} markers ({:?}) | +{} -{} ~{} | published: {}",
            report.zoom,
            report.visible,
            report.markers,
            report.point_style,
            report.created,
            report.removed,
            report.recolored,
            report.published
        ),
        Some(PassOutcome::Skipped(err)) => println!("  ✗ pass skipped: {}", err),
        None => println!("  (pass deferred)"),
    }
}

fn print_actions(outcome: &EventOutcome) {
    for action in &outcome.actions {
        match action {
            MapAction::FlyTo { center, zoom } => println!(
                "  → fly to ({:.4}, {:.4}) at zoom {:.1}",
                center.lat, center.lng, zoom
            ),
            MapAction::OpenDetail { id, distance_miles } => match distance_miles {
                Some(miles) => println!("  → open {} ({:.2} mi from search centre)", id, miles),
                None => println!("  → open {}", id),
            },
            MapAction::CloseDetail => println!("  → close detail"),
        }
    }
}

/// A config file wins unless a variant was asked for explicitly
fn resolve_config(from_file: Option<EngineConfig>, variant: Option<MapVariant>) -> EngineConfig {
    let mut config = match from_file {
        Some(config) => config,
        None => EngineConfig::for_variant(variant.unwrap_or(MapVariant::Desktop)),
    };
    if let Some(variant) = variant {
        config.apply_variant(variant);
    }
    if config.search_center.is_none() {
        config.search_center = Some(CITY_CENTER);
    }
    config
}

/// Advance the simulated clock past the debounce window and run the pass
fn settle(engine: &mut DemoEngine, now: &mut Instant) -> Option<PassOutcome> {
    *now += engine.config().debounce_window() + Duration::from_millis(1);
    engine.tick(*now)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = Cli::parse();
    let start_time = Instant::now();
    println!("=== mapsync: Clustered Listing Map Session ===\n");

    // Step 1: Configuration and listings
    let step1_start = Instant::now();
    println!("Step 1: Loading configuration and listings...");
    let from_file = match &args.config {
        Some(path) => Some(
            EngineConfig::from_path(path)
                .with_context(|| format!("Invalid engine config {}", path.display()))?,
        ),
        None => None,
    };
    let config = resolve_config(from_file, args.variant.map(MapVariant::from));

    let listings = match &args.listings {
        Some(path) => load_listings(path)?,
        None => synthetic_city(args.count, args.seed),
    };
    println!(
        "✓ {} listings, {:?} clicks [{:.2}s]\n",
        listings.len(),
        config.click_mode,
        step1_start.elapsed().as_secs_f64()
    );

    // Step 2: First layout
    let step2_start = Instant::now();
    println!("Step 2: Mounting map...");
    let projector = WebMercatorProjector::new(CITY_CENTER, 12.0, 1024.0, 768.0);
    let mut engine: DemoEngine = MapEngine::new(config, projector, RecordingSurface::new())
        .context("Engine configuration rejected")?;

    let mut now = Instant::now();
    let outcome = engine.set_points(listings, now);
    let report = engine.points().report();
    if report.dropped() > 0 {
        println!(
            "  dropped {} duplicate and {} invalid listings",
            report.duplicate_ids, report.invalid_coordinates
        );
    }
    print_pass(outcome.pass.as_ref());
    now += Duration::from_millis(5);
    print_pass(engine.dispatch(MapEvent::Loaded, now).pass.as_ref());
    println!("\n✓ Map mounted [{:.2}s]\n", step2_start.elapsed().as_secs_f64());

    // Step 3: Pan and zoom burst
    let step3_start = Instant::now();
    println!("Step 3: Panning and zooming...");
    for offset in [0.004, 0.008, 0.012] {
        engine
            .projector_mut()
            .pan_to(LatLng::new(CITY_CENTER.lat + offset, CITY_CENTER.lng - offset));
        now += Duration::from_millis(20);
        engine.dispatch(MapEvent::PanEnded, now);
    }
    print_pass(settle(&mut engine, &mut now).as_ref());

    engine.projector_mut().set_zoom(14.0);
    now += Duration::from_millis(20);
    engine.dispatch(MapEvent::ZoomEnded, now);
    print_pass(settle(&mut engine, &mut now).as_ref());
    println!("\n✓ Viewport settled [{:.2}s]\n", step3_start.elapsed().as_secs_f64());

    // Step 4: Likes and hover from the results list
    let step4_start = Instant::now();
    println!("Step 4: Reacting to list interactions...");
    let visible = engine.visible_listings().get();
    let shown: Vec<String> = visible.ids().map(|ids| ids.to_vec()).unwrap_or_default();
    if let Some(first) = shown.first() {
        engine.interaction().update(|state| state.like(first.as_str()));
    }
    if let Some(last) = shown.last() {
        engine.interaction().update(|state| state.hover(last.as_str()));
    }
    now += Duration::from_millis(10);
    print_pass(engine.dispatch(MapEvent::InteractionChanged, now).pass.as_ref());
    println!("\n✓ Highlights updated [{:.2}s]\n", step4_start.elapsed().as_secs_f64());

    // Step 5: Click the largest cluster and follow its fly-to
    let step5_start = Instant::now();
    println!("Step 5: Clicking the largest cluster...");
    let largest = engine
        .markers()
        .values()
        .filter(|m| m.is_cluster())
        .max_by_key(|m| m.member_ids.len())
        .map(|m| (m.key.clone(), m.member_ids.len()));

    match largest {
        Some((key, members)) => {
            println!("  cluster of {} listings", members);
            now += Duration::from_millis(10);
            let outcome = engine.dispatch(MapEvent::MarkerClicked(key), now);
            print_actions(&outcome);
            print_pass(outcome.pass.as_ref());

            let fly_to = outcome.actions.iter().find_map(|action| match action {
                MapAction::FlyTo { center, zoom } => Some((*center, *zoom)),
                _ => None,
            });
            if let Some((center, zoom)) = fly_to {
                engine.projector_mut().fly_to(center, zoom);
                now += Duration::from_millis(10);
                engine.dispatch(MapEvent::ZoomEnded, now);
                print_pass(settle(&mut engine, &mut now).as_ref());
            }
        }
        None => println!("  no clusters at this zoom"),
    }
    println!("\n✓ Cluster explored [{:.2}s]\n", step5_start.elapsed().as_secs_f64());

    // Step 6: Select a single listing, then click the map background
    let step6_start = Instant::now();
    println!("Step 6: Selecting a listing...");
    let single = engine
        .markers()
        .values()
        .filter(|m| !m.is_cluster())
        .map(|m| m.key.clone())
        .min();

    if let Some(key) = single {
        now += Duration::from_millis(10);
        let outcome = engine.dispatch(MapEvent::MarkerClicked(key), now);
        print_actions(&outcome);
        print_pass(outcome.pass.as_ref());
        println!("  results list: {:?}", engine.visible_listings().get().ids().map(|ids| ids.len()));
    }

    now += Duration::from_millis(10);
    let outcome = engine.dispatch(MapEvent::BackgroundClicked, now);
    print_actions(&outcome);
    print_pass(outcome.pass.as_ref());
    println!("\n✓ Selection cleared [{:.2}s]\n", step6_start.elapsed().as_secs_f64());

    // Step 7: Street level
    let step7_start = Instant::now();
    println!("Step 7: Zooming to street level...");
    let street_zoom = engine.config().cluster_max_zoom;
    engine.projector_mut().set_zoom(street_zoom);
    now += Duration::from_millis(10);
    engine.dispatch(MapEvent::ZoomEnded, now);
    print_pass(settle(&mut engine, &mut now).as_ref());
    println!("\n✓ Clustering off [{:.2}s]\n", step7_start.elapsed().as_secs_f64());

    // Statistics
    let stats = engine.surface().stats();
    println!("=== Session Statistics ===");
    println!("Listings:             {}", engine.points().len());
    println!("Markers on map:       {}", engine.markers().len());
    println!("Markers created:      {}", stats.created);
    println!("Markers removed:      {}", stats.removed);
    println!("Markers recolored:    {}", stats.recolored);

    engine.unmount();
    println!(
        "\n✓ Session complete [{:.2}s]",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
