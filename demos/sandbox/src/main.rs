//! sandbox — a five-ship fleet flying against the in-process simulator.
//!
//! One ship works a procurement contract, a miner and hauler share an
//! extraction mission, a probe keeps market data fresh, and a trader runs
//! the best cached route.  Ctrl-C stops early.
//!
//! `RUST_LOG=st_agent=debug` shows every pass.

mod world;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use st_agent::{
    ContractMission, ExtractionMission, MarketReconMission, Mission, Role, TradeMission,
};
use st_cache::{InMemoryCache, load_waypoints_csv};
use st_core::{FleetConfig, SystemSymbol};
use st_fleet::FleetBuilder;

use world::{COMMAND, CONTRACT, FIELD, HAULER, MINER, PROBE, SYSTEM, TRADER, build_world};

#[derive(Parser)]
#[command(name = "sandbox")]
#[command(about = "Run a simulated fleet for a fixed wall-clock time")]
struct Cli {
    /// Seconds to run before shutting down
    #[arg(short, long, default_value_t = 30)]
    seconds: u64,

    /// Fleet configuration as JSON; defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated flight seconds per unit of distance
    #[arg(long, default_value_t = 0.05)]
    travel: f64,

    /// Simulated cooldown after extract or survey, in seconds
    #[arg(long, default_value_t = 2)]
    cooldown: u32,

    /// Extra waypoints (CSV: symbol,type,x,y,traits) added to the world
    #[arg(short, long)]
    waypoints: Option<PathBuf>,
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => FleetConfig::from_file(path)?,
        None => FleetConfig::default(),
    };

    // ── Fleet ─────────────────────────────────────────────────────────────────
    let mut world = build_world(cli.travel, cli.cooldown);
    if let Some(path) = &cli.waypoints {
        let extra = load_waypoints_csv(path)?;
        info!(count = extra.len(), path = %path.display(), "extra waypoints loaded");
        for wp in extra {
            world = world.with_waypoint(wp);
        }
    }
    let sim = Arc::new(world);
    let cache = Arc::new(InMemoryCache::new());
    let mut fleet = FleetBuilder::new(sim.clone(), cache.clone(), config)
        .bootstrap()
        .await?
        .build()?;

    // ── Missions ──────────────────────────────────────────────────────────────
    let services = fleet.services().clone();
    let open = fleet.contracts().iter().find(|c| !c.fulfilled).cloned();

    let contract: Arc<dyn Mission> = Arc::new(ContractMission::new(services.clone(), open));
    let extraction: Arc<dyn Mission> = Arc::new(ExtractionMission::new(services.clone(), FIELD));
    let trade: Arc<dyn Mission> = Arc::new(TradeMission::new(services.clone()));
    let recon: Arc<dyn Mission> =
        Arc::new(MarketReconMission::for_system(services, &SystemSymbol::from(SYSTEM))?);

    fleet.assign(&contract, Role::Transporter, COMMAND)?;
    fleet.assign(&extraction, Role::Excavator, MINER)?;
    fleet.assign(&extraction, Role::Hauler, HAULER)?;
    fleet.assign(&recon, Role::Satellite, PROBE)?;
    fleet.assign(&trade, Role::Trader, TRADER)?;

    // ── Run ───────────────────────────────────────────────────────────────────
    let ships = fleet.ships();
    fleet.start();
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(cli.seconds)) => {}
        _ = tokio::signal::ctrl_c() => info!("interrupted"),
    }
    fleet.shutdown().await?;

    // ── Summary ───────────────────────────────────────────────────────────────
    println!("\n{:<8} {:<10} {:<18} {:>9} {:>7}", "ship", "role", "at", "fuel", "cargo");
    for ship in &ships {
        let s = ship.snapshot();
        let role = ship
            .mission()
            .and_then(|m| m.roster().role_of(ship.symbol()))
            .map_or("-", |r| r.as_str());
        println!(
            "{:<8} {:<10} {:<18} {:>4}/{:<4} {:>3}/{:<3}",
            s.symbol.to_string(),
            role,
            s.nav.waypoint_symbol.to_string(),
            s.fuel.current,
            s.fuel.capacity,
            s.cargo.units,
            s.cargo.capacity,
        );
    }

    if let Some(c) = sim.contract(CONTRACT) {
        let delivered: u32 = c.terms.deliver.iter().map(|d| d.units_fulfilled).sum();
        let required: u32 = c.terms.deliver.iter().map(|d| d.units_required).sum();
        println!(
            "\ncontract {}: accepted={} fulfilled={} delivered {delivered}/{required}",
            c.id, c.accepted, c.fulfilled,
        );
    }
    println!(
        "markets cached: {}  remote calls: {}",
        cache.market_count(),
        sim.calls().len(),
    );
    Ok(())
}
