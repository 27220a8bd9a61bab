//! corridor — drive two vehicles through a signalised corridor and print
//! what the query facade reports about them.
//!
//! Usage: `corridor [config.json]`.  The optional file holds a `SimConfig`
//! in JSON; missing fields take their defaults.  Set `RUST_LOG=lt_sim=debug`
//! to see every relocation and stop.

mod network;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lt_core::SimConfig;
use lt_sim::stops::flags;
use lt_sim::{SimBuilder, Simulation, StopRequest};
use lt_vehicle::NoopReminder;

use network::build_network;

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn report(sim: &Simulation<NoopReminder>, vehicle: &str) -> Result<()> {
    let lane = sim.lane_id(vehicle)?.unwrap_or_else(|| "-".into());
    let pos = sim.lane_position(vehicle)?.unwrap_or(f64::NAN);
    let odometer = sim.distance(vehicle)?;
    let to_end = sim.driving_distance(vehicle, "E1", 150.0)?;
    let xy = sim.position(vehicle)?;
    info!(vehicle, %lane, pos, ?xy, ?odometer, ?to_end, "position");

    for signal in sim.next_tls(vehicle)? {
        info!(
            vehicle,
            tls = %signal.tls_id,
            index = signal.link_index,
            distance = signal.distance,
            state = %signal.state,
            "signal ahead"
        );
    }
    for lanes in sim.best_lanes(vehicle)? {
        info!(
            vehicle,
            lane = %lanes.lane_id,
            offset = lanes.best_lane_offset,
            continues = lanes.allows_continuation,
            continuation = ?lanes.continuation,
            "best lanes"
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("corridor=info".parse()?))
        .init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    info!(?config, "configuration");

    let network = build_network()?;
    info!(
        edges = network.edge_count(),
        lanes = network.lane_count(),
        links = network.link_count(),
        "network built"
    );

    let mut sim = SimBuilder::new(network, NoopReminder).config(config).build()?;

    sim.add_vehicle("bus", "main", &["W1", "C1", "E1"], 20.0)?;
    sim.add_vehicle("car", "main", &["W1", "C1", "E1"], 0.0)?;
    sim.insert_vehicle("bus")?;
    sim.set_stop("bus", StopRequest::new("market", 0.0).flags(flags::BUS_STOP).duration_ms(30_000))?;
    info!(stops = ?sim.stops("bus")?, "bus stops");
    report(&sim, "bus")?;

    // Jump the bus past the first junction, then switch the second light.
    sim.move_to("bus", "C1_0", 60.0)?;
    sim.set_tls_state("B", "G")?;
    report(&sim, "bus")?;

    // The car departs by relocation straight onto the last edge.
    sim.move_to("car", "E1_0", 10.0)?;
    report(&sim, "car")?;
    let to_point = sim.driving_distance_2d("bus", 500.0, 1.0)?;
    info!(?to_point, "bus to (500, 1)");

    if let Err(e) = sim.move_to("car", "W1_0", 0.0) {
        info!(error = %e, "relocation refused as expected");
    }

    sim.step();
    info!(clock = %sim.clock, vehicles = ?sim.vehicle_ids(), "done");
    Ok(())
}
