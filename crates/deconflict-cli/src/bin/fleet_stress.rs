//! Fleet sweep stress run.
//!
//! Generates a seeded random fleet of constant-velocity drones, sweeps it
//! sequentially and in parallel, and checks both sweeps agree.

use anyhow::{bail, Result};
use clap::Parser;
use deconflict_cli::{logging, Config};
use deconflict_core::{ConflictScanner, ScanPolicy, ScanRules, SpatialPoint, Trajectory};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

/// Airspace half-width in meters.
const AREA_M: f64 = 500.0;
const MAX_SPEED_MPS: f64 = 15.0;
const MAX_CLIMB_MPS: f64 = 2.0;

#[derive(Parser, Debug)]
#[command(author, version, about = "Random fleet sweep benchmark")]
struct Args {
    /// Number of drones
    #[arg(long, default_value_t = 50)]
    drones: usize,

    /// Scenario length in seconds
    #[arg(long, default_value_t = 120.0)]
    horizon: f64,

    /// Sampling step in seconds
    #[arg(long, default_value_t = 0.5)]
    step: f64,

    /// Minimum separation in meters
    #[arg(long, default_value_t = 20.0)]
    buffer: f64,

    /// RNG seed
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn random_fleet(rng: &mut StdRng, drones: usize, horizon: f64) -> Result<Vec<Trajectory>> {
    (0..drones)
        .map(|i| {
            let start = rng.random_range(0.0..horizon * 0.5);
            let end = rng.random_range(start..=horizon);
            let initial = SpatialPoint::new(
                rng.random_range(-AREA_M..AREA_M),
                rng.random_range(-AREA_M..AREA_M),
                rng.random_range(30.0..120.0),
            );
            let velocity = SpatialPoint::new(
                rng.random_range(-MAX_SPEED_MPS..MAX_SPEED_MPS),
                rng.random_range(-MAX_SPEED_MPS..MAX_SPEED_MPS),
                rng.random_range(-MAX_CLIMB_MPS..MAX_CLIMB_MPS),
            );
            Ok(Trajectory::kinematic(
                format!("DRONE{:03}", i + 1),
                initial,
                velocity,
                start,
                end,
            )?)
        })
        .collect()
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::from_env();
    logging::init(config.log_format, "fleet_stress=info")?;
    if !args.horizon.is_finite() || args.horizon <= 0.0 {
        bail!("--horizon must be positive, got {}", args.horizon);
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let fleet = random_fleet(&mut rng, args.drones, args.horizon)?;
    tracing::info!(drones = fleet.len(), seed = args.seed, "Generated fleet");

    let rules = |parallel| ScanRules {
        buffer_distance_m: args.buffer,
        time_step_s: args.step,
        parallel,
        ..config.rules()
    };

    let started = Instant::now();
    let sequential = ConflictScanner::with_rules(&rules(false))?.scan_fleet(
        &fleet,
        args.step,
        ScanPolicy::Exhaustive,
    )?;
    let sequential_ms = started.elapsed().as_secs_f64() * 1000.0;

    let started = Instant::now();
    let parallel = ConflictScanner::with_rules(&rules(true))?.scan_fleet(
        &fleet,
        args.step,
        ScanPolicy::Exhaustive,
    )?;
    let parallel_ms = started.elapsed().as_secs_f64() * 1000.0;

    println!(
        "Result: {:?} | conflicts={} samples={} evaluations={}",
        parallel.status,
        parallel.conflicts.len(),
        parallel.samples,
        parallel.evaluations
    );
    println!(
        "Timing: sequential={:.1}ms parallel={:.1}ms",
        sequential_ms, parallel_ms
    );

    if sequential != parallel {
        bail!("parallel sweep diverged from sequential sweep");
    }
    println!("Determinism check: PASS");
    Ok(())
}
