//! Pre-flight conflict check.
//!
//! Exit code 0 means the plan is clear, 2 means at least one conflict was
//! found, 1 means the request itself was invalid.
//!
//! Usage:
//!   cargo run -p deconflict-cli --bin deconflict -- mission --input plan.json
//!   cargo run -p deconflict-cli --bin deconflict -- fleet --input fleet.json --step 0.1
//!   cargo run -p deconflict-cli --bin deconflict -- demo

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use deconflict_cli::output::{exit_code, render, OutputFormat};
use deconflict_cli::{input, logging, scenarios, Config};
use deconflict_core::{ConflictReport, ConflictScanner, ScanPolicy};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check drone flight plans for conflicts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Common {
    /// Minimum separation in meters (overrides DECONFLICT_BUFFER_M)
    #[arg(long)]
    buffer: Option<f64>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check one waypoint mission against other drones' timestamped tracks
    Mission {
        /// JSON request file, or - for stdin
        #[arg(long)]
        input: PathBuf,

        /// Report every conflict instead of the first of each kind
        #[arg(long)]
        exhaustive: bool,

        /// Temporal tolerance in seconds (default: mission waypoint spacing)
        #[arg(long)]
        tolerance: Option<f64>,

        #[command(flatten)]
        common: Common,
    },
    /// Sweep a fleet of constant-velocity tracks for pairwise conflicts
    Fleet {
        /// JSON request file, or - for stdin
        #[arg(long)]
        input: PathBuf,

        /// Sampling step in seconds (overrides DECONFLICT_STEP_S)
        #[arg(long)]
        step: Option<f64>,

        /// Stop at the first conflict
        #[arg(long)]
        first_conflict: bool,

        /// Disable the parallel sweep
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        common: Common,
    },
    /// Run the built-in scenarios
    Demo {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env();
    logging::init(config.log_format, "deconflict=info")?;

    let code = match cli.command {
        Command::Mission {
            input: path,
            exhaustive,
            tolerance,
            common,
        } => {
            let mut rules = config.rules_with(common.buffer, None);
            rules.temporal_tolerance_s = tolerance;
            let request = input::load_mission(&path)?;
            let (primary, others) = request.to_trajectories()?;
            let policy = if exhaustive {
                ScanPolicy::Exhaustive
            } else {
                ScanPolicy::FirstConflict
            };

            tracing::info!(
                primary = %primary.id(),
                others = others.len(),
                buffer_m = rules.buffer_distance_m,
                "Scanning mission"
            );
            let started = Instant::now();
            let report = ConflictScanner::with_rules(&rules)?.scan_mission(&primary, &others, policy)?;
            log_report(&report, started);
            println!("{}", render(&report, common.format)?);
            exit_code(&report)
        }
        Command::Fleet {
            input: path,
            step,
            first_conflict,
            sequential,
            common,
        } => {
            let mut rules = config.rules_with(common.buffer, step);
            if sequential {
                rules.parallel = false;
            }
            let step = rules.time_step_s;
            let trajectories = input::load_fleet(&path)?.to_trajectories()?;
            let policy = if first_conflict {
                ScanPolicy::FirstConflict
            } else {
                ScanPolicy::Exhaustive
            };

            tracing::info!(
                trajectories = trajectories.len(),
                step_s = step,
                buffer_m = rules.buffer_distance_m,
                parallel = rules.parallel,
                "Sweeping fleet"
            );
            let started = Instant::now();
            let report = ConflictScanner::with_rules(&rules)?.scan_fleet(&trajectories, step, policy)?;
            log_report(&report, started);
            println!("{}", render(&report, common.format)?);
            exit_code(&report)
        }
        Command::Demo { format } => {
            let rules = config.rules();
            let mut worst = 0;
            for scenario in scenarios::all_scenarios() {
                println!("\n=== {} ===", scenario.name);
                println!("{}", scenario.description);
                let started = Instant::now();
                let report = scenario.run(&rules)?;
                log_report(&report, started);
                println!("{}", render(&report, format)?);
                worst = worst.max(exit_code(&report));
            }
            worst
        }
    };

    Ok(ExitCode::from(code))
}

fn log_report(report: &ConflictReport, started: Instant) {
    if report.is_clear() {
        tracing::info!(
            samples = report.samples,
            evaluations = report.evaluations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Scan clear"
        );
    } else {
        tracing::warn!(
            conflicts = report.conflicts.len(),
            samples = report.samples,
            evaluations = report.evaluations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Conflicts detected"
        );
    }
}
