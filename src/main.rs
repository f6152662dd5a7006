//! FloorFlow entry point
//!
//! Runs the ratatui dashboard by default, or a fixed-length headless
//! session with `--headless` (summary on stdout, JSON with
//! `--summary-json`).

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use floorflow::core::config::SimulationConfig;
use floorflow::core::error::Result;
use floorflow::simulation::scheduler::{Scheduler, SpeedMultiplier};
use floorflow::simulation::tick::SimulationEvent;
use floorflow::ui::app;
use floorflow::world::order::TaskStatus;
use floorflow::world::WorldSeed;

#[derive(Parser)]
#[command(name = "floorflow", about = "Discrete-event warehouse floor simulator")]
struct Cli {
    /// Run without the dashboard for a fixed number of ticks
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Override the configured RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Initial clock speed multiplier (1, 2 or 5)
    #[arg(long, default_value_t = 1)]
    speed: u8,

    /// Simulation config TOML file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Floor layout TOML file (defaults to the built-in demo floor)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Emit the headless summary as JSON
    #[arg(long)]
    summary_json: bool,
}

#[derive(Debug, Serialize)]
struct WorkerSummary {
    name: String,
    role: &'static str,
    status: String,
    battery: f32,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    ticks_run: u64,
    shift_time: String,
    orders_total: usize,
    orders_completed: usize,
    orders_injected: usize,
    qa_failures: usize,
    bottleneck_alerts: usize,
    workers: Vec<WorkerSummary>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.rng_seed = seed;
    }

    let layout = match &cli.layout {
        Some(path) => WorldSeed::load(path)?,
        None => WorldSeed::default_layout(),
    };

    let mut scheduler = Scheduler::with_seed(config, layout)?;
    scheduler.set_speed(SpeedMultiplier::try_from(cli.speed)?);

    if cli.headless {
        // The dashboard owns the terminal, so the subscriber is only
        // installed for headless runs
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .init();
        tracing::info!(ticks = cli.ticks, "starting headless FloorFlow session");
        run_headless(scheduler, cli.ticks, cli.summary_json)
    } else {
        app::run(scheduler)
    }
}

fn run_headless(mut scheduler: Scheduler, ticks: u64, as_json: bool) -> Result<()> {
    let mut orders_injected = 0usize;
    let mut qa_failures = 0usize;

    for _ in 0..ticks {
        for event in scheduler.tick() {
            match event {
                SimulationEvent::OrderInjected { .. } => orders_injected += 1,
                SimulationEvent::QualityChecked { outcome, .. }
                    if outcome == floorflow::world::order::QualityCheck::Fail =>
                {
                    qa_failures += 1
                }
                _ => {}
            }
        }
    }

    let state = scheduler.state();
    let summary = RunSummary {
        ticks_run: ticks,
        shift_time: state.world.shift.time_label(),
        orders_total: state.world.orders().len(),
        orders_completed: state
            .world
            .orders()
            .iter()
            .filter(|o| o.status == TaskStatus::Completed)
            .count(),
        orders_injected,
        qa_failures,
        bottleneck_alerts: state.alerts.len(),
        workers: state
            .world
            .workers
            .iter()
            .map(|w| WorkerSummary {
                name: w.name.clone(),
                role: w.role.label(),
                status: format!("{:?}", w.status),
                battery: w.battery,
            })
            .collect(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} ticks ({}): {}/{} orders completed, {} injected, {} QA failures, {} alerts",
            summary.ticks_run,
            summary.shift_time,
            summary.orders_completed,
            summary.orders_total,
            summary.orders_injected,
            summary.qa_failures,
            summary.bottleneck_alerts,
        );
        for worker in &summary.workers {
            println!(
                "  {:<24} {:<24} {:<9} battery {:>3.0}%",
                worker.name, worker.role, worker.status, worker.battery
            );
        }
    }
    Ok(())
}
