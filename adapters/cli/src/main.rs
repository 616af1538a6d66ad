#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Overworld headlessly.

mod config;
mod presenter;
mod script;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use overworld_rendering::dispatch;
use overworld_simulation::{overlap, Simulation};
use overworld_world::query;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    config::RunConfig,
    presenter::{LoggedAudio, TerminalPresenter},
    script::InputScript,
};

const DEFAULT_FRAMES: u64 = 600;

/// Runs the Overworld without a window, printing rooms and HUD changes.
#[derive(Parser, Debug)]
#[command(name = "overworld", version, about = "Explore the Overworld headlessly")]
struct Args {
    /// TOML file with `[simulation]` and `[world]` tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML input script made of `[[step]]` entries.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Number of frames to simulate; defaults to the script length.
    #[arg(long)]
    frames: Option<u64>,

    /// Seed overriding both configured seeds.
    #[arg(long)]
    seed: Option<u64>,
}

/// Entry point for the Overworld command-line interface.
fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        error!(error = ?err, "run_failed");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = RunConfig::load(args.config.as_deref())?;
    let script = InputScript::load(args.script.as_deref())?;
    let frames = args.frames.unwrap_or(match script.total_frames() {
        0 => DEFAULT_FRAMES,
        scripted => scripted,
    });

    let world = config.world()?;
    println!("{}", query::welcome_banner(&world));
    let mut simulation = Simulation::with_world(world, config.simulation(args.seed));

    let stdout = io::stdout();
    let mut presenter = TerminalPresenter::new(stdout.lock());
    let mut audio = LoggedAudio;
    let mut last = None;
    let mut failures = 0;

    for input in script.inputs().take(usize::try_from(frames).unwrap_or(usize::MAX)) {
        let overlaps = overlap::detect(simulation.world());
        let frame = simulation.tick(&input, &overlaps);
        failures += dispatch(&frame, &mut presenter, &mut audio);
        last = Some(frame);
    }

    if failures > 0 {
        warn!(failures, "collaborator_failures");
    }
    info!(
        frames,
        elapsed_ms = query::clock(simulation.world()).as_millis() as u64,
        room = %simulation.current_room(),
        health = simulation.health_snapshot(),
        "run_finished"
    );
    if let Some(frame) = &last {
        presenter
            .summarize(frame)
            .context("failed to print run summary")?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(io::stderr)
        .compact()
        .init();
}
