//! Headless pickup simulator.
//!
//! Loads content, lets one agent pull every catalog item toward itself and
//! prints the resulting world events frame by frame.
//!
//! ```bash
//! # Built-in content, text output
//! cargo run -p pickup-sim
//!
//! # Content from disk, JSON lines
//! cargo run -p pickup-sim -- --data-dir crates/pickup/content/data --json
//! ```

mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pickup_content::ContentFactory;

use scenario::{Scenario, ScenarioOptions};

/// Runs a scripted pickup scenario and prints world events
#[derive(Parser)]
#[command(name = "pickup-sim")]
#[command(about = "Headless item pickup simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding config.toml, curves.ron and items.ron
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file (overrides --data-dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Curve asset file (overrides --data-dir)
    #[arg(long, value_name = "FILE")]
    curves: Option<PathBuf>,

    /// Item catalog file (overrides --data-dir)
    #[arg(long, value_name = "FILE")]
    items: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 180)]
    frames: u32,

    /// Frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Frames between two pickup requests
    #[arg(long, default_value_t = 10)]
    stagger: u32,

    /// Agent turn rate in degrees per second while items are in flight
    #[arg(long, default_value_t = 0.0)]
    turn_rate: f32,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let factory = match &cli.data_dir {
        Some(dir) => ContentFactory::from_data_dir(dir),
        None => ContentFactory::new(),
    }
    .with_config(cli.config)
    .with_curves(cli.curves)
    .with_items(cli.items);

    let config = factory.load_config()?;
    let curves = factory.load_curves()?;
    let items = factory.load_items()?;
    tracing::info!(
        config = ?factory.config_path(),
        curves = ?factory.curves_path(),
        items = items.len(),
        "content loaded"
    );

    let options = ScenarioOptions {
        frames: cli.frames,
        dt: cli.dt,
        stagger: cli.stagger,
        turn_rate: cli.turn_rate,
        json: cli.json,
    };
    let mut scenario = Scenario::new(config, curves, &items)?;
    scenario.run(&options, &mut std::io::stdout().lock())
}
