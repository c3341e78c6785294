use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use gamelad::audio::{AudioSink, Muted, TerminalBell};
use gamelad::game::{GameConfig, Session};
use gamelad::modes::HandheldMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gamelad")]
#[command(version, about = "Snake on a handheld console, in your terminal")]
struct Cli {
    /// JSON file with console settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between game ticks (overrides the config file)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Start with the power switched on
    #[arg(long)]
    power_on: bool,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The terminal belongs to the UI, so logs only go to a file
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
    }
    tracing::info!(?config, "starting console");

    let session = match cli.seed {
        Some(seed) => Session::with_seed(config, seed),
        None => Session::new(config),
    };

    let audio: Box<dyn AudioSink + Send> = if cli.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::new(std::io::stderr()))
    };

    let mut console = HandheldMode::new(session, audio);
    if cli.power_on {
        console.power_on();
    }
    console.run().await?;

    Ok(())
}
