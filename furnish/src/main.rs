//! Generate a board, print it and report the shortest race from the first cell to the last.

use std::num::NonZero;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ladderboard::{Board, GeneratorConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Furnish a climb-and-slide board
#[derive(Parser, Debug)]
#[command(name = "furnish", version, about, long_about = None)]
struct Cli {
    /// Number of rows
    #[arg(long, default_value = "10")]
    rows: NonZero<usize>,

    /// Number of columns
    #[arg(long, default_value = "10")]
    columns: NonZero<usize>,

    /// Seed for a reproducible board; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Generator configuration (TOML)
    #[arg(long, default_value = "furnish.toml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut config = GeneratorConfig::load_or_default(&cli.config)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let mut board = Board::new(cli.rows, cli.columns);
    let distance = board.furnish(&config, &mut config.rng())?;
    info!(climbs = board.climbs().len(), slides = board.slides().len(), "board furnished");

    print!("{}", board);
    for connector in board.connectors() {
        println!("{} {} -> {}", connector.kind(), connector.start(), connector.end());
    }
    match distance {
        Some(moves) => println!("shortest race: {} moves", moves),
        None => println!("shortest race: no path"),
    }

    Ok(())
}
