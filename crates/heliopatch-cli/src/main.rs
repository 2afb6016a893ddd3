mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heliopatch", about = "Solar disk rectification pipeline")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print disk orientation angles (B0, P0, L0) for a timestamp
    Orientation(commands::orientation::OrientationArgs),
    /// Compute the heliographic grid overlay for a full-disk image
    Grid(commands::grid::GridArgs),
    /// Run the full rectification pipeline on full-disk images
    Process(commands::process::ProcessArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Orientation(args) => commands::orientation::run(args),
        Commands::Grid(args) => commands::grid::run(args),
        Commands::Process(args) => commands::process::run(args),
    }
}
