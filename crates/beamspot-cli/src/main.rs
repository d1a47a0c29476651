mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beamspot", about = "Beam spot image inspection tool")]
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
    /// Show raster dimensions and intensity range
    Info(commands::info::InfoArgs),
    /// Sample an intensity profile along a line
    Profile(commands::profile::ProfileArgs),
    /// Compare expected and measured spot positions for a dataset key
    Spots(commands::spots::SpotsArgs),
    /// Drive an inspection session from a JSON list of host events
    Replay(commands::replay::ReplayArgs),
    /// Print or save the default inspector config
    Config(commands::config::ConfigArgs),
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
        Commands::Info(args) => commands::info::run(args),
        Commands::Profile(args) => commands::profile::run(args),
        Commands::Spots(args) => commands::spots::run(args),
        Commands::Replay(args) => commands::replay::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
