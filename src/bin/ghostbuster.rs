//! Ghostbuster CLI - Batch simulation and scripted replay of the ghost hunt
//!
//! Logs go to stderr and are filtered by `RUST_LOG`; `-v` raises the
//! default level to debug.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ghostbuster")]
#[command(version, about = "Hidden-ghost search game engine", long_about = None)]
struct Cli {
    /// Log engine decisions at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play many games with an automated seeker
    Simulate(ghostbuster::cli::commands::simulate::SimulateArgs),

    /// Replay a scripted sequence of inquiries
    Replay(ghostbuster::cli::commands::replay::ReplayArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "ghostbuster=debug" } else { "ghostbuster=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate(args) => ghostbuster::cli::commands::simulate::execute(args),
        Commands::Replay(args) => ghostbuster::cli::commands::replay::execute(args),
    }
}
