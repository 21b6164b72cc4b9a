mod commands;
mod export;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "npstructs",
    about = "Locate laser-induced nanoparticle structures in microscopy movies"
)]
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
    /// Show movie / image sequence metadata
    Info(commands::info::InfoArgs),
    /// Locate structures in every frame and export the table
    Locate(commands::locate::LocateArgs),
    /// Find the frame at which the shutter opens
    StartFrame(commands::start_frame::StartFrameArgs),
    /// Print or save the default configuration as TOML
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
        Commands::Locate(args) => commands::locate::run(args),
        Commands::StartFrame(args) => commands::start_frame::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
