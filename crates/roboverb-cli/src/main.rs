//! Roboverb CLI - render WAV files and impulse responses through the reverb.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "roboverb")]
#[command(author, version, long_about = None)]
#[command(about = "Freeverb-style stereo reverb with per-filter toggles")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a WAV file through the reverb
    Process(commands::process::ProcessArgs),

    /// Render the reverb's impulse response to a WAV file
    Impulse(commands::impulse::ImpulseArgs),

    /// List, show, export, and save presets
    Presets(commands::presets::PresetsArgs),

    /// Show filter tunings, delay lengths, and coefficient mapping
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Impulse(args) => commands::impulse::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
