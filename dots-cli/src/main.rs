//! Dots CLI - play Dots and Boxes in the terminal
//!
//! Commands:
//! - play: interactive two-player game
//! - replay: apply a recorded move list

mod play_cmd;
mod render;
mod replay_cmd;
mod setup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use play_cmd::PlayArgs;
use replay_cmd::ReplayArgs;

#[derive(Parser)]
#[command(name = "dots")]
#[command(about = "Dots and Boxes for two players")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(PlayArgs),
    /// Replay a JSON list of edges
    Replay(ReplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the board on stdout stays readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Replay(args) => replay_cmd::run(args),
    }
}
