//! Dilemma CLI - command-line interface
//!
//! Commands:
//! - game: play a single match between two strategies
//! - tournament: round-robin over the full catalog
//! - evolve: multi-generation population dynamics

use clap::{Parser, Subcommand};

mod evolve_cmd;
mod game_cmd;
mod tournament_cmd;
mod util;

#[derive(Parser)]
#[command(name = "dilemma")]
#[command(about = "Iterated Prisoner's Dilemma engine")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single match
    Game(game_cmd::GameArgs),
    /// Run a round-robin tournament over the catalog
    Tournament(tournament_cmd::TournamentArgs),
    /// Run evolutionary population dynamics
    Evolve(evolve_cmd::EvolveArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Game(args) => game_cmd::run(args, cli.seed),
        Commands::Tournament(args) => tournament_cmd::run(args, cli.seed),
        Commands::Evolve(args) => evolve_cmd::run(args, cli.seed),
    }
}
