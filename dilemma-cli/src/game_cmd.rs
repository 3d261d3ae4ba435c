//! Game command - play one match between two strategies
//!
//! Level 1: run() - orchestration
//! Level 2: play_game(), report_results()

use anyhow::Result;
use clap::Args;

use dilemma_core::{run_game, MatchResult};

use crate::util::{action_track, parse_payoff};

/// Longest C/D track printed before truncation
const TRACK_LIMIT: usize = 72;

#[derive(Args)]
pub struct GameArgs {
    /// First strategy id (e.g. tit_for_tat)
    #[arg(long)]
    pub p1: String,

    /// Second strategy id (e.g. grim_trigger)
    #[arg(long)]
    pub p2: String,

    /// Number of rounds
    #[arg(long, default_value = "100")]
    pub rounds: u32,

    /// Trembling-hand error probability, in [0, 0.5]
    #[arg(long, default_value = "0.0")]
    pub noise: f64,

    /// Payoff matrix as T,R,P,S (defaults to 5,3,1,0)
    #[arg(long, value_name = "T,R,P,S")]
    pub payoff: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the game command
pub fn run(args: GameArgs, seed: Option<u64>) -> Result<()> {
    let result = play_game(&args, seed)?;
    report_results(&result, &args)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

fn play_game(args: &GameArgs, seed: Option<u64>) -> Result<MatchResult> {
    let payoff = args.payoff.as_deref().map(parse_payoff).transpose()?;

    tracing::info!(
        p1 = %args.p1,
        p2 = %args.p2,
        rounds = args.rounds,
        noise = args.noise,
        "starting match"
    );

    Ok(run_game(
        &args.p1,
        &args.p2,
        args.rounds,
        args.noise,
        payoff,
        seed,
    )?)
}

fn report_results(result: &MatchResult, args: &GameArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!(
        "{} vs {} ({} rounds, noise {})",
        result.player_name, result.opponent_name, result.rounds.len(), args.noise
    );
    println!("  {:<16} {}", result.player_name, truncated_track(result, true));
    println!("  {:<16} {}", result.opponent_name, truncated_track(result, false));
    println!(
        "Final score: {} {} - {} {}",
        result.player_name, result.player_score, result.opponent_score, result.opponent_name
    );
    Ok(())
}

// ============================================================================
// Level 3 - Formatting
// ============================================================================

fn truncated_track(result: &MatchResult, first_player: bool) -> String {
    let track = action_track(&result.rounds, first_player);
    if track.len() > TRACK_LIMIT {
        format!("{}… ({} rounds)", &track[..TRACK_LIMIT], track.len())
    } else {
        track
    }
}
