//! Tournament command - round-robin over the full catalog
//!
//! Level 1: run() - orchestration
//! Level 2: execute(), report_results()

use anyhow::Result;
use clap::Args;

use dilemma_tournament::{run_tournament, TournamentConfig, TournamentResult};

use crate::util::parse_payoff;

#[derive(Args)]
pub struct TournamentArgs {
    /// Rounds per pairwise match
    #[arg(long, default_value = "100")]
    pub rounds: u32,

    /// Trembling-hand error probability, in [0, 0.5]
    #[arg(long, default_value = "0.0")]
    pub noise: f64,

    /// Payoff matrix as T,R,P,S (defaults to 5,3,1,0)
    #[arg(long, value_name = "T,R,P,S")]
    pub payoff: Option<String>,

    /// Run matches one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the tournament command
pub fn run(args: TournamentArgs, seed: Option<u64>) -> Result<()> {
    let result = execute(&args, seed)?;
    report_results(&result, &args)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

fn execute(args: &TournamentArgs, seed: Option<u64>) -> Result<TournamentResult> {
    let mut config = TournamentConfig::new(args.rounds, args.noise);
    if let Some(payoff) = args.payoff.as_deref().map(parse_payoff).transpose()? {
        config = config.with_payoff(payoff);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if args.sequential {
        config = config.sequential();
    }

    tracing::info!(rounds = args.rounds, noise = args.noise, "starting tournament");
    Ok(run_tournament(&config)?)
}

fn report_results(result: &TournamentResult, args: &TournamentArgs) -> Result<()> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({ "ranking": result.ranking() }))?
        );
        return Ok(());
    }

    println!("Tournament ranking ({} rounds per match):", args.rounds);
    for (rank, standing) in result.standings.iter().enumerate() {
        println!(
            "  {:>2}. {:<18} {:>10.1}",
            rank + 1,
            standing.name,
            standing.score
        );
    }
    Ok(())
}
