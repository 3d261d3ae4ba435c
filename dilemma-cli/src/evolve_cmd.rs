//! Evolve command - multi-generation population dynamics
//!
//! Level 1: run() - orchestration
//! Level 2: build_config(), execute(), report_results()

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use dilemma_evolve::{
    run_evolution_with_observer, EvolutionConfig, Generation, Population, SteadyState,
};

use crate::util::{parse_payoff, parse_populations};

#[derive(Args)]
pub struct EvolveArgs {
    /// Rounds per pairwise match
    #[arg(long, default_value = "100")]
    pub rounds: u32,

    /// Trembling-hand error probability, in [0, 0.5]
    #[arg(long, default_value = "0.0")]
    pub noise: f64,

    /// Number of generations to run
    #[arg(long, default_value = "50")]
    pub generations: u32,

    /// Initial counts for all 8 strategies, in catalog order
    /// (defaults to 5 each)
    #[arg(long, value_name = "C0,..,C7")]
    pub populations: Option<String>,

    /// Payoff matrix as T,R,P,S (defaults to 5,3,1,0)
    #[arg(long, value_name = "T,R,P,S")]
    pub payoff: Option<String>,

    /// Run fitness matches one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,

    /// Output the full generation history as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the evolve command
pub fn run(args: EvolveArgs, seed: Option<u64>) -> Result<()> {
    let (initial, config) = build_config(&args, seed)?;
    let history = execute(initial, &config, &args)?;
    report_results(&history, &args)
}

// ============================================================================
// Level 2 - Phases
// ============================================================================

fn build_config(args: &EvolveArgs, seed: Option<u64>) -> Result<(Population, EvolutionConfig)> {
    let initial = match args.populations.as_deref() {
        Some(arg) => Population::from_slice(&parse_populations(arg)?)?,
        None => Population::default(),
    };

    let mut config = EvolutionConfig::new(args.rounds, args.noise, args.generations);
    if let Some(payoff) = args.payoff.as_deref().map(parse_payoff).transpose()? {
        config = config.with_payoff(payoff);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    if args.sequential {
        config = config.sequential();
    }

    Ok((initial, config))
}

fn execute(
    initial: Population,
    config: &EvolutionConfig,
    args: &EvolveArgs,
) -> Result<Vec<Generation>> {
    tracing::info!(
        generations = args.generations,
        total = initial.total(),
        "starting evolution"
    );

    let bar = ProgressBar::new(args.generations as u64);
    bar.set_style(ProgressStyle::with_template(
        "{bar:40} {pos}/{len} generations",
    )?);

    let history = run_evolution_with_observer(initial, config, &SteadyState, |_| {
        bar.inc(1);
        true
    })?;

    bar.finish_and_clear();
    Ok(history)
}

fn report_results(history: &[Generation], args: &EvolveArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(history)?);
        return Ok(());
    }

    let Some(last) = history.last() else {
        println!("No generations were run");
        return Ok(());
    };

    println!("Population after {} generations:", last.gen_number);
    for (name, count) in &last.populations {
        println!("  {:<18} {:>6} {}", name, count, bar_chart(*count));
    }
    Ok(())
}

// ============================================================================
// Level 3 - Formatting
// ============================================================================

fn bar_chart(count: u32) -> String {
    "#".repeat(count.min(60) as usize)
}
