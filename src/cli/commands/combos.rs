//! Target-sum combinations command

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::Output;
use crate::combos::{self, SearchStats, TargetCandidates, parse_candidates, parse_target};
use crate::config::Settings;
use crate::parallel::ExecutionMode;

#[derive(Args, Default)]
pub struct CombosArgs {
    /// Comma-separated candidate integers, e.g. "10,1,2,7,1,6,2,5"
    #[arg(value_name = "CANDIDATES", allow_hyphen_values = true)]
    pub candidates: Option<String>,

    /// Target sum
    #[arg(value_name = "TARGET", allow_hyphen_values = true)]
    pub target: Option<String>,

    /// Processing mode: auto (smart default), parallel, or sequential
    #[arg(long, value_enum)]
    pub mode: Option<ExecutionMode>,

    /// Maximum worker threads (0 = no limit)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Show search statistics after the result
    #[arg(long)]
    pub stats: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    candidates: &'a [i64],
    target: i64,
    result: Vec<combos::Combination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a SearchStats>,
}

pub async fn execute(args: CombosArgs, settings: &Settings, output: &Output) -> Result<()> {
    // Malformed input stops the run before any search starts
    let candidates = match args.candidates.as_deref() {
        Some(text) => parse_candidates(text)?,
        None => settings.combos.candidates.clone(),
    };
    let target = match args.target.as_deref() {
        Some(text) => parse_target(text)?,
        None => settings.combos.target,
    };

    let mut parallel = settings.parallel.clone();
    if let Some(mode) = args.mode {
        parallel.mode = mode;
    }
    if let Some(threads) = args.threads {
        parallel.max_threads = threads;
    }
    let strategy = parallel.strategy_for(candidates.len());
    let warn_above = settings.combos.warn_candidates_above;

    // stdout carries only the JSON document in json mode
    if args.format == OutputFormat::Text {
        output.verbose(&format!(
            "Searching {} candidates ({} paths) with {} strategy",
            candidates.len(),
            combos::path_count(candidates.len()),
            strategy
        ));
    }

    // CPU-bound: keep it off the async runtime threads
    let (candidates, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = TargetCandidates::new(&candidates, target)
            .with_strategy(strategy)
            .with_warn_candidates_above(warn_above)
            .search();
        outcome.map(|outcome| (candidates, outcome))
    })
    .await
    .context("Search task failed")??;

    let result = combos::sorted(&outcome.combinations);

    match args.format {
        OutputFormat::Json => {
            let report = JsonReport {
                candidates: &candidates,
                target,
                result,
                stats: args.stats.then_some(&outcome.stats),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            output.result_line("candidates", format!("{candidates:?}"));
            output.result_line("target", target);
            output.result_line("result", format!("{result:?}"));

            if args.stats {
                print_stats(&outcome.stats, output);
            }
        }
    }

    Ok(())
}

fn print_stats(stats: &SearchStats, output: &Output) {
    output.category("Search statistics");
    output.key_value("Strategy:", &stats.strategy.to_string(), false);
    output.key_value("Paths visited:", &stats.paths_visited.to_string(), false);
    output.key_value("Paths accepted:", &stats.paths_accepted.to_string(), false);
    output.key_value("Combinations:", &stats.combinations.to_string(), true);
    output.key_value("Elapsed:", &format!("{:.2?}", stats.elapsed), false);
}
