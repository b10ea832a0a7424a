//! Net salary command

use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::config::Settings;
use crate::salary::{BracketCalculator, NetSalaryCalculator, parse_amounts};

#[derive(Args, Default)]
pub struct SalaryArgs {
    /// Comma-separated gross amounts, e.g. "10000,15000"
    #[arg(value_name = "GROSS")]
    pub gross: Option<String>,
}

pub async fn execute(args: SalaryArgs, settings: &Settings, output: &Output) -> Result<()> {
    let amounts = match args.gross.as_deref() {
        Some(text) => parse_amounts(text)?,
        None => settings.salary.gross.clone(),
    };

    let calculator = BracketCalculator::new(settings.salary.brackets.iter().copied())?;
    let strategy = settings.parallel.strategy_for(amounts.len());
    output.verbose(&format!(
        "{} amounts over {} brackets ({})",
        amounts.len(),
        calculator.brackets().len(),
        strategy
    ));

    let nets = strategy.execute(amounts.clone(), |gross, _worker_id| {
        calculator.calculate(*gross)
    })?;

    for (gross, net) in amounts.iter().zip(nets) {
        println!("gross: {gross:.2}; net: {net:.2}");
    }

    Ok(())
}
