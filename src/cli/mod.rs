//! Command-line interface for katas
//!
//! clap derive parsing, logging setup and dispatch to the command modules.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::KatasConfig;

pub mod commands;
mod output;

pub use output::Output;

#[derive(Parser)]
#[command(
    name = "katas",
    version = env!("CARGO_PKG_VERSION"),
    about = "Target-sum combinations, progressive net salary and pig latin",
    long_about = "Finds every distinct ordered combination of candidates that sums to a target, \
                  computes net salaries over progressive tax brackets, and translates phrases \
                  into pig latin. Runs the combinations search when no command is given."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find every distinct combination of candidates summing to a target
    Combos(commands::combos::CombosArgs),
    /// Compute net salaries over progressive tax brackets
    Salary(commands::salary::SalaryArgs),
    /// Translate a phrase into pig latin
    PigLatin(commands::pig_latin::PigLatinArgs),
    /// Configuration management
    Config(commands::config::ConfigArgs),
    /// Show version information
    Version,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        // Set up logging based on verbosity
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let config = KatasConfig::load_with_custom_config(self.config.as_deref())?;
        let settings = config.settings()?;

        match self.command {
            Some(Commands::Combos(args)) => commands::combos::execute(args, &settings, &output).await,
            Some(Commands::Salary(args)) => commands::salary::execute(args, &settings, &output).await,
            Some(Commands::PigLatin(args)) => commands::pig_latin::execute(args, &settings, &output).await,
            Some(Commands::Config(args)) => commands::config::execute(args, &config, &settings).await,
            Some(Commands::Version) => commands::version::execute(&output).await,
            // Default behavior - the combinations search with configured inputs
            None => {
                commands::combos::execute(commands::combos::CombosArgs::default(), &settings, &output)
                    .await
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs go to stderr so command results on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_negative_positionals_are_values() {
        let cli = Cli::try_parse_from(["katas", "combos", "-3,3,0", "-3"]).unwrap();
        match cli.command {
            Some(Commands::Combos(args)) => {
                assert_eq!(args.candidates.as_deref(), Some("-3,3,0"));
                assert_eq!(args.target.as_deref(), Some("-3"));
            }
            _ => panic!("expected combos command"),
        }
    }

    #[test]
    fn test_phrase_starting_with_dash_is_a_value() {
        let cli = Cli::try_parse_from(["katas", "pig-latin", "- what"]).unwrap();
        match cli.command {
            Some(Commands::PigLatin(args)) => assert_eq!(args.phrase.as_deref(), Some("- what")),
            _ => panic!("expected pig-latin command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["katas", "salary", "-vv", "--quiet"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }
}
