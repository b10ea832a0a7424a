//! Configuration commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};

use crate::config::{KatasConfig, Settings};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the merged configuration (defaults, files, environment)
    Show {
        #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
    /// Print one value or section by dotted path, e.g. `combos.target`
    Get { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub async fn execute(args: ConfigArgs, config: &KatasConfig, settings: &Settings) -> Result<()> {
    match args.command {
        ConfigCommands::Show { format } => {
            let rendered = match format {
                ConfigFormat::Toml => {
                    toml::to_string_pretty(settings).context("Failed to render config as TOML")?
                }
                ConfigFormat::Json => serde_json::to_string_pretty(settings)
                    .context("Failed to render config as JSON")?,
            };
            println!("{rendered}");
        }
        ConfigCommands::Get { path } => print_value(&config.get_section(&path)?)?,
    }
    Ok(())
}

fn print_value(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(_) => println!("{}", serde_json::to_string_pretty(value)?),
        // One array item per line
        serde_json::Value::Array(items) => {
            for item in items {
                match item {
                    serde_json::Value::String(s) => println!("{s}"),
                    _ => println!("{item}"),
                }
            }
        }
        serde_json::Value::String(s) => println!("{s}"),
        _ => println!("{value}"),
    }
    Ok(())
}
