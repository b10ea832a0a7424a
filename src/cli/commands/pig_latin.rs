use anyhow::Result;
use clap::Args;

use crate::cli::Output;
use crate::config::Settings;
use crate::pig_latin::translate;

#[derive(Args, Default)]
pub struct PigLatinArgs {
    /// Phrase to translate (quote it)
    #[arg(value_name = "PHRASE", allow_hyphen_values = true)]
    pub phrase: Option<String>,
}

pub async fn execute(args: PigLatinArgs, settings: &Settings, output: &Output) -> Result<()> {
    let phrase = args.phrase.unwrap_or_else(|| settings.pig_latin.phrase.clone());

    output.result_line("phrase", &phrase);
    output.result_line("result", translate(&phrase));
    Ok(())
}
