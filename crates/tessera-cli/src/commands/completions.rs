//! Shell completions command

use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::Cli;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    match &args.output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            generate(args.shell, &mut cmd, name, &mut file);
            tracing::info!("Wrote {} completions to {:?}", args.shell, path);
        }
        None => generate(args.shell, &mut cmd, name, &mut std::io::stdout()),
    }
    Ok(())
}
