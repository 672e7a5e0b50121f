//! Config command

use clap::{Args, Subcommand};

use crate::config::{config_file_path, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print one setting
    Get {
        /// Setting name, e.g. `project` or `engine.max_path_depth`
        key: String,
    },
    /// Change one setting
    Set { key: String, value: String },
    /// Reset one setting to its default
    Unset { key: String },
    /// Print every setting
    List,
    /// Print the config file location
    Path,
    /// Write a config file with default settings
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

pub fn run(args: &ConfigArgs) -> anyhow::Result<()> {
    let path = config_file_path();

    match &args.command {
        ConfigCommands::Get { key } => {
            let config = Config::load()?;
            ensure_known(key)?;
            println!("{}", config.get(key).unwrap_or_else(|| "(not set)".to_string()));
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(key, value)?;
            config.save()?;
            println!("{} = {}", key, value);
        }
        ConfigCommands::Unset { key } => {
            ensure_known(key)?;
            let mut config = Config::load()?;
            match key.as_str() {
                "graph" => config.graph = None,
                "project" => config.project = None,
                "caller" => config.caller = None,
                _ => {
                    if let Some(default) = Config::default().get(key) {
                        config.set(key, &default)?;
                    }
                }
            }
            config.save()?;
            println!("Reset {}", key);
        }
        ConfigCommands::List => {
            let config = Config::load()?;
            println!("# {}", path.display());
            for key in Config::keys() {
                match config.get(&key) {
                    Some(value) => println!("{} = {}", key, value),
                    None => println!("{} (not set)", key),
                }
            }
        }
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists; pass --force to replace it",
                    path.display()
                );
            }
            Config::default().save()?;
            println!("Wrote default config to {}", path.display());
        }
    }
    Ok(())
}

fn ensure_known(key: &str) -> anyhow::Result<()> {
    if Config::keys().iter().any(|k| k == key) {
        return Ok(());
    }
    anyhow::bail!(
        "Unknown config key: {} (available: {})",
        key,
        Config::keys().join(", ")
    )
}
