//! Tessera CLI - Command line interface for the graph query engine

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{centrality, completions, neighbors, paths, project, request, search, view};
use config::Config;
use output::OutputFormat;
use tessera_service::GraphQueryService;
use tessera_storage::GraphDocument;

#[derive(Parser)]
#[command(name = "tessera")]
#[command(author, version, about = "Graph query engine for entity/relation documents")]
pub struct Cli {
    /// Graph document (JSON)
    #[arg(short, long, env = "TESSERA_GRAPH", global = true)]
    pub graph: Option<PathBuf>,

    /// Project id or name
    #[arg(short, long, env = "TESSERA_PROJECT", global = true)]
    pub project: Option<String>,

    /// Caller identity checked against project owners
    #[arg(long, env = "TESSERA_CALLER", global = true)]
    pub caller: Option<String>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text", global = true)]
    pub format: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand the neighborhood of an entity
    Neighbors(neighbors::NeighborsArgs),
    /// Enumerate simple paths between two entities
    Paths(paths::PathsArgs),
    /// Find one shortest path between two entities
    ShortestPath(paths::ShortestPathArgs),
    /// Rank entities by degree or betweenness centrality
    Centrality(centrality::CentralityArgs),
    /// Search entities
    Search(search::SearchArgs),
    /// Show project statistics
    Stats,
    /// Build a node/edge view for graph renderers
    View(view::ViewArgs),
    /// Run a JSON request document
    Request(request::RequestArgs),
    /// List projects visible to the caller
    Projects,
    /// Manage CLI configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context: the loaded graph behind a query service
pub struct AppContext {
    pub service: Arc<GraphQueryService>,
    pub project: Option<String>,
    pub caller: Option<String>,
    pub format: OutputFormat,
}

impl AppContext {
    pub fn new(cli: &Cli, config: Config) -> anyhow::Result<Self> {
        let graph = cli.graph.clone().or(config.graph).ok_or_else(|| {
            anyhow::anyhow!(
                "No graph document given. Pass --graph FILE or run 'tessera config set graph FILE'"
            )
        })?;
        tracing::debug!("Using graph document at: {:?}", graph);

        let document = GraphDocument::load(&graph)
            .with_context(|| format!("Failed to load graph document {}", graph.display()))?;
        let storage = document.into_store()?;
        let service = GraphQueryService::new(Arc::new(storage)).with_config(config.engine);

        Ok(Self {
            service: Arc::new(service),
            project: cli.project.clone().or(config.project),
            caller: cli.caller.clone().or(config.caller),
            format: OutputFormat::from(cli.format.as_str()),
        })
    }

    pub fn project(&self) -> anyhow::Result<&str> {
        self.project.as_deref().ok_or_else(|| {
            anyhow::anyhow!("No project selected. Pass --project NAME or run 'tessera config set project NAME'")
        })
    }

    pub fn caller(&self) -> Option<&str> {
        self.caller.as_deref()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting tessera CLI");

    // Commands that need no graph
    match &cli.command {
        Commands::Config(args) => return commands::config::run(args),
        Commands::Completions(args) => return completions::run(args),
        _ => {}
    }

    let ctx = AppContext::new(&cli, Config::load()?)?;

    match &cli.command {
        Commands::Neighbors(args) => neighbors::run(args, &ctx).await?,
        Commands::Paths(args) => paths::run(args, &ctx).await?,
        Commands::ShortestPath(args) => paths::run_shortest(args, &ctx).await?,
        Commands::Centrality(args) => centrality::run(args, &ctx).await?,
        Commands::Search(args) => search::run(args, &ctx).await?,
        Commands::Stats => project::run_stats(&ctx).await?,
        Commands::View(args) => view::run(args, &ctx).await?,
        Commands::Request(args) => request::run(args, &ctx).await?,
        Commands::Projects => project::run_list(&ctx).await?,
        Commands::Config(_) | Commands::Completions(_) => {}
    }

    Ok(())
}
