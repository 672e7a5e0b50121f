//! Path commands

use clap::Args;

use crate::output::{path_line, print_json, OutputFormat};
use crate::AppContext;
use tessera_service::PathsRequest;

#[derive(Args)]
pub struct PathsArgs {
    /// Source entity (id or external id)
    pub source: String,

    /// Target entity (id or external id)
    pub target: String,

    /// Longest path to consider, in relations
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Stop after this many paths
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct ShortestPathArgs {
    /// Source entity (id or external id)
    pub source: String,

    /// Target entity (id or external id)
    pub target: String,

    /// Longest path to consider, in relations
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,
}

pub async fn run(args: &PathsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let request = PathsRequest {
        project: ctx.project()?.to_string(),
        source: args.source.clone(),
        target: args.target.clone(),
        max_depth: args.max_depth,
        limit: args.limit,
    };
    let result = ctx.service.find_paths(ctx.caller(), &request).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }

    if result.paths.is_empty() {
        println!("No path from {} to {}", args.source, args.target);
        return Ok(());
    }

    println!(
        "Paths from {} to {} ({} found{}):",
        args.source,
        args.target,
        result.paths.len(),
        if result.limit_reached { ", limit reached" } else { "" }
    );
    for path in &result.paths {
        println!("  [{}] {}", path.length, path_line(path));
    }
    Ok(())
}

pub async fn run_shortest(args: &ShortestPathArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let request = PathsRequest {
        project: ctx.project()?.to_string(),
        source: args.source.clone(),
        target: args.target.clone(),
        max_depth: args.max_depth,
        limit: None,
    };
    let path = ctx.service.shortest_path(ctx.caller(), &request).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&path);
    }

    match path {
        Some(path) => println!("[{}] {}", path.length, path_line(&path)),
        None => println!("No path from {} to {}", args.source, args.target),
    }
    Ok(())
}
