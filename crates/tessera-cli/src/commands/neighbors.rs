//! Neighbor expansion command

use clap::Args;

use crate::output::{entity_line, print_json, OutputFormat};
use crate::AppContext;
use tessera_core::EntityId;
use tessera_service::NeighborsRequest;

#[derive(Args)]
pub struct NeighborsArgs {
    /// Seed entity (id or external id)
    pub entity: String,

    /// Hops to expand (default 1)
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Keep at most this many neighbors
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &NeighborsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let request = NeighborsRequest {
        project: ctx.project()?.to_string(),
        entity: args.entity.clone(),
        depth: args.depth,
        limit: args.limit,
    };
    let result = ctx.service.expand_neighbors(ctx.caller(), &request).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&result);
    }

    let Some(seed) = &result.seed else {
        println!("Entity '{}' not found in {}", args.entity, request.project);
        return Ok(());
    };

    println!(
        "Neighbors of {} within {} hop(s) ({} found{}):",
        seed.external_id,
        result.depth,
        result.subgraph.entities.len(),
        if result.truncated { ", truncated" } else { "" }
    );
    for entity in &result.subgraph.entities {
        println!("  {}", entity_line(entity));
    }

    if !result.subgraph.relations.is_empty() {
        println!("Relations:");
        let name = |id: &EntityId| {
            std::iter::once(seed)
                .chain(&result.subgraph.entities)
                .find(|e| &e.id == id)
                .map_or("?", |e| e.external_id.as_str())
        };
        for relation in &result.subgraph.relations {
            println!(
                "  {} -[{}]-> {}",
                name(&relation.source_id),
                relation.relation_type,
                name(&relation.target_id)
            );
        }
    }
    Ok(())
}
