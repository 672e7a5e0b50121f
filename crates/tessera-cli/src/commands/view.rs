//! Visualization view command

use clap::Args;

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use tessera_service::ViewRequest;

#[derive(Args)]
pub struct ViewArgs {
    /// Center the view on this entity (id or external id)
    #[arg(short, long)]
    pub center: Option<String>,

    /// Hops around the center
    #[arg(short, long)]
    pub depth: Option<u32>,

    /// Maximum nodes in the view
    #[arg(short = 'n', long)]
    pub node_limit: Option<usize>,

    /// Only include entities of this type (the center is always kept)
    #[arg(short = 't', long = "type")]
    pub entity_type: Option<String>,
}

pub async fn run(args: &ViewArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let request = ViewRequest {
        project: ctx.project()?.to_string(),
        center: args.center.clone(),
        depth: args.depth,
        node_limit: args.node_limit,
        entity_type: args.entity_type.clone(),
    };
    let view = ctx.service.visualize(ctx.caller(), &request).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&view);
    }

    println!(
        "View of {}: {} nodes, {} edges",
        request.project,
        view.nodes.len(),
        view.edges.len()
    );
    for node in &view.nodes {
        println!(
            "  {} ({}) degree {}",
            node.label, node.entity_type, node.degree
        );
    }
    Ok(())
}
