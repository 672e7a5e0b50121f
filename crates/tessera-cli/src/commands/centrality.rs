//! Centrality command

use clap::Args;

use crate::output::{entity_line, print_json, OutputFormat};
use crate::AppContext;
use tessera_service::CentralityRequest;

#[derive(Args)]
pub struct CentralityArgs {
    /// Measure: degree, betweenness
    #[arg(short, long, default_value = "degree")]
    pub measure: String,

    /// Number of entities to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn run(args: &CentralityArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let request = CentralityRequest {
        project: ctx.project()?.to_string(),
        measure: args.measure.clone(),
        limit: args.limit,
    };
    let response = ctx.service.rank_by_centrality(ctx.caller(), &request).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&response);
    }

    println!(
        "{} centrality in {} (top {} of {}):",
        response.measure,
        request.project,
        response.results.len(),
        response.entity_count
    );
    for result in &response.results {
        println!("  {:>10.2}  {}", result.score, entity_line(&result.entity));
    }
    Ok(())
}
