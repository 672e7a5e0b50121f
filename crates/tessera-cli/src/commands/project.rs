//! Project commands

use crate::output::{print_json, OutputFormat};
use crate::AppContext;
use tessera_service::StatisticsRequest;

pub async fn run_list(ctx: &AppContext) -> anyhow::Result<()> {
    let projects = ctx.service.list_projects(ctx.caller()).await?;
    tracing::info!("Found {} projects", projects.len());

    if ctx.format == OutputFormat::Json {
        return print_json(&projects);
    }

    if projects.is_empty() {
        println!("No projects visible");
        return Ok(());
    }

    println!("Projects ({} found):", projects.len());
    for project in &projects {
        let current = if ctx.project.as_deref() == Some(project.name.as_str()) {
            " (current)"
        } else {
            ""
        };
        let desc = project
            .description
            .as_ref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        println!("  {}{}{}", project.name, current, desc);
    }
    Ok(())
}

pub async fn run_stats(ctx: &AppContext) -> anyhow::Result<()> {
    let request = StatisticsRequest {
        project: ctx.project()?.to_string(),
    };
    let stats = ctx.service.graph_statistics(ctx.caller(), &request).await?;

    if ctx.format == OutputFormat::Json {
        return print_json(&stats);
    }

    println!("Project: {}", stats.project);
    println!("  Entities:  {}", stats.entity_count);
    println!("  Relations: {}", stats.relation_count);

    if !stats.entity_type_distribution.is_empty() {
        println!("Entity types:");
        for t in &stats.entity_type_distribution {
            println!("  {:<24} {}", t.type_name, t.count);
        }
    }
    if !stats.relation_type_distribution.is_empty() {
        println!("Relation types:");
        for t in &stats.relation_type_distribution {
            println!("  {:<24} {}", t.type_name, t.count);
        }
    }
    Ok(())
}
