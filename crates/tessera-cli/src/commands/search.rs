//! Search command

use clap::Args;

use crate::output::{entity_line, print_json, OutputFormat};
use crate::AppContext;
use tessera_core::{LabelMatchMode, SearchMode};
use tessera_service::SearchRequest;

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    pub query: Option<String>,

    /// Search mode: exact, fuzzy
    #[arg(long, default_value = "exact")]
    pub mode: SearchMode,

    /// Shorthand for --mode fuzzy
    #[arg(long)]
    pub fuzzy: bool,

    /// Filter by entity type (can be used multiple times)
    #[arg(short = 't', long = "type")]
    pub entity_type: Vec<String>,

    /// Filter by label (can be used multiple times)
    #[arg(long)]
    pub label: Vec<String>,

    /// Require every label instead of any
    #[arg(long)]
    pub all_labels: bool,

    /// Page number, starting at 0
    #[arg(long, default_value = "0")]
    pub page: usize,

    /// Results per page
    #[arg(long)]
    pub page_size: Option<usize>,
}

pub async fn run(args: &SearchArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let project = ctx.project()?;

    let mut request = SearchRequest::new(project);
    request.text = args.query.clone();
    request.mode = if args.fuzzy { SearchMode::Fuzzy } else { args.mode };
    request.entity_types = args.entity_type.clone();
    request.labels = args.label.clone();
    request.label_match_mode = if args.all_labels {
        LabelMatchMode::All
    } else {
        LabelMatchMode::Any
    };
    request.page = args.page;
    request.page_size = args.page_size;

    let results = ctx.service.search_entities(ctx.caller(), &request).await?;
    tracing::info!(
        "Search returned {} of {} results in {}",
        results.data.len(),
        results.pagination.total_count,
        project
    );

    if ctx.format == OutputFormat::Json {
        return print_json(&results);
    }

    if results.data.is_empty() {
        println!("No results found in {}", project);
        return Ok(());
    }

    let info = &results.pagination;
    match &args.query {
        Some(q) => println!("Search results for '{}' in {} ({} found):", q, project, info.total_count),
        None => println!("Entities in {} ({} found):", project, info.total_count),
    }
    for hit in &results.data {
        if request.mode == SearchMode::Fuzzy {
            println!("  {:>6.1}  {}", hit.score, entity_line(&hit.entity));
        } else {
            println!("  {}", entity_line(&hit.entity));
        }
    }
    if info.total_pages > 1 {
        println!("Page {} of {}", info.current_page + 1, info.total_pages);
    }
    Ok(())
}
