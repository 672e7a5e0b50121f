//! JSON request command

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use crate::output::print_json;
use crate::AppContext;
use tessera_service::{GraphRequest, RequestHandler};

#[derive(Args)]
pub struct RequestArgs {
    /// Request document, `{"operation": ..., "arguments": {...}}` (stdin if omitted)
    pub file: Option<PathBuf>,
}

pub async fn run(args: &RequestArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let body = match &args.file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request {}", path.display()))?,
        _ => {
            let mut body = String::new();
            std::io::stdin().read_to_string(&mut body)?;
            body
        }
    };

    let mut request: GraphRequest =
        serde_json::from_str(&body).context("Request is not a valid JSON request document")?;

    // Fall back to the selected project
    if let (Value::Object(arguments), Some(project)) = (&mut request.arguments, &ctx.project) {
        arguments
            .entry("project")
            .or_insert_with(|| Value::String(project.clone()));
    }
    if request.arguments.is_null() {
        if let Some(project) = &ctx.project {
            request.arguments = serde_json::json!({ "project": project });
        }
    }

    let handler = RequestHandler::new(ctx.service.clone());
    let response = handler.handle(ctx.caller(), request).await;
    print_json(&response)?;

    if !response.ok {
        std::process::exit(1);
    }
    Ok(())
}
