//! JSON request dispatch

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tessera_core::{Error, ErrorKind, Result};

use crate::facade::GraphQueryService;

/// Operation names understood by [`RequestHandler`]
pub const OPERATIONS: &[&str] = &[
    "expand_neighbors",
    "find_paths",
    "shortest_path",
    "rank_by_centrality",
    "search_entities",
    "graph_statistics",
    "visualize",
    "list_projects",
];

/// A named operation with its JSON arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphRequest {
    pub operation: String,
    #[serde(default)]
    pub arguments: Value,
}

impl GraphRequest {
    pub fn new(operation: impl Into<String>, arguments: Value) -> Self {
        Self {
            operation: operation.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

/// Uniform envelope: `data` on success, `error` otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl GraphResponse {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: &Error) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(ErrorBody {
                kind: error.kind(),
                message: error.to_string(),
            }),
        }
    }
}

/// Routes [`GraphRequest`]s to the matching [`GraphQueryService`] operation
pub struct RequestHandler {
    service: Arc<GraphQueryService>,
}

impl RequestHandler {
    pub fn new(service: Arc<GraphQueryService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &GraphQueryService {
        &self.service
    }

    pub async fn handle(&self, caller: Option<&str>, request: GraphRequest) -> GraphResponse {
        tracing::debug!("Handling operation: {}", request.operation);

        match self
            .dispatch(caller, &request.operation, request.arguments)
            .await
        {
            Ok(data) => GraphResponse::success(data),
            Err(e) => {
                tracing::debug!("Operation {} failed: {}", request.operation, e);
                GraphResponse::failure(&e)
            }
        }
    }

    /// Parse a request document, run it and serialize the response
    pub async fn handle_json(&self, caller: Option<&str>, body: &str) -> String {
        let response = match serde_json::from_str::<GraphRequest>(body) {
            Ok(request) => self.handle(caller, request).await,
            Err(e) => GraphResponse::failure(&Error::invalid(format!("malformed request: {}", e))),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(
                r#"{{"ok":false,"error":{{"kind":"internal","message":"{}"}}}}"#,
                e.to_string().replace('"', "'")
            )
        })
    }

    async fn dispatch(&self, caller: Option<&str>, operation: &str, args: Value) -> Result<Value> {
        let service = &self.service;
        match operation {
            "expand_neighbors" => to_value(service.expand_neighbors(caller, &parse(args)?).await?),
            "find_paths" => to_value(service.find_paths(caller, &parse(args)?).await?),
            "shortest_path" => to_value(service.shortest_path(caller, &parse(args)?).await?),
            "rank_by_centrality" => {
                to_value(service.rank_by_centrality(caller, &parse(args)?).await?)
            }
            "search_entities" => to_value(service.search_entities(caller, &parse(args)?).await?),
            "graph_statistics" => to_value(service.graph_statistics(caller, &parse(args)?).await?),
            "visualize" => to_value(service.visualize(caller, &parse(args)?).await?),
            "list_projects" => to_value(service.list_projects(caller).await?),
            other => Err(Error::invalid(format!(
                "unknown operation '{}' (expected one of: {})",
                other,
                OPERATIONS.join(", ")
            ))),
        }
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::invalid(format!("invalid arguments: {}", e)))
}

fn to_value<T: Serialize>(data: T) -> Result<Value> {
    Ok(serde_json::to_value(data)?)
}
