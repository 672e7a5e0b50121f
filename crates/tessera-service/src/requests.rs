//! Request shapes for façade operations
//!
//! `project` accepts a project id or name. Entity references accept an entity
//! id or an external id that is unique within the project.

use serde::{Deserialize, Serialize};
use tessera_core::{Error, LabelMatchMode, Pagination, SearchMode, SearchQuery};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborsRequest {
    pub project: String,
    pub entity: String,
    #[serde(default)]
    pub depth: Option<u32>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Used by both path search and shortest path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsRequest {
    pub project: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralityRequest {
    pub project: String,
    /// `degree` or `betweenness`
    pub measure: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub project: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub mode: SearchMode,
    #[serde(default)]
    pub entity_types: Vec<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub label_match_mode: LabelMatchMode,
    #[serde(default)]
    pub page: usize,
    #[serde(default)]
    pub page_size: Option<usize>,
}

impl SearchRequest {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            text: None,
            mode: SearchMode::default(),
            entity_types: Vec::new(),
            labels: Vec::new(),
            label_match_mode: LabelMatchMode::default(),
            page: 0,
            page_size: None,
        }
    }

    /// Build the core query, clamping the page size
    ///
    /// Fails with `InvalidArgument` when the page cannot be addressed.
    pub fn to_query(&self, default_page_size: usize) -> Result<SearchQuery, Error> {
        let pagination = Pagination::new(self.page, self.page_size.unwrap_or(default_page_size));
        if pagination.checked_offset().is_none() {
            return Err(Error::invalid(format!("Page out of range: {}", self.page)));
        }

        Ok(SearchQuery {
            text: self.text.clone(),
            mode: self.mode,
            entity_types: self.entity_types.clone(),
            labels: self.labels.clone(),
            label_match_mode: self.label_match_mode,
            pagination,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsRequest {
    pub project: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewRequest {
    pub project: String,
    /// Entity to center the view on; the first entities of the project otherwise
    #[serde(default)]
    pub center: Option<String>,
    #[serde(default)]
    pub depth: Option<u32>,
    #[serde(default)]
    pub node_limit: Option<usize>,
    #[serde(default)]
    pub entity_type: Option<String>,
}
