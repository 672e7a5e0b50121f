//! Search engine traits

use async_trait::async_trait;
use serde::Serialize;
use tessera_core::{Entity, SearchMode, SearchQuery};

pub use crate::error::{SearchError, SearchResult as Result};

/// Result from search including score
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub entity: Entity,
    pub score: f32,
}

/// Trait for search engines.
///
/// Engines are stateless: they rank the entities handed to them and return
/// every hit in order. Paging is the caller's job.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Search entities based on query
    async fn search(&self, query: &SearchQuery, entities: &[Entity]) -> Result<Vec<SearchHit>>;
}

/// Engine implementing a search mode
pub fn engine_for(mode: SearchMode) -> Box<dyn SearchEngine> {
    match mode {
        SearchMode::Exact => Box::new(crate::exact::ExactSearchEngine::new()),
        SearchMode::Fuzzy => Box::new(crate::fuzzy::FuzzySearchEngine::new()),
    }
}
