//! Fuzzy search using nucleo

use async_trait::async_trait;
use nucleo_matcher::{
    pattern::{AtomKind, CaseMatching, Normalization, Pattern},
    Config, Matcher,
};

use crate::filter::{matches_filters, searchable_text};
use crate::traits::{Result, SearchEngine, SearchHit};
use tessera_core::{Entity, SearchQuery};

/// Stateless fuzzy search engine using nucleo
pub struct FuzzySearchEngine;

impl FuzzySearchEngine {
    pub fn new() -> Self {
        Self
    }

    fn score_entity(entity: &Entity, pattern: &Pattern, matcher: &mut Matcher) -> Option<u32> {
        let searchable = searchable_text(entity);
        let mut buf = Vec::new();
        pattern.score(
            nucleo_matcher::Utf32Str::new(&searchable, &mut buf),
            matcher,
        )
    }
}

impl Default for FuzzySearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngine for FuzzySearchEngine {
    /// Hits ranked by match score; equal scores keep input order
    async fn search(&self, query: &SearchQuery, entities: &[Entity]) -> Result<Vec<SearchHit>> {
        let filtered = entities.iter().filter(|e| matches_filters(e, query));

        let Some(search_text) = query.search_text() else {
            // No text query, just filter by other criteria
            return Ok(filtered
                .map(|e| SearchHit {
                    entity: e.clone(),
                    score: 0.0,
                })
                .collect());
        };

        let pattern = Pattern::new(
            search_text,
            CaseMatching::Ignore,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );
        let mut matcher = Matcher::new(Config::DEFAULT);

        let mut scored: Vec<(&Entity, u32)> = filtered
            .filter_map(|e| Self::score_entity(e, &pattern, &mut matcher).map(|score| (e, score)))
            .collect();

        // Sort by score descending
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        tracing::debug!("Fuzzy search '{}': {} hits", search_text, scored.len());

        Ok(scored
            .into_iter()
            .map(|(e, score)| SearchHit {
                entity: e.clone(),
                score: score as f32,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::ProjectId;

    fn create_test_entity(external_id: &str, entity_type: &str, project_id: &ProjectId) -> Entity {
        Entity::new(project_id.clone(), external_id, entity_type)
            .with_property("note", "Works on graph tooling")
    }

    #[tokio::test]
    async fn test_fuzzy_search() {
        let search = FuzzySearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("John_Smith", "person", &project_id),
            create_test_entity("Jane_Doe", "person", &project_id),
            create_test_entity("Johnny_Appleseed", "person", &project_id),
        ];

        let results = search.search(&SearchQuery::new("John"), &entities).await.unwrap();

        assert!(!results.is_empty());
        assert!(results.iter().any(|h| h.entity.external_id == "John_Smith"));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_fuzzy_search_subsequence() {
        let search = FuzzySearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("John_Smith", "person", &project_id),
            create_test_entity("Jane_Doe", "person", &project_id),
        ];

        let results = search.search(&SearchQuery::new("jsmith"), &entities).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity.external_id, "John_Smith");
    }

    #[tokio::test]
    async fn test_fuzzy_filters_without_text() {
        let search = FuzzySearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("John_Smith", "person", &project_id),
            create_test_entity("Acme", "company", &project_id),
        ];

        let query = SearchQuery::empty().with_entity_type("company");
        let results = search.search(&query, &entities).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entity.external_id, "Acme");
    }
}
