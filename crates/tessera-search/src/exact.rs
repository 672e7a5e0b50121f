//! Exact search engine - case-insensitive substring matching

use async_trait::async_trait;

use crate::filter::{matches_filters, searchable_text};
use crate::traits::{Result, SearchEngine, SearchHit};
use tessera_core::{Entity, SearchQuery};

/// Simple exact substring search engine (stateless)
pub struct ExactSearchEngine;

impl ExactSearchEngine {
    pub fn new() -> Self {
        Self
    }

    fn matches_text(entity: &Entity, text: Option<&str>) -> bool {
        match text {
            Some(text) => searchable_text(entity)
                .to_lowercase()
                .contains(&text.to_lowercase()),
            None => true,
        }
    }
}

impl Default for ExactSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchEngine for ExactSearchEngine {
    /// Hits keep the input order and all score 1.0
    async fn search(&self, query: &SearchQuery, entities: &[Entity]) -> Result<Vec<SearchHit>> {
        let text = query.search_text();
        let hits: Vec<SearchHit> = entities
            .iter()
            .filter(|entity| matches_filters(entity, query) && Self::matches_text(entity, text))
            .map(|entity| SearchHit {
                entity: entity.clone(),
                score: 1.0,
            })
            .collect();

        tracing::debug!("Exact search {:?}: {} hits", text, hits.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::{LabelMatchMode, ProjectId};

    fn create_test_entity(external_id: &str, entity_type: &str, project_id: &ProjectId) -> Entity {
        Entity::new(project_id.clone(), external_id, entity_type).with_label("test-label")
    }

    fn ids(hits: &[SearchHit]) -> Vec<&str> {
        hits.iter().map(|h| h.entity.external_id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_exact_search_by_external_id() {
        let search = ExactSearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("John_Smith", "person", &project_id),
            create_test_entity("Jane_Doe", "person", &project_id),
            create_test_entity("Google", "company", &project_id),
        ];

        let results = search.search(&SearchQuery::new("john"), &entities).await.unwrap();

        assert_eq!(ids(&results), vec!["John_Smith"]);
        assert_eq!(results[0].score, 1.0);
    }

    #[tokio::test]
    async fn test_exact_search_by_type() {
        let search = ExactSearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("John_Smith", "person", &project_id),
            create_test_entity("Google", "company", &project_id),
        ];

        let query = SearchQuery::empty().with_entity_type("PERSON");
        let results = search.search(&query, &entities).await.unwrap();

        assert_eq!(ids(&results), vec!["John_Smith"]);
    }

    #[tokio::test]
    async fn test_exact_search_by_label() {
        let search = ExactSearchEngine::new();
        let project_id = ProjectId::new();
        let entity1 = create_test_entity("John_Smith", "person", &project_id).with_label("urgent");
        let entity2 = create_test_entity("Jane_Doe", "person", &project_id);
        let entities = vec![entity1, entity2];

        let query = SearchQuery::empty()
            .with_label("urgent")
            .with_label("test-label")
            .with_label_match_mode(LabelMatchMode::All);
        let results = search.search(&query, &entities).await.unwrap();

        assert_eq!(ids(&results), vec!["John_Smith"]);
    }

    #[tokio::test]
    async fn test_exact_search_property_text() {
        let search = ExactSearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("c-1", "company", &project_id)
                .with_property("name", "Northwind Traders"),
            create_test_entity("c-2", "company", &project_id).with_property("name", "Contoso"),
        ];

        let results = search
            .search(&SearchQuery::new("NORTHWIND"), &entities)
            .await
            .unwrap();
        assert_eq!(ids(&results), vec!["c-1"]);
    }

    #[tokio::test]
    async fn test_blank_text_returns_all_in_order() {
        let search = ExactSearchEngine::new();
        let project_id = ProjectId::new();
        let entities = vec![
            create_test_entity("b", "t", &project_id),
            create_test_entity("a", "t", &project_id),
        ];

        let results = search.search(&SearchQuery::new("  "), &entities).await.unwrap();
        assert_eq!(ids(&results), vec!["b", "a"]);
    }
}
