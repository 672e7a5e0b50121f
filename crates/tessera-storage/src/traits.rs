//! Graph store trait definitions

use crate::error::StorageResult;
use async_trait::async_trait;
use std::collections::HashSet;
use tessera_core::{
    Entity, EntityId, Graph, GraphSnapshot, NeighborQuery, Project, ProjectId, Relation,
    RelationId, TraversalEngine,
};

/// Filtering and paging for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Only records with this type
    pub type_filter: Option<String>,

    /// Maximum records to return (all when `None`)
    pub limit: Option<usize>,

    /// Records to skip, in store order
    pub offset: usize,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, type_filter: impl Into<String>) -> Self {
        self.type_filter = Some(type_filter.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Apply type filter, offset and limit to records in store order
    pub fn apply<'a, T: 'a>(
        &self,
        items: impl Iterator<Item = &'a T>,
        type_of: impl Fn(&T) -> &str,
    ) -> Vec<T>
    where
        T: Clone,
    {
        items
            .filter(|item| {
                self.type_filter
                    .as_deref()
                    .map_or(true, |t| type_of(*item) == t)
            })
            .skip(self.offset)
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

/// Read-only interface to the external graph store.
///
/// Every lookup is scoped by project id. Listing order must be stable between
/// calls so offset paging sees each record once.
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Project Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a project by ID
    async fn get_project(&self, id: &ProjectId) -> StorageResult<Option<Project>>;

    /// Get a project by name
    async fn get_project_by_name(&self, name: &str) -> StorageResult<Option<Project>>;

    /// Get all projects
    async fn list_projects(&self) -> StorageResult<Vec<Project>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Entity and Relation Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get an entity by id within a project
    async fn get_entity(
        &self,
        project_id: &ProjectId,
        entity_id: &EntityId,
    ) -> StorageResult<Option<Entity>>;

    /// Entities carrying `external_id`, in store order, at most `limit`.
    ///
    /// The default filters a full listing; stores that index external ids
    /// should override it.
    async fn find_by_external_id(
        &self,
        project_id: &ProjectId,
        external_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<Entity>> {
        let entities = self.list_entities(project_id, &ListOptions::default()).await?;
        Ok(entities
            .into_iter()
            .filter(|e| e.external_id == external_id)
            .take(limit)
            .collect())
    }

    /// List a project's entities
    async fn list_entities(
        &self,
        project_id: &ProjectId,
        options: &ListOptions,
    ) -> StorageResult<Vec<Entity>>;

    /// List a project's relations
    async fn list_relations(
        &self,
        project_id: &ProjectId,
        options: &ListOptions,
    ) -> StorageResult<Vec<Relation>>;

    /// Entities within `depth` undirected hops of `seed_id` (seed first, then
    /// BFS discovery order) and the relations traversed, in store order. Empty
    /// when the seed does not exist.
    ///
    /// The default loads the whole project and runs the reference expansion;
    /// stores with a native traversal should override it.
    async fn fetch_neighborhood(
        &self,
        project_id: &ProjectId,
        seed_id: &EntityId,
        depth: u32,
    ) -> StorageResult<Graph> {
        let all = ListOptions::default();
        let graph = Graph::new()
            .with_entities(self.list_entities(project_id, &all).await?)
            .with_relations(self.list_relations(project_id, &all).await?);
        let snapshot = GraphSnapshot::new(project_id.clone(), graph);

        let query = NeighborQuery::new(seed_id.clone()).with_depth(depth);
        let result = TraversalEngine::expand_neighbors(&query, &snapshot);

        let traversed: HashSet<&RelationId> =
            result.subgraph.relations.iter().map(|r| &r.id).collect();
        let relations = snapshot
            .relations()
            .iter()
            .filter(|r| traversed.contains(&r.id))
            .cloned()
            .collect();

        let mut entities = Vec::with_capacity(result.subgraph.entities.len() + 1);
        entities.extend(result.seed.clone());
        entities.extend(result.subgraph.entities.iter().cloned());
        Ok(Graph::new().with_entities(entities).with_relations(relations))
    }
}
