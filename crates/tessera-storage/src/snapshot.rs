//! Per-request snapshot materialization

use crate::error::StorageResult;
use crate::traits::{GraphStore, ListOptions};
use tessera_core::{Entity, EntityId, Graph, GraphSnapshot, ProjectId, Relation};

/// Default number of records fetched per store call
pub const DEFAULT_SNAPSHOT_PAGE_SIZE: usize = 1000;

/// Builds immutable [`GraphSnapshot`]s from a [`GraphStore`].
///
/// Each call fetches fresh data; snapshots are owned by the caller and never
/// shared between requests.
pub struct SnapshotAccessor<'a, S: GraphStore + ?Sized> {
    store: &'a S,
    page_size: usize,
}

impl<'a, S: GraphStore + ?Sized> SnapshotAccessor<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            page_size: DEFAULT_SNAPSHOT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Every entity of the project (optionally of one type), fetched page by page
    pub async fn entities(
        &self,
        project_id: &ProjectId,
        type_filter: Option<&str>,
    ) -> StorageResult<Vec<Entity>> {
        let mut entities = Vec::new();
        loop {
            let mut options = ListOptions::new()
                .with_offset(entities.len())
                .with_limit(self.page_size);
            options.type_filter = type_filter.map(str::to_string);
            let page = self.store.list_entities(project_id, &options).await?;
            let done = page.len() < self.page_size;
            entities.extend(page);
            if done {
                return Ok(entities);
            }
        }
    }

    /// Every relation of the project, fetched page by page
    pub async fn relations(&self, project_id: &ProjectId) -> StorageResult<Vec<Relation>> {
        let mut relations = Vec::new();
        loop {
            let options = ListOptions::new()
                .with_offset(relations.len())
                .with_limit(self.page_size);
            let page = self.store.list_relations(project_id, &options).await?;
            let done = page.len() < self.page_size;
            relations.extend(page);
            if done {
                return Ok(relations);
            }
        }
    }

    /// Every entity and relation of the project
    pub async fn project_snapshot(&self, project_id: &ProjectId) -> StorageResult<GraphSnapshot> {
        let entities = self.entities(project_id, None).await?;
        let relations = self.relations(project_id).await?;

        tracing::debug!(
            "Project snapshot {}: {} entities, {} relations",
            project_id,
            entities.len(),
            relations.len()
        );

        let graph = Graph::new().with_entities(entities).with_relations(relations);
        Ok(GraphSnapshot::new(project_id.clone(), graph))
    }

    /// The seed's `radius`-hop neighborhood as a snapshot.
    ///
    /// Any walk of at most `radius` relations from the seed stays inside it,
    /// so expansions and path searches bounded by `radius` see the same graph
    /// they would see in the full project snapshot.
    pub async fn neighborhood_snapshot(
        &self,
        project_id: &ProjectId,
        seed_id: &EntityId,
        radius: u32,
    ) -> StorageResult<GraphSnapshot> {
        let graph = self
            .store
            .fetch_neighborhood(project_id, seed_id, radius)
            .await?;
        tracing::debug!(
            "Neighborhood snapshot around {} (radius {}): {} entities, {} relations",
            seed_id,
            radius,
            graph.entities.len(),
            graph.relations.len()
        );
        Ok(GraphSnapshot::new(project_id.clone(), graph))
    }
}
