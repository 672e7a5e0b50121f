//! In-memory graph store
//!
//! Reference implementation of [`GraphStore`] used by the CLI and tests. Keeps
//! insertion order for entities and relations and an adjacency index for its
//! native neighborhood traversal.

use crate::error::{StorageError, StorageResult};
use crate::traits::{GraphStore, ListOptions};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;
use tessera_core::{Entity, EntityId, Graph, Project, ProjectId, Relation, RelationId};

/// One project's records
#[derive(Debug, Default)]
struct ProjectGraph {
    entities: Vec<Entity>,
    entity_index: HashMap<EntityId, usize>,
    external_index: HashMap<String, Vec<usize>>,
    relations: Vec<Relation>,
    relation_ids: HashSet<RelationId>,
    adjacency: HashMap<EntityId, Vec<usize>>,
}

/// In-memory storage backend
#[derive(Debug)]
pub struct MemoryStorage {
    projects: RwLock<Vec<Project>>,
    graphs: RwLock<HashMap<ProjectId, ProjectGraph>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(Vec::new()),
            graphs: RwLock::new(HashMap::new()),
        }
    }

    /// Register a project; names are unique
    pub fn save_project(&self, project: &Project) -> StorageResult<()> {
        let mut projects = self.projects.write().map_err(StorageError::lock)?;
        if projects.iter().any(|p| p.name == project.name) {
            return Err(StorageError::DuplicateProject(project.name.clone()));
        }
        projects.push(project.clone());

        let mut graphs = self.graphs.write().map_err(StorageError::lock)?;
        graphs.entry(project.id.clone()).or_default();
        Ok(())
    }

    /// Add an entity to its project
    pub fn save_entity(&self, entity: &Entity) -> StorageResult<()> {
        let mut graphs = self.graphs.write().map_err(StorageError::lock)?;
        let graph = graphs
            .get_mut(&entity.project_id)
            .ok_or_else(|| StorageError::ProjectNotFound(entity.project_id.to_string()))?;

        if graph.entity_index.contains_key(&entity.id) {
            return Err(StorageError::DuplicateEntity(entity.id.to_string()));
        }
        let pos = graph.entities.len();
        graph.entity_index.insert(entity.id.clone(), pos);
        graph
            .external_index
            .entry(entity.external_id.clone())
            .or_default()
            .push(pos);
        graph.entities.push(entity.clone());
        Ok(())
    }

    /// Add a relation; both endpoints must already exist in the same project
    pub fn save_relation(&self, relation: &Relation) -> StorageResult<()> {
        let mut graphs = self.graphs.write().map_err(StorageError::lock)?;
        let graph = graphs
            .get_mut(&relation.project_id)
            .ok_or_else(|| StorageError::ProjectNotFound(relation.project_id.to_string()))?;

        for endpoint in [&relation.source_id, &relation.target_id] {
            if !graph.entity_index.contains_key(endpoint) {
                return Err(StorageError::EntityNotFound(endpoint.to_string()));
            }
        }
        if !graph.relation_ids.insert(relation.id.clone()) {
            return Err(StorageError::DuplicateRelation(relation.id.to_string()));
        }

        let pos = graph.relations.len();
        graph
            .adjacency
            .entry(relation.source_id.clone())
            .or_default()
            .push(pos);
        if !relation.is_self_loop() {
            graph
                .adjacency
                .entry(relation.target_id.clone())
                .or_default()
                .push(pos);
        }
        graph.relations.push(relation.clone());
        Ok(())
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MemoryStorage {
    async fn get_project(&self, id: &ProjectId) -> StorageResult<Option<Project>> {
        let projects = self.projects.read().map_err(StorageError::lock)?;
        Ok(projects.iter().find(|p| p.id == *id).cloned())
    }

    async fn get_project_by_name(&self, name: &str) -> StorageResult<Option<Project>> {
        let projects = self.projects.read().map_err(StorageError::lock)?;
        Ok(projects.iter().find(|p| p.name == name).cloned())
    }

    async fn list_projects(&self) -> StorageResult<Vec<Project>> {
        let projects = self.projects.read().map_err(StorageError::lock)?;
        Ok(projects.clone())
    }

    async fn get_entity(
        &self,
        project_id: &ProjectId,
        entity_id: &EntityId,
    ) -> StorageResult<Option<Entity>> {
        let graphs = self.graphs.read().map_err(StorageError::lock)?;
        Ok(graphs.get(project_id).and_then(|g| {
            g.entity_index
                .get(entity_id)
                .map(|&i| g.entities[i].clone())
        }))
    }

    async fn find_by_external_id(
        &self,
        project_id: &ProjectId,
        external_id: &str,
        limit: usize,
    ) -> StorageResult<Vec<Entity>> {
        let graphs = self.graphs.read().map_err(StorageError::lock)?;
        let graph = graphs
            .get(project_id)
            .ok_or_else(|| StorageError::ProjectNotFound(project_id.to_string()))?;
        Ok(graph
            .external_index
            .get(external_id)
            .into_iter()
            .flatten()
            .take(limit)
            .map(|&i| graph.entities[i].clone())
            .collect())
    }

    async fn list_entities(
        &self,
        project_id: &ProjectId,
        options: &ListOptions,
    ) -> StorageResult<Vec<Entity>> {
        let graphs = self.graphs.read().map_err(StorageError::lock)?;
        let graph = graphs
            .get(project_id)
            .ok_or_else(|| StorageError::ProjectNotFound(project_id.to_string()))?;
        Ok(options.apply(graph.entities.iter(), |e| e.entity_type.as_str()))
    }

    async fn list_relations(
        &self,
        project_id: &ProjectId,
        options: &ListOptions,
    ) -> StorageResult<Vec<Relation>> {
        let graphs = self.graphs.read().map_err(StorageError::lock)?;
        let graph = graphs
            .get(project_id)
            .ok_or_else(|| StorageError::ProjectNotFound(project_id.to_string()))?;
        Ok(options.apply(graph.relations.iter(), |r| r.relation_type.as_str()))
    }

    async fn fetch_neighborhood(
        &self,
        project_id: &ProjectId,
        seed_id: &EntityId,
        depth: u32,
    ) -> StorageResult<Graph> {
        let graphs = self.graphs.read().map_err(StorageError::lock)?;
        let graph = graphs
            .get(project_id)
            .ok_or_else(|| StorageError::ProjectNotFound(project_id.to_string()))?;

        let Some(&seed) = graph.entity_index.get(seed_id) else {
            return Ok(Graph::new());
        };

        let mut reached = vec![seed];
        let mut visited: HashSet<usize> = HashSet::from([seed]);
        let mut traversed: Vec<usize> = Vec::new();
        let mut traversed_set: HashSet<usize> = HashSet::new();
        let mut frontier = vec![seed];

        for _ in 0..depth.max(1) {
            let mut next = Vec::new();
            for &node in &frontier {
                let id = &graph.entities[node].id;
                for &rel_pos in graph.adjacency.get(id).into_iter().flatten() {
                    let rel = &graph.relations[rel_pos];
                    let other = if rel.source_id == *id {
                        &rel.target_id
                    } else {
                        &rel.source_id
                    };
                    if traversed_set.insert(rel_pos) {
                        traversed.push(rel_pos);
                    }
                    if let Some(&other_pos) = graph.entity_index.get(other) {
                        if visited.insert(other_pos) {
                            reached.push(other_pos);
                            next.push(other_pos);
                        }
                    }
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }

        traversed.sort_unstable();

        tracing::debug!(
            "Memory neighborhood of {}: {} entities, {} relations",
            seed_id,
            reached.len(),
            traversed.len()
        );

        Ok(Graph::new()
            .with_entities(reached.iter().map(|&i| graph.entities[i].clone()).collect())
            .with_relations(traversed.iter().map(|&i| graph.relations[i].clone()).collect()))
    }
}
