//! Graph containers: raw store fetches, indexed snapshots and subgraph results

use crate::entity::{Entity, EntityId};
use crate::project::ProjectId;
use crate::relation::{Relation, RelationId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Entities and relations as handed over by a store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }
}

/// Immutable, indexed view of one project's graph for a single request.
///
/// Built once per request and never shared. Entities and relations belonging
/// to another project are dropped on construction, as are duplicate ids (first
/// occurrence wins). Only relations whose endpoints are both known entities
/// take part in traversal.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    project_id: ProjectId,
    entities: Vec<Entity>,
    relations: Vec<Relation>,
    index: HashMap<EntityId, usize>,
    incident: HashMap<EntityId, Vec<usize>>,
}

impl GraphSnapshot {
    pub fn new(project_id: ProjectId, graph: Graph) -> Self {
        let mut entities = Vec::with_capacity(graph.entities.len());
        let mut index = HashMap::with_capacity(graph.entities.len());
        for entity in graph.entities {
            if entity.project_id != project_id {
                tracing::debug!("Dropping entity {} from foreign project", entity.id);
                continue;
            }
            if index.contains_key(&entity.id) {
                continue;
            }
            index.insert(entity.id.clone(), entities.len());
            entities.push(entity);
        }

        let mut relations = Vec::with_capacity(graph.relations.len());
        let mut seen: HashSet<RelationId> = HashSet::with_capacity(graph.relations.len());
        let mut incident: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for relation in graph.relations {
            if relation.project_id != project_id || !seen.insert(relation.id.clone()) {
                continue;
            }
            let pos = relations.len();
            if index.contains_key(&relation.source_id) && index.contains_key(&relation.target_id) {
                incident.entry(relation.source_id.clone()).or_default().push(pos);
                if !relation.is_self_loop() {
                    incident.entry(relation.target_id.clone()).or_default().push(pos);
                }
            }
            relations.push(relation);
        }

        Self {
            project_id,
            entities,
            relations,
            index,
            incident,
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.index.get(id).map(|&i| &self.entities[i])
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Relations touching `id` in either direction, in snapshot order
    pub fn incident(&self, id: &EntityId) -> impl Iterator<Item = &Relation> + '_ {
        self.incident
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.relations[i])
    }
}

/// Deduplicated entity and relation set produced by a traversal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subgraph {
    pub entities: Vec<Entity>,
    pub relations: Vec<Relation>,

    /// Relations cut off by result truncation; one endpoint is missing from `entities`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boundary_relations: Vec<Relation>,
}

impl Subgraph {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.relations.is_empty()
    }

    pub fn entity_ids(&self) -> HashSet<&EntityId> {
        self.entities.iter().map(|e| &e.id).collect()
    }

    /// Every relation has both endpoints among `entities` or `extra`
    pub fn is_closed_over(&self, extra: &[&EntityId]) -> bool {
        let mut ids = self.entity_ids();
        ids.extend(extra.iter().copied());
        self.relations
            .iter()
            .all(|r| ids.contains(&r.source_id) && ids.contains(&r.target_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder() {
        let graph = Graph::new().with_entities(vec![]).with_relations(vec![]);

        assert!(graph.entities.is_empty());
        assert!(graph.relations.is_empty());
    }

    #[test]
    fn test_snapshot_drops_foreign_and_duplicate_records() {
        let project = ProjectId::new();
        let other = ProjectId::new();
        let a = Entity::new(project.clone(), "a", "node");
        let b = Entity::new(project.clone(), "b", "node");
        let foreign = Entity::new(other.clone(), "x", "node");
        let ab = Relation::new(project.clone(), a.id.clone(), b.id.clone(), "LINK");
        let foreign_rel = Relation::new(other, a.id.clone(), foreign.id.clone(), "LINK");

        let graph = Graph::new()
            .with_entities(vec![a.clone(), b.clone(), a.clone(), foreign.clone()])
            .with_relations(vec![ab.clone(), ab.clone(), foreign_rel]);
        let snapshot = GraphSnapshot::new(project, graph);

        assert_eq!(snapshot.entity_count(), 2);
        assert_eq!(snapshot.relation_count(), 1);
        assert!(!snapshot.contains(&foreign.id));
        assert_eq!(snapshot.incident(&a.id).count(), 1);
        assert_eq!(snapshot.incident(&b.id).count(), 1);
    }

    #[test]
    fn test_incident_skips_dangling_relations() {
        let project = ProjectId::new();
        let a = Entity::new(project.clone(), "a", "node");
        let dangling = Relation::new(project.clone(), a.id.clone(), EntityId::new(), "LINK");
        let self_loop = Relation::new(project.clone(), a.id.clone(), a.id.clone(), "SELF");

        let graph = Graph::new()
            .with_entities(vec![a.clone()])
            .with_relations(vec![dangling, self_loop.clone()]);
        let snapshot = GraphSnapshot::new(project, graph);

        let incident: Vec<_> = snapshot.incident(&a.id).map(|r| r.id.clone()).collect();
        assert_eq!(incident, vec![self_loop.id]);
        assert_eq!(snapshot.relation_count(), 2);
    }
}
