//! Response shapes that have no direct core counterpart

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tessera_core::{
    CentralityMeasure, CentralityResult, Entity, EntityId, Project, ProjectId, Properties,
    Relation, RelationId,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl From<&Project> for ProjectSummary {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            description: p.description.clone(),
            owner: p.owner.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralityResponse {
    pub measure: CentralityMeasure,
    /// Entities scored, before truncation
    pub entity_count: usize,
    pub results: Vec<CentralityResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub type_name: String,
    pub count: usize,
}

/// Counts and type distributions of one project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub project: String,
    pub entity_count: usize,
    pub relation_count: usize,
    /// Distinct entity types, sorted
    pub entity_types: Vec<String>,
    /// Count descending, then type name
    pub entity_type_distribution: Vec<TypeCount>,
    pub relation_type_distribution: Vec<TypeCount>,
}

impl GraphStatistics {
    pub fn compute(project: &Project, entities: &[Entity], relations: &[Relation]) -> Self {
        let entity_type_distribution =
            distribution(entities.iter().map(|e| e.entity_type.as_str()));
        let mut entity_types: Vec<String> = entity_type_distribution
            .iter()
            .map(|t| t.type_name.clone())
            .collect();
        entity_types.sort();

        Self {
            project: project.name.clone(),
            entity_count: entities.len(),
            relation_count: relations.len(),
            entity_types,
            entity_type_distribution,
            relation_type_distribution: distribution(
                relations.iter().map(|r| r.relation_type.as_str()),
            ),
        }
    }
}

fn distribution<'a>(types: impl Iterator<Item = &'a str>) -> Vec<TypeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for t in types {
        *counts.entry(t).or_default() += 1;
    }
    let mut out: Vec<TypeCount> = counts
        .into_iter()
        .map(|(type_name, count)| TypeCount {
            type_name: type_name.to_string(),
            count,
        })
        .collect();
    // BTreeMap order makes the name tie-break implicit
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewNode {
    pub id: EntityId,
    pub label: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Index into [`GraphView::categories`]
    pub category: usize,
    /// Edges touching this node within the view
    pub degree: usize,
    #[serde(skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEdge {
    pub id: RelationId,
    pub source: EntityId,
    pub target: EntityId,
    #[serde(rename = "type")]
    pub relation_type: String,
}

/// Node/edge view for graph renderers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<ViewNode>,
    pub edges: Vec<ViewEdge>,
    /// Sorted distinct entity types of the nodes
    pub categories: Vec<String>,
}

impl GraphView {
    /// Build a view of `entities`, keeping only relations with both ends present
    pub fn build(entities: &[&Entity], relations: &[Relation]) -> Self {
        let present: HashMap<&EntityId, usize> = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (&e.id, i))
            .collect();

        let mut degree = vec![0usize; entities.len()];
        let mut edges = Vec::new();
        for relation in relations {
            let (Some(&s), Some(&t)) = (present.get(&relation.source_id), present.get(&relation.target_id))
            else {
                continue;
            };
            degree[s] += 1;
            degree[t] += 1;
            edges.push(ViewEdge {
                id: relation.id.clone(),
                source: relation.source_id.clone(),
                target: relation.target_id.clone(),
                relation_type: relation.relation_type.clone(),
            });
        }

        let mut categories: Vec<String> = entities
            .iter()
            .map(|e| e.entity_type.as_str().to_string())
            .collect();
        categories.sort();
        categories.dedup();

        let nodes = entities
            .iter()
            .zip(degree)
            .map(|(e, degree)| ViewNode {
                id: e.id.clone(),
                label: e.display_name().to_string(),
                entity_type: e.entity_type.as_str().to_string(),
                category: categories
                    .binary_search_by(|c| c.as_str().cmp(e.entity_type.as_str()))
                    .unwrap_or_default(),
                degree,
                properties: e.properties.clone(),
            })
            .collect();

        Self {
            nodes,
            edges,
            categories,
        }
    }
}
