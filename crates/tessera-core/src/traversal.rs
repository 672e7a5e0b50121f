//! Graph traversal: bounded neighbor expansion and path discovery

use crate::entity::{Entity, EntityId};
use crate::graph::{GraphSnapshot, Subgraph};
use crate::limits::{DEFAULT_NEIGHBOR_DEPTH, DEFAULT_PATH_LIMIT};
use crate::relation::{Direction, Relation, RelationId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Neighbor expansion query builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborQuery {
    /// Seed entity
    pub seed: EntityId,

    /// Maximum hops from the seed (0 means the default of 1)
    #[serde(default)]
    pub depth: u32,

    /// Truncate the neighbor list after traversal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl NeighborQuery {
    pub fn new(seed: EntityId) -> Self {
        Self {
            seed,
            depth: DEFAULT_NEIGHBOR_DEPTH,
            limit: None,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn effective_depth(&self) -> u32 {
        if self.depth == 0 {
            DEFAULT_NEIGHBOR_DEPTH
        } else {
            self.depth
        }
    }
}

/// Path search query builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathQuery {
    pub source: EntityId,
    pub target: EntityId,

    /// Maximum number of relations in a path
    pub max_depth: u32,

    /// Maximum paths to collect (defaults to [`DEFAULT_PATH_LIMIT`])
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl PathQuery {
    pub fn new(source: EntityId, target: EntityId) -> Self {
        Self {
            source,
            target,
            max_depth: crate::limits::DEFAULT_PATH_DEPTH,
            limit: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PATH_LIMIT)
    }
}

/// Relation that led into a path step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdge {
    pub relation_id: RelationId,
    pub relation_type: String,
    pub direction: Direction,
}

impl PathEdge {
    fn from_relation(relation: &Relation, direction: Direction) -> Self {
        Self {
            relation_id: relation.id.clone(),
            relation_type: relation.relation_type.clone(),
            direction,
        }
    }
}

/// One step of a path: an entity plus the relation that reached it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathStep {
    pub entity: Entity,

    /// `None` for the first step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via: Option<PathEdge>,
}

/// A simple path through the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Path {
    pub steps: Vec<PathStep>,

    /// Number of relations (`steps.len() - 1`)
    pub length: usize,
}

impl Path {
    pub fn single(entity: Entity) -> Self {
        Self {
            steps: vec![PathStep { entity, via: None }],
            length: 0,
        }
    }

    fn from_hops(hops: &[(&Entity, Option<(&Relation, Direction)>)]) -> Self {
        let steps: Vec<PathStep> = hops
            .iter()
            .map(|(entity, via)| PathStep {
                entity: (*entity).clone(),
                via: via.map(|(rel, dir)| PathEdge::from_relation(rel, dir)),
            })
            .collect();
        Self {
            length: steps.len().saturating_sub(1),
            steps,
        }
    }

    pub fn entity_ids(&self) -> Vec<&EntityId> {
        self.steps.iter().map(|s| &s.entity.id).collect()
    }

    pub fn relation_types(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|s| s.via.as_ref().map(|e| e.relation_type.as_str()))
            .collect()
    }
}

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub edges_traversed: usize,
    pub max_depth_reached: u32,
}

/// Result of a neighbor expansion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborResult {
    /// The seed entity, when it exists in the snapshot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<Entity>,

    /// Effective depth used
    pub depth: u32,

    /// Neighbors (seed excluded) and the relations traversed
    #[serde(flatten)]
    pub subgraph: Subgraph,

    /// Whether the neighbor list was cut by the limit
    pub truncated: bool,

    pub stats: TraversalStats,
}

/// Result of a path search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSearchResult {
    /// Paths ordered by length, ties in discovery order
    pub paths: Vec<Path>,

    /// Whether more paths existed past the cap and were left out
    pub limit_reached: bool,

    pub stats: TraversalStats,
}

/// Graph traversal engine
pub struct TraversalEngine;

impl TraversalEngine {
    /// Breadth-first expansion around a seed, relations walked in both directions.
    ///
    /// The full depth-bounded BFS always runs; `limit` only truncates the
    /// neighbor list afterwards (BFS discovery order). Relations whose far
    /// endpoint was truncated away are returned as boundary relations.
    pub fn expand_neighbors(query: &NeighborQuery, snapshot: &GraphSnapshot) -> NeighborResult {
        let depth = query.effective_depth();
        tracing::debug!(
            "Expanding neighbors: seed={}, depth={}, limit={:?}",
            query.seed,
            depth,
            query.limit
        );

        let mut stats = TraversalStats::default();

        let Some(seed) = snapshot.entity(&query.seed) else {
            tracing::debug!("Seed {} not in snapshot", query.seed);
            return NeighborResult {
                seed: None,
                depth,
                subgraph: Subgraph::default(),
                truncated: false,
                stats,
            };
        };

        let mut visited: HashSet<&EntityId> = HashSet::new();
        let mut seen_relations: HashSet<&RelationId> = HashSet::new();
        let mut neighbors: Vec<&Entity> = Vec::new();
        let mut relations: Vec<&Relation> = Vec::new();
        let mut frontier: Vec<&EntityId> = vec![&seed.id];
        visited.insert(&seed.id);

        for level in 0..depth {
            if frontier.is_empty() {
                break;
            }
            let mut next_frontier = Vec::new();

            for current in frontier {
                stats.nodes_visited += 1;

                for rel in snapshot.incident(current) {
                    stats.edges_traversed += 1;

                    let Some((other, _)) = rel.walk_from(current) else {
                        continue;
                    };
                    let Some(other_entity) = snapshot.entity(other) else {
                        continue;
                    };

                    if seen_relations.insert(&rel.id) {
                        relations.push(rel);
                    }
                    if visited.insert(other) {
                        neighbors.push(other_entity);
                        next_frontier.push(other);
                    }
                }
            }

            if !next_frontier.is_empty() {
                stats.max_depth_reached = level + 1;
            }
            frontier = next_frontier;
        }

        let truncated = query.limit.is_some_and(|limit| neighbors.len() > limit);
        if let Some(limit) = query.limit {
            neighbors.truncate(limit);
        }

        let kept: HashSet<&EntityId> = neighbors
            .iter()
            .map(|e| &e.id)
            .chain(std::iter::once(&seed.id))
            .collect();
        let (inner, boundary): (Vec<&Relation>, Vec<&Relation>) = relations
            .into_iter()
            .partition(|r| kept.contains(&r.source_id) && kept.contains(&r.target_id));

        tracing::debug!(
            "Neighbor expansion reached {} entities, {} relations ({} boundary)",
            neighbors.len(),
            inner.len(),
            boundary.len()
        );

        NeighborResult {
            seed: Some(seed.clone()),
            depth,
            subgraph: Subgraph {
                entities: neighbors.into_iter().cloned().collect(),
                relations: inner.into_iter().cloned().collect(),
                boundary_relations: boundary.into_iter().cloned().collect(),
            },
            truncated,
            stats,
        }
    }

    /// Enumerate simple paths by depth-limited DFS, relations walked in both directions.
    ///
    /// Stops at the first path past the cap; the kept paths are stably
    /// sorted by length.
    pub fn find_paths(query: &PathQuery, snapshot: &GraphSnapshot) -> PathSearchResult {
        let limit = query.effective_limit();
        tracing::debug!(
            "Finding paths: source={}, target={}, max_depth={}, limit={}",
            query.source,
            query.target,
            query.max_depth,
            limit
        );

        let (Some(source), Some(_)) = (snapshot.entity(&query.source), snapshot.entity(&query.target))
        else {
            return PathSearchResult {
                paths: Vec::new(),
                limit_reached: false,
                stats: TraversalStats::default(),
            };
        };

        if query.source == query.target {
            return PathSearchResult {
                paths: vec![Path::single(source.clone())],
                limit_reached: false,
                stats: TraversalStats {
                    nodes_visited: 1,
                    ..Default::default()
                },
            };
        }

        let mut search = PathSearch {
            snapshot,
            target: &query.target,
            max_depth: query.max_depth as usize,
            limit,
            on_path: HashSet::from([&source.id]),
            hops: vec![(source, None)],
            found: Vec::new(),
            truncated: false,
            stats: TraversalStats::default(),
        };
        search.walk(&source.id);

        let limit_reached = search.truncated;
        let mut paths = search.found;
        paths.sort_by_key(|p| p.length);

        tracing::debug!(
            "Path search found {} paths (visited {} nodes, {} edges)",
            paths.len(),
            search.stats.nodes_visited,
            search.stats.edges_traversed
        );

        PathSearchResult {
            paths,
            limit_reached,
            stats: search.stats,
        }
    }

    /// BFS for a single unweighted shortest path; the first parent discovered wins
    pub fn shortest_path(
        source: &EntityId,
        target: &EntityId,
        max_depth: u32,
        snapshot: &GraphSnapshot,
    ) -> Option<Path> {
        let start = snapshot.entity(source)?;
        snapshot.entity(target)?;
        if source == target {
            return Some(Path::single(start.clone()));
        }

        let mut visited: HashSet<&EntityId> = HashSet::from([&start.id]);
        let mut parent: HashMap<&EntityId, (&EntityId, &Relation, Direction)> = HashMap::new();
        let mut queue: VecDeque<(&EntityId, u32)> = VecDeque::from([(&start.id, 0)]);
        let mut found = false;

        'search: while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for rel in snapshot.incident(current) {
                let Some((next, direction)) = rel.walk_from(current) else {
                    continue;
                };
                if !visited.insert(next) {
                    continue;
                }
                parent.insert(next, (current, rel, direction));
                if next == target {
                    found = true;
                    break 'search;
                }
                queue.push_back((next, depth + 1));
            }
        }

        if !found {
            tracing::debug!("No path from {} to {} within {} hops", source, target, max_depth);
            return None;
        }
        Self::reconstruct_path(&start.id, target, &parent, snapshot)
    }

    /// Reconstruct path from parent map
    fn reconstruct_path<'a>(
        start: &EntityId,
        end: &'a EntityId,
        parent: &HashMap<&'a EntityId, (&'a EntityId, &'a Relation, Direction)>,
        snapshot: &'a GraphSnapshot,
    ) -> Option<Path> {
        let mut hops = vec![(snapshot.entity(end)?, None)];
        let mut current = end;

        while current != start {
            let &(prev, rel, dir) = parent.get(current)?;
            if let Some(last) = hops.last_mut() {
                last.1 = Some((rel, dir));
            }
            hops.push((snapshot.entity(prev)?, None));
            current = prev;
        }

        hops.reverse();
        Some(Path::from_hops(&hops))
    }
}

type Hop<'a> = (&'a Entity, Option<(&'a Relation, Direction)>);

/// Depth-first simple path enumeration state
struct PathSearch<'a> {
    snapshot: &'a GraphSnapshot,
    target: &'a EntityId,
    max_depth: usize,
    limit: usize,
    on_path: HashSet<&'a EntityId>,
    hops: Vec<Hop<'a>>,
    found: Vec<Path>,
    /// Set once a path beyond `limit` turns up; the walk stops there
    truncated: bool,
    stats: TraversalStats,
}

impl<'a> PathSearch<'a> {
    fn walk(&mut self, current: &'a EntityId) {
        self.stats.nodes_visited += 1;
        let length = self.hops.len() - 1;
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(length as u32);

        if current == self.target {
            if self.found.len() >= self.limit {
                self.truncated = true;
            } else {
                self.found.push(Path::from_hops(&self.hops));
            }
            return;
        }
        if length >= self.max_depth {
            return;
        }

        let snapshot = self.snapshot;
        for rel in snapshot.incident(current) {
            if self.truncated {
                return;
            }
            self.stats.edges_traversed += 1;

            let Some((next, direction)) = rel.walk_from(current) else {
                continue;
            };
            if self.on_path.contains(next) {
                continue;
            }
            let Some(next_entity) = snapshot.entity(next) else {
                continue;
            };

            self.on_path.insert(next);
            self.hops.push((next_entity, Some((rel, direction))));
            self.walk(next);
            self.hops.pop();
            self.on_path.remove(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;
    use crate::project::ProjectId;

    struct Fixture {
        snapshot: GraphSnapshot,
        ids: HashMap<&'static str, EntityId>,
    }

    impl Fixture {
        fn id(&self, name: &str) -> EntityId {
            self.ids[name].clone()
        }

        fn names(&self, ids: &[&EntityId]) -> Vec<String> {
            ids.iter()
                .map(|id| self.snapshot.entity(id).unwrap().external_id.clone())
                .collect()
        }
    }

    fn fixture(names: &[&'static str], edges: &[(&str, &str, &str)]) -> Fixture {
        let project_id = ProjectId::new();
        let mut ids = HashMap::new();
        let entities: Vec<Entity> = names
            .iter()
            .map(|name| {
                let entity = Entity::new(project_id.clone(), *name, "node");
                ids.insert(*name, entity.id.clone());
                entity
            })
            .collect();
        let relations = edges
            .iter()
            .map(|(from, to, kind)| {
                Relation::new(project_id.clone(), ids[*from].clone(), ids[*to].clone(), *kind)
            })
            .collect();
        let graph = Graph::new().with_entities(entities).with_relations(relations);
        Fixture {
            snapshot: GraphSnapshot::new(project_id, graph),
            ids,
        }
    }

    fn chain() -> Fixture {
        fixture(
            &["A", "B", "C", "D"],
            &[("A", "B", "LINK"), ("B", "C", "LINK"), ("C", "D", "LINK")],
        )
    }

    fn entity_names(result: &NeighborResult) -> Vec<&str> {
        result
            .subgraph
            .entities
            .iter()
            .map(|e| e.external_id.as_str())
            .collect()
    }

    #[test]
    fn test_chain_expansion_depth_two() {
        let f = chain();
        let query = NeighborQuery::new(f.id("A")).with_depth(2);
        let result = TraversalEngine::expand_neighbors(&query, &f.snapshot);

        assert_eq!(entity_names(&result), vec!["B", "C"]);
        assert_eq!(result.subgraph.relations.len(), 2);
        assert!(result.subgraph.boundary_relations.is_empty());
        assert!(result.subgraph.is_closed_over(&[&f.id("A")]));
        assert_eq!(result.stats.max_depth_reached, 2);
        assert!(!result.truncated);
    }

    #[test]
    fn test_expansion_ignores_direction() {
        let f = chain();
        let query = NeighborQuery::new(f.id("C")).with_depth(1);
        let result = TraversalEngine::expand_neighbors(&query, &f.snapshot);

        assert_eq!(entity_names(&result), vec!["B", "D"]);
    }

    #[test]
    fn test_zero_depth_defaults_to_one() {
        let f = chain();
        let query = NeighborQuery::new(f.id("A")).with_depth(0);
        let result = TraversalEngine::expand_neighbors(&query, &f.snapshot);

        assert_eq!(result.depth, 1);
        assert_eq!(entity_names(&result), vec!["B"]);
    }

    #[test]
    fn test_missing_seed_yields_empty_result() {
        let f = chain();
        let query = NeighborQuery::new(EntityId::new()).with_depth(3);
        let result = TraversalEngine::expand_neighbors(&query, &f.snapshot);

        assert!(result.seed.is_none());
        assert!(result.subgraph.is_empty());
    }

    #[test]
    fn test_limit_truncates_after_full_traversal() {
        // Star around hub H with a tail behind X
        let f = fixture(
            &["H", "X", "Y", "Z", "T"],
            &[
                ("H", "X", "LINK"),
                ("H", "Y", "LINK"),
                ("Z", "H", "LINK"),
                ("X", "T", "LINK"),
            ],
        );
        let query = NeighborQuery::new(f.id("H")).with_depth(2).with_limit(2);
        let result = TraversalEngine::expand_neighbors(&query, &f.snapshot);

        assert!(result.truncated);
        assert_eq!(entity_names(&result), vec!["X", "Y"]);
        assert!(result.subgraph.is_closed_over(&[&f.id("H")]));
        // H-Z and X-T point at truncated entities
        assert_eq!(result.subgraph.relations.len(), 2);
        assert_eq!(result.subgraph.boundary_relations.len(), 2);
    }

    #[test]
    fn test_multigraph_relations_deduplicated_by_id() {
        let f = fixture(
            &["A", "B"],
            &[("A", "B", "OWNS"), ("B", "A", "SUPPLIES"), ("A", "B", "OWNS")],
        );
        let query = NeighborQuery::new(f.id("A")).with_depth(3);
        let result = TraversalEngine::expand_neighbors(&query, &f.snapshot);

        assert_eq!(entity_names(&result), vec!["B"]);
        assert_eq!(result.subgraph.relations.len(), 3);
    }

    #[test]
    fn test_chain_single_path() {
        let f = chain();
        let query = PathQuery::new(f.id("A"), f.id("D")).with_max_depth(3);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        assert_eq!(result.paths.len(), 1);
        let path = &result.paths[0];
        assert_eq!(path.length, 3);
        assert_eq!(f.names(&path.entity_ids()), vec!["A", "B", "C", "D"]);
        assert!(path.steps[0].via.is_none());
        assert_eq!(path.relation_types(), vec!["LINK", "LINK", "LINK"]);
    }

    #[test]
    fn test_path_respects_max_depth() {
        let f = chain();
        let query = PathQuery::new(f.id("A"), f.id("D")).with_max_depth(2);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        assert!(result.paths.is_empty());
    }

    #[test]
    fn test_same_source_and_target() {
        let f = chain();
        let query = PathQuery::new(f.id("B"), f.id("B")).with_max_depth(4);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        assert_eq!(result.paths.len(), 1);
        assert_eq!(result.paths[0].length, 0);
        assert_eq!(result.paths[0].steps.len(), 1);
    }

    #[test]
    fn test_disconnected_yields_no_paths() {
        let f = fixture(&["A", "B"], &[]);
        let query = PathQuery::new(f.id("A"), f.id("B")).with_max_depth(5);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        assert!(result.paths.is_empty());
        assert!(!result.limit_reached);
    }

    #[test]
    fn test_paths_ranked_shortest_first() {
        // A-B-C-D plus a shortcut A-D discovered last
        let f = fixture(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", "LINK"),
                ("B", "C", "LINK"),
                ("C", "D", "LINK"),
                ("D", "A", "SHORTCUT"),
            ],
        );
        let query = PathQuery::new(f.id("A"), f.id("D")).with_max_depth(3);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        let lengths: Vec<usize> = result.paths.iter().map(|p| p.length).collect();
        assert_eq!(lengths, vec![1, 3]);
        assert_eq!(
            result.paths[0].steps[1].via.as_ref().map(|e| e.direction),
            Some(Direction::Incoming)
        );
    }

    #[test]
    fn test_parallel_relations_give_distinct_paths() {
        let f = fixture(&["A", "B"], &[("A", "B", "OWNS"), ("A", "B", "CONTROLS")]);
        let query = PathQuery::new(f.id("A"), f.id("B")).with_max_depth(1);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        let types: Vec<Vec<&str>> = result.paths.iter().map(|p| p.relation_types()).collect();
        assert_eq!(types, vec![vec!["OWNS"], vec!["CONTROLS"]]);
    }

    #[test]
    fn test_path_cap_applies() {
        // Complete graph on 6 nodes has many simple paths between any pair
        let names = ["A", "B", "C", "D", "E", "F"];
        let mut edges = Vec::new();
        for (i, from) in names.iter().enumerate() {
            for to in &names[i + 1..] {
                edges.push((*from, *to, "LINK"));
            }
        }
        let f = fixture(&names, &edges);
        let query = PathQuery::new(f.id("A"), f.id("F"))
            .with_max_depth(5)
            .with_limit(7);
        let result = TraversalEngine::find_paths(&query, &f.snapshot);

        assert_eq!(result.paths.len(), 7);
        assert!(result.limit_reached);

        let uncapped = PathQuery::new(f.id("A"), f.id("F")).with_max_depth(5);
        let result = TraversalEngine::find_paths(&uncapped, &f.snapshot);
        assert_eq!(result.paths.len(), DEFAULT_PATH_LIMIT);
        assert!(result.limit_reached);
    }

    #[test]
    fn test_exact_path_count_not_truncated() {
        let f = fixture(&["A", "B"], &[("A", "B", "OWNS"), ("A", "B", "CONTROLS")]);

        let exact = PathQuery::new(f.id("A"), f.id("B"))
            .with_max_depth(1)
            .with_limit(2);
        let result = TraversalEngine::find_paths(&exact, &f.snapshot);
        assert_eq!(result.paths.len(), 2);
        assert!(!result.limit_reached);

        let short = PathQuery::new(f.id("A"), f.id("B"))
            .with_max_depth(1)
            .with_limit(1);
        let result = TraversalEngine::find_paths(&short, &f.snapshot);
        assert_eq!(result.paths.len(), 1);
        assert!(result.limit_reached);
    }

    #[test]
    fn test_shortest_path_prefers_first_discovered() {
        // Diamond: A-B-D and A-C-D; B is discovered before C
        let f = fixture(
            &["A", "B", "C", "D"],
            &[
                ("A", "B", "LINK"),
                ("A", "C", "LINK"),
                ("B", "D", "LINK"),
                ("C", "D", "LINK"),
            ],
        );
        let path = TraversalEngine::shortest_path(&f.id("A"), &f.id("D"), 5, &f.snapshot).unwrap();

        assert_eq!(path.length, 2);
        assert_eq!(f.names(&path.entity_ids()), vec!["A", "B", "D"]);
    }

    #[test]
    fn test_shortest_path_depth_bound() {
        let f = chain();
        assert!(TraversalEngine::shortest_path(&f.id("A"), &f.id("D"), 2, &f.snapshot).is_none());
        let path = TraversalEngine::shortest_path(&f.id("D"), &f.id("A"), 3, &f.snapshot).unwrap();
        assert_eq!(f.names(&path.entity_ids()), vec!["D", "C", "B", "A"]);
        assert!(path
            .steps
            .iter()
            .skip(1)
            .all(|s| s.via.as_ref().map(|e| e.direction) == Some(Direction::Incoming)));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn random_graph() -> impl Strategy<Value = (GraphSnapshot, Vec<EntityId>)> {
            (1usize..10).prop_flat_map(|n| {
                prop::collection::vec((0..n, 0..n), 0..20).prop_map(move |edges| {
                    let project_id = ProjectId::new();
                    let entities: Vec<Entity> = (0..n)
                        .map(|i| Entity::new(project_id.clone(), format!("n{}", i), "node"))
                        .collect();
                    let ids: Vec<EntityId> = entities.iter().map(|e| e.id.clone()).collect();
                    let relations = edges
                        .iter()
                        .map(|(a, b)| {
                            Relation::new(project_id.clone(), ids[*a].clone(), ids[*b].clone(), "LINK")
                        })
                        .collect();
                    let graph = Graph::new().with_entities(entities).with_relations(relations);
                    (GraphSnapshot::new(project_id, graph), ids)
                })
            })
        }

        proptest! {
            #[test]
            fn expansion_grows_with_depth((snapshot, ids) in random_graph(), depth in 1u32..4) {
                let seed = ids[0].clone();
                let shallow = TraversalEngine::expand_neighbors(
                    &NeighborQuery::new(seed.clone()).with_depth(depth), &snapshot);
                let deep = TraversalEngine::expand_neighbors(
                    &NeighborQuery::new(seed.clone()).with_depth(depth + 1), &snapshot);

                let deep_ids = deep.subgraph.entity_ids();
                prop_assert!(shallow.subgraph.entity_ids().is_subset(&deep_ids));
                prop_assert!(!deep_ids.contains(&seed));
                prop_assert!(deep.subgraph.is_closed_over(&[&seed]));
            }

            #[test]
            fn paths_are_simple_and_bounded(
                (snapshot, ids) in random_graph(),
                target in 0usize..10,
                max_depth in 1u32..5,
            ) {
                let target = ids[target % ids.len()].clone();
                let query = PathQuery::new(ids[0].clone(), target.clone())
                    .with_max_depth(max_depth)
                    .with_limit(20);
                let result = TraversalEngine::find_paths(&query, &snapshot);

                prop_assert!(result.paths.len() <= 20);
                for path in &result.paths {
                    let nodes = path.entity_ids();
                    let distinct: HashSet<_> = nodes.iter().collect();
                    prop_assert_eq!(distinct.len(), nodes.len());
                    prop_assert!(path.length <= max_depth as usize);
                    prop_assert_eq!(path.length, path.steps.len() - 1);
                    prop_assert_eq!(nodes.first().copied(), Some(&ids[0]));
                    prop_assert_eq!(nodes.last().copied(), Some(&target));
                }
                for pair in result.paths.windows(2) {
                    prop_assert!(pair[0].length <= pair[1].length);
                }
            }

            #[test]
            fn limit_reached_only_when_paths_were_left_out(
                (snapshot, ids) in random_graph(),
                target in 0usize..10,
                limit in 1usize..6,
            ) {
                let target = ids[target % ids.len()].clone();
                let capped = PathQuery::new(ids[0].clone(), target.clone())
                    .with_max_depth(4)
                    .with_limit(limit);
                let wide = capped.clone().with_limit(crate::limits::MAX_PATH_LIMIT);

                let capped = TraversalEngine::find_paths(&capped, &snapshot);
                let wide = TraversalEngine::find_paths(&wide, &snapshot);
                prop_assume!(!wide.limit_reached);

                prop_assert_eq!(capped.limit_reached, wide.paths.len() > limit);
                prop_assert_eq!(capped.paths.len(), wide.paths.len().min(limit));
            }
        }
    }
}
