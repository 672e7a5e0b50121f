//! Graph query façade
//!
//! Every operation resolves and authorizes the project first, validates its
//! arguments against [`EngineConfig`], fetches one snapshot and hands it to
//! the synchronous algorithms in `tessera-core`.

use std::sync::Arc;

use tessera_core::limits::{resolve_neighbor_depth, validate_limit, validate_path_depth};
use tessera_core::{
    CentralityAnalyzer, CentralityMeasure, Entity, EntityId, Error, NeighborQuery,
    NeighborResult, PaginatedResults, Path, PathQuery, PathSearchResult, Project, ProjectId,
    Result, Subgraph, TraversalEngine, TraversalStats,
};
use tessera_search::{engine_for, SearchHit};
use tessera_storage::{GraphStore, SnapshotAccessor};

use crate::auth::{Authorizer, OwnerAuthorizer};
use crate::config::EngineConfig;
use crate::requests::{
    CentralityRequest, NeighborsRequest, PathsRequest, SearchRequest, StatisticsRequest,
    ViewRequest,
};
use crate::response::{CentralityResponse, GraphStatistics, GraphView, ProjectSummary};

/// Stateless per-request orchestrator over a [`GraphStore`]
pub struct GraphQueryService {
    store: Arc<dyn GraphStore>,
    authorizer: Arc<dyn Authorizer>,
    config: EngineConfig,
}

impl GraphQueryService {
    /// Service with default limits and owner-based authorization
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self {
            store,
            authorizer: Arc::new(OwnerAuthorizer),
            config: EngineConfig::default(),
        }
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn accessor(&self) -> SnapshotAccessor<'_, dyn GraphStore> {
        SnapshotAccessor::new(self.store.as_ref()).with_page_size(self.config.snapshot_page_size)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Resolution
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve a project id or name and check the caller may read it
    pub async fn require_project(&self, caller: Option<&str>, reference: &str) -> Result<Project> {
        let by_id = match ProjectId::from_string(reference) {
            Ok(id) => self.store.get_project(&id).await?,
            Err(_) => None,
        };
        let project = match by_id {
            Some(project) => project,
            None => self
                .store
                .get_project_by_name(reference)
                .await?
                .ok_or_else(|| Error::ProjectNotFound(reference.to_string()))?,
        };

        self.authorizer.authorize(caller, &project).await?;
        Ok(project)
    }

    /// Entity by id, or by external id when that is unique in the project
    async fn find_entity(&self, project: &Project, reference: &str) -> Result<Option<Entity>> {
        if let Ok(id) = EntityId::from_string(reference) {
            if let Some(entity) = self.store.get_entity(&project.id, &id).await? {
                return Ok(Some(entity));
            }
        }

        let mut matches = self
            .store
            .find_by_external_id(&project.id, reference, 2)
            .await?
            .into_iter();
        match (matches.next(), matches.next()) {
            (None, _) => Ok(None),
            (Some(entity), None) => Ok(Some(entity)),
            (Some(_), Some(_)) => Err(Error::invalid(format!(
                "external id '{}' matches several entities in project '{}'",
                reference, project.name
            ))),
        }
    }

    async fn require_entity(&self, project: &Project, reference: &str) -> Result<Entity> {
        self.find_entity(project, reference)
            .await?
            .ok_or_else(|| Error::EntityNotFound(reference.to_string()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Projects the caller may read
    pub async fn list_projects(&self, caller: Option<&str>) -> Result<Vec<ProjectSummary>> {
        let mut visible = Vec::new();
        for project in self.store.list_projects().await? {
            if self.authorizer.authorize(caller, &project).await.is_ok() {
                visible.push(ProjectSummary::from(&project));
            }
        }
        Ok(visible)
    }

    /// Neighbors of an entity within `depth` hops. An unknown seed yields an empty result.
    pub async fn expand_neighbors(
        &self,
        caller: Option<&str>,
        request: &NeighborsRequest,
    ) -> Result<NeighborResult> {
        let project = self.require_project(caller, &request.project).await?;
        let depth = resolve_neighbor_depth(request.depth, self.config.max_neighbor_depth)?;
        let limit = validate_limit(request.limit, usize::MAX)?;

        let Some(seed) = self.find_entity(&project, &request.entity).await? else {
            tracing::debug!("Seed {} not in project {}", request.entity, project.name);
            return Ok(NeighborResult {
                seed: None,
                depth,
                subgraph: Subgraph::default(),
                truncated: false,
                stats: TraversalStats::default(),
            });
        };

        let snapshot = self
            .accessor()
            .neighborhood_snapshot(&project.id, &seed.id, depth)
            .await?;
        let mut query = NeighborQuery::new(seed.id.clone()).with_depth(depth);
        query.limit = limit;
        let result = TraversalEngine::expand_neighbors(&query, &snapshot);

        tracing::info!(
            "Expanded {} in project {} (depth {}): {} neighbors, {} relations",
            seed.external_id,
            project.name,
            depth,
            result.subgraph.entities.len(),
            result.subgraph.relations.len()
        );
        Ok(result)
    }

    /// Validated path search parameters plus the resolved endpoints
    async fn prepare_paths(
        &self,
        caller: Option<&str>,
        request: &PathsRequest,
    ) -> Result<(Project, PathQuery)> {
        let project = self.require_project(caller, &request.project).await?;
        let max_depth = validate_path_depth(
            request.max_depth.unwrap_or(self.config.default_path_depth),
            self.config.max_path_depth,
        )?;
        let limit = validate_limit(request.limit, self.config.max_path_limit)?
            .unwrap_or(self.config.default_path_limit);

        let (source, target) = futures::try_join!(
            self.require_entity(&project, &request.source),
            self.require_entity(&project, &request.target)
        )?;

        let query = PathQuery::new(source.id, target.id)
            .with_max_depth(max_depth)
            .with_limit(limit);
        Ok((project, query))
    }

    /// Simple paths between two entities, shortest first
    pub async fn find_paths(
        &self,
        caller: Option<&str>,
        request: &PathsRequest,
    ) -> Result<PathSearchResult> {
        let (project, query) = self.prepare_paths(caller, request).await?;
        let snapshot = self
            .accessor()
            .neighborhood_snapshot(&project.id, &query.source, query.max_depth)
            .await?;
        let result = TraversalEngine::find_paths(&query, &snapshot);

        tracing::info!(
            "Path search {} -> {} in project {}: {} paths{}",
            request.source,
            request.target,
            project.name,
            result.paths.len(),
            if result.limit_reached { " (cap reached)" } else { "" }
        );
        Ok(result)
    }

    /// One shortest path between two entities, if any lies within `max_depth`
    pub async fn shortest_path(
        &self,
        caller: Option<&str>,
        request: &PathsRequest,
    ) -> Result<Option<Path>> {
        let (project, query) = self.prepare_paths(caller, request).await?;
        let snapshot = self
            .accessor()
            .neighborhood_snapshot(&project.id, &query.source, query.max_depth)
            .await?;
        let path =
            TraversalEngine::shortest_path(&query.source, &query.target, query.max_depth, &snapshot);

        tracing::info!(
            "Shortest path {} -> {} in project {}: {}",
            request.source,
            request.target,
            project.name,
            path.as_ref()
                .map_or("none".to_string(), |p| format!("length {}", p.length))
        );
        Ok(path)
    }

    /// Entities ranked by a centrality measure over the whole project
    pub async fn rank_by_centrality(
        &self,
        caller: Option<&str>,
        request: &CentralityRequest,
    ) -> Result<CentralityResponse> {
        let project = self.require_project(caller, &request.project).await?;
        let measure: CentralityMeasure = request.measure.parse()?;
        let top_n = validate_limit(request.limit, usize::MAX)?
            .unwrap_or(self.config.default_rank_limit);

        let snapshot = self.accessor().project_snapshot(&project.id).await?;
        let entity_count = snapshot.entity_count();
        if measure == CentralityMeasure::Betweenness
            && entity_count > self.config.max_betweenness_entities
        {
            tracing::warn!(
                "Refusing betweenness on project {}: {} entities (max {})",
                project.name,
                entity_count,
                self.config.max_betweenness_entities
            );
            return Err(Error::TooLarge {
                entities: entity_count,
                max: self.config.max_betweenness_entities,
            });
        }

        let results =
            CentralityAnalyzer::rank(measure, snapshot.entities(), snapshot.relations(), Some(top_n));

        tracing::info!(
            "Ranked project {} by {} ({} entities, top {})",
            project.name,
            measure,
            entity_count,
            results.len()
        );
        Ok(CentralityResponse {
            measure,
            entity_count,
            results,
        })
    }

    /// Text and filter search over the project's entities, one page at a time
    pub async fn search_entities(
        &self,
        caller: Option<&str>,
        request: &SearchRequest,
    ) -> Result<PaginatedResults<SearchHit>> {
        let project = self.require_project(caller, &request.project).await?;
        let query = request.to_query(self.config.default_page_size)?;

        let entities = self.accessor().entities(&project.id, None).await?;
        let hits = engine_for(query.mode).search(&query, &entities).await?;

        tracing::info!(
            "Search {:?} ({:?}) in project {}: {} hits",
            query.search_text(),
            query.mode,
            project.name,
            hits.len()
        );
        Ok(PaginatedResults::from_full(hits, &query.pagination))
    }

    pub async fn graph_statistics(
        &self,
        caller: Option<&str>,
        request: &StatisticsRequest,
    ) -> Result<GraphStatistics> {
        let project = self.require_project(caller, &request.project).await?;
        let snapshot = self.accessor().project_snapshot(&project.id).await?;
        Ok(GraphStatistics::compute(
            &project,
            snapshot.entities(),
            snapshot.relations(),
        ))
    }

    /// Node/edge view centered on an entity, or of the first entities of the project
    pub async fn visualize(&self, caller: Option<&str>, request: &ViewRequest) -> Result<GraphView> {
        let project = self.require_project(caller, &request.project).await?;
        let node_limit = validate_limit(request.node_limit, self.config.max_view_nodes)?
            .unwrap_or(self.config.default_view_nodes);
        let type_matches = |e: &Entity| {
            request
                .entity_type
                .as_deref()
                .map_or(true, |t| e.entity_type.as_str() == t)
        };

        let view = match &request.center {
            Some(center) => {
                let center = self.require_entity(&project, center).await?;
                let depth = resolve_neighbor_depth(request.depth, self.config.max_neighbor_depth)?;
                let snapshot = self
                    .accessor()
                    .neighborhood_snapshot(&project.id, &center.id, depth)
                    .await?;

                let query = NeighborQuery::new(center.id.clone()).with_depth(depth);
                let result = TraversalEngine::expand_neighbors(&query, &snapshot);
                let nodes: Vec<&Entity> = std::iter::once(&center)
                    .chain(result.subgraph.entities.iter().filter(|e| type_matches(e)))
                    .take(node_limit)
                    .collect();
                GraphView::build(&nodes, &result.subgraph.relations)
            }
            None => {
                let snapshot = self.accessor().project_snapshot(&project.id).await?;
                let nodes: Vec<&Entity> = snapshot
                    .entities()
                    .iter()
                    .filter(|e| type_matches(e))
                    .take(node_limit)
                    .collect();
                GraphView::build(&nodes, snapshot.relations())
            }
        };

        tracing::info!(
            "View of project {}: {} nodes, {} edges",
            project.name,
            view.nodes.len(),
            view.edges.len()
        );
        Ok(view)
    }
}
