//! Tessera Core - Graph analysis engine
//!
//! This crate provides the data model, per-request graph snapshots and the
//! traversal and centrality algorithms of the Tessera graph query engine.

pub mod centrality;
pub mod entity;
pub mod error;
pub mod graph;
pub mod limits;
pub mod project;
pub mod query;
pub mod relation;
pub mod traversal;
pub mod value;

pub use centrality::{CentralityAnalyzer, CentralityMeasure, CentralityResult};
pub use entity::{Entity, EntityId, EntityType};
pub use error::{Error, ErrorKind, Result};
pub use graph::{Graph, GraphSnapshot, Subgraph};
pub use project::{Project, ProjectId};
pub use query::{
    LabelMatchMode, PaginatedResults, Pagination, PaginationInfo, SearchMode, SearchQuery,
};
pub use relation::{Direction, Relation, RelationId};
pub use traversal::{
    NeighborQuery, NeighborResult, Path, PathEdge, PathQuery, PathSearchResult, PathStep,
    TraversalEngine, TraversalStats,
};
pub use value::{Properties, PropertyValue};
