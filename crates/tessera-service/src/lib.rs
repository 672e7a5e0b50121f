//! Tessera Service - Graph query façade
//!
//! Resolves projects and entities, checks caller authorization, applies
//! configured limits and runs the core algorithms on per-request snapshots.
//! [`RequestHandler`] exposes every operation through a JSON envelope for
//! whatever transport hosts the engine.

pub mod auth;
pub mod config;
pub mod facade;
pub mod handlers;
pub mod requests;
pub mod response;

pub use auth::{AllowAll, Authorizer, OwnerAuthorizer};
pub use config::{ConfigError, EngineConfig};
pub use facade::GraphQueryService;
pub use handlers::{GraphRequest, GraphResponse, RequestHandler};
pub use requests::{
    CentralityRequest, NeighborsRequest, PathsRequest, SearchRequest, StatisticsRequest,
    ViewRequest,
};
pub use response::{CentralityResponse, GraphStatistics, GraphView, ProjectSummary};
