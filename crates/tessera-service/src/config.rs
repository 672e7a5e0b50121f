//! Engine limits and defaults

use serde::{Deserialize, Serialize};
use std::path::Path;
use tessera_core::limits;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid engine setting: {0}")]
    Invalid(String),
}

/// Limits and defaults applied by the façade.
///
/// Every field has a default, so a partial `[engine]` table is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest neighbor expansion a caller may request
    pub max_neighbor_depth: u32,

    /// Path search depth when the caller gives none
    pub default_path_depth: u32,

    /// Deepest path search a caller may request
    pub max_path_depth: u32,

    /// Paths collected when the caller gives no limit
    pub default_path_limit: usize,

    pub max_path_limit: usize,

    /// Centrality results returned when the caller gives no limit
    pub default_rank_limit: usize,

    /// Entity ceiling for betweenness; larger projects are refused
    pub max_betweenness_entities: usize,

    pub default_page_size: usize,

    pub default_view_nodes: usize,

    pub max_view_nodes: usize,

    /// Records fetched per store call when building a project snapshot
    pub snapshot_page_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_neighbor_depth: limits::MAX_NEIGHBOR_DEPTH,
            default_path_depth: limits::DEFAULT_PATH_DEPTH,
            max_path_depth: limits::MAX_PATH_DEPTH,
            default_path_limit: limits::DEFAULT_PATH_LIMIT,
            max_path_limit: limits::MAX_PATH_LIMIT,
            default_rank_limit: limits::DEFAULT_RANK_LIMIT,
            max_betweenness_entities: limits::MAX_BETWEENNESS_ENTITIES,
            default_page_size: 20,
            default_view_nodes: limits::DEFAULT_VIEW_NODES,
            max_view_nodes: limits::MAX_VIEW_NODES,
            snapshot_page_size: tessera_storage::snapshot::DEFAULT_SNAPSHOT_PAGE_SIZE,
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check that every default lies within its maximum and nothing is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let nonzero = [
            ("max_neighbor_depth", self.max_neighbor_depth as usize),
            ("default_path_depth", self.default_path_depth as usize),
            ("default_path_limit", self.default_path_limit),
            ("default_rank_limit", self.default_rank_limit),
            ("default_page_size", self.default_page_size),
            ("default_view_nodes", self.default_view_nodes),
            ("snapshot_page_size", self.snapshot_page_size),
        ];
        if let Some((name, _)) = nonzero.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
        }

        let bounded = [
            ("default_path_depth", self.default_path_depth as usize, "max_path_depth", self.max_path_depth as usize),
            ("default_path_limit", self.default_path_limit, "max_path_limit", self.max_path_limit),
            ("default_view_nodes", self.default_view_nodes, "max_view_nodes", self.max_view_nodes),
        ];
        for (name, value, max_name, max) in bounded {
            if value > max {
                return Err(ConfigError::Invalid(format!(
                    "{} ({}) exceeds {} ({})",
                    name, value, max_name, max
                )));
            }
        }
        Ok(())
    }
}
