//! Relation (edge) types and operations

use crate::entity::EntityId;
use crate::project::ProjectId;
use crate::value::{Properties, PropertyValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a relation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationId(pub Ulid);

impl RelationId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for RelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction a relation was walked in, relative to its stored orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Walked from source to target
    Outgoing,
    /// Walked from target to source
    Incoming,
}

/// A directed relation (edge) between two entities of the same project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    /// Unique identifier
    pub id: RelationId,

    /// Project this relation belongs to
    pub project_id: ProjectId,

    /// Source entity ID
    pub source_id: EntityId,

    /// Target entity ID
    pub target_id: EntityId,

    /// Type of relationship (e.g. "OWNS", "TRANSFERS_TO")
    #[serde(rename = "type")]
    pub relation_type: String,

    /// Arbitrary properties
    #[serde(default)]
    pub properties: Properties,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Relation {
    /// Create a new relation
    pub fn new(
        project_id: ProjectId,
        source_id: EntityId,
        target_id: EntityId,
        relation_type: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: RelationId::new(),
            project_id,
            source_id,
            target_id,
            relation_type: relation_type.into(),
            properties: Properties::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Use a known id instead of a generated one
    pub fn with_id(mut self, id: RelationId) -> Self {
        self.id = id;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn is_self_loop(&self) -> bool {
        self.source_id == self.target_id
    }

    /// The endpoint opposite `from`, with the direction the relation is walked in.
    /// Returns `None` when `from` is not an endpoint.
    pub fn walk_from(&self, from: &EntityId) -> Option<(&EntityId, Direction)> {
        if self.source_id == *from {
            Some((&self.target_id, Direction::Outgoing))
        } else if self.target_id == *from {
            Some((&self.source_id, Direction::Incoming))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_creation() {
        let project_id = ProjectId::new();
        let source = EntityId::new();
        let target = EntityId::new();

        let relation = Relation::new(project_id, source.clone(), target.clone(), "OWNS");

        assert_eq!(relation.source_id, source);
        assert_eq!(relation.target_id, target);
        assert_eq!(relation.relation_type, "OWNS");
        assert!(!relation.is_self_loop());
        assert!(relation.properties.is_empty());
    }

    #[test]
    fn test_walk_from_both_ends() {
        let source = EntityId::new();
        let target = EntityId::new();
        let relation = Relation::new(ProjectId::new(), source.clone(), target.clone(), "OWNS");

        assert_eq!(
            relation.walk_from(&source),
            Some((&target, Direction::Outgoing))
        );
        assert_eq!(
            relation.walk_from(&target),
            Some((&source, Direction::Incoming))
        );
        assert_eq!(relation.walk_from(&EntityId::new()), None);
    }

    #[test]
    fn test_self_loop() {
        let id = EntityId::new();
        let relation = Relation::new(ProjectId::new(), id.clone(), id.clone(), "REFERS_TO");
        assert!(relation.is_self_loop());
        assert_eq!(relation.walk_from(&id), Some((&id, Direction::Outgoing)));
    }
}
