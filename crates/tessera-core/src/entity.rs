//! Entity (node) types and operations

use crate::project::ProjectId;
use crate::value::{Properties, PropertyValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for an entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Ulid);

impl EntityId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Entity type classification
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(pub String);

impl EntityType {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for EntityType {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entity in the property graph (a node)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier
    pub id: EntityId,

    /// Project this entity belongs to; never changes after creation
    pub project_id: ProjectId,

    /// Caller-supplied alias, not unique
    pub external_id: String,

    /// Entity type tag
    #[serde(rename = "type")]
    pub entity_type: EntityType,

    /// Informational labels (no duplicates)
    #[serde(default)]
    pub labels: Vec<String>,

    /// Arbitrary properties
    #[serde(default)]
    pub properties: Properties,

    /// Bumped on every property change
    #[serde(default = "default_version")]
    pub version: u32,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

fn default_version() -> u32 {
    1
}

impl Entity {
    /// Create a new entity
    pub fn new(
        project_id: ProjectId,
        external_id: impl Into<String>,
        entity_type: impl Into<EntityType>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::new(),
            project_id,
            external_id: external_id.into(),
            entity_type: entity_type.into(),
            labels: Vec::new(),
            properties: Properties::new(),
            version: default_version(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Use a known id instead of a generated one
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.add_label(label);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Add a label to this entity
    pub fn add_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
            self.updated_at = Utc::now();
        }
    }

    /// Check if entity has a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Human-facing name: a `name` string property when present, else the external id
    pub fn display_name(&self) -> &str {
        self.properties
            .get("name")
            .and_then(PropertyValue::as_str)
            .unwrap_or(&self.external_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let project_id = ProjectId::new();
        let entity = Entity::new(project_id.clone(), "ent-001", "ENTERPRISE");

        assert_eq!(entity.external_id, "ent-001");
        assert_eq!(entity.entity_type.as_str(), "ENTERPRISE");
        assert_eq!(entity.project_id, project_id);
        assert_eq!(entity.version, 1);
        assert!(entity.labels.is_empty());
        assert!(entity.properties.is_empty());
    }

    #[test]
    fn test_labels() {
        let mut entity = Entity::new(ProjectId::new(), "p-1", "PERSON");

        entity.add_label("director");
        entity.add_label("shareholder");
        entity.add_label("director");

        assert_eq!(entity.labels, vec!["director", "shareholder"]);
        assert!(entity.has_label("shareholder"));
        assert!(!entity.has_label("auditor"));
    }

    #[test]
    fn test_display_name() {
        let entity = Entity::new(ProjectId::new(), "ent-7", "ENTERPRISE");
        assert_eq!(entity.display_name(), "ent-7");

        let named = entity.with_property("name", "Acme Ltd");
        assert_eq!(named.display_name(), "Acme Ltd");
    }

    #[test]
    fn test_type_serializes_as_plain_string() {
        let entity = Entity::new(ProjectId::new(), "d-1", "DRUG");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["type"], "DRUG");
        assert_eq!(json["external_id"], "d-1");
    }
}
