//! Project (scoping namespace) types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Unique identifier for a project
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(pub Ulid);

impl ProjectId {
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn from_string(s: &str) -> Result<Self, ulid::DecodeError> {
        Ok(Self(Ulid::from_string(s)?))
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A project: the scope every entity and relation lives in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: ProjectId,

    /// Project name (alphanumeric with underscores/hyphens)
    pub name: String,

    /// Human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning principal, when access is restricted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ProjectId::new(),
            name: name.into(),
            description: None,
            owner: None,
            created_at: Utc::now(),
        }
    }

    /// Create project with description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Restrict the project to an owner
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Validate project name (alphanumeric, underscores, hyphens only)
    pub fn validate_name(name: &str) -> bool {
        !name.is_empty()
            && name.len() <= crate::limits::MAX_PROJECT_NAME_LEN
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("fraud-ring");
        assert_eq!(project.name, "fraud-ring");
        assert!(project.description.is_none());
        assert!(project.owner.is_none());
    }

    #[test]
    fn test_project_builders() {
        let project = Project::new("supply-chain")
            .with_description("Supplier network")
            .with_owner("alice");
        assert_eq!(project.description.as_deref(), Some("Supplier network"));
        assert_eq!(project.owner.as_deref(), Some("alice"));
    }

    #[test]
    fn test_validate_project_name() {
        assert!(Project::validate_name("my-project"));
        assert!(Project::validate_name("my_project_123"));
        assert!(!Project::validate_name(""));
        assert!(!Project::validate_name("my project"));
        assert!(!Project::validate_name("my.project"));
        assert!(!Project::validate_name(&"x".repeat(200)));
    }

    #[test]
    fn test_project_id_roundtrip_string() {
        let id = ProjectId::new();
        let parsed = ProjectId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }
}
