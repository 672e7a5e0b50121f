//! JSON graph documents loaded into the in-memory store

use crate::error::{StorageError, StorageResult};
use crate::memory::MemoryStorage;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tessera_core::{Entity, EntityId, Project, Properties, Relation, RelationId};

/// Current document format version
pub const DOCUMENT_VERSION: &str = "1";

/// A set of projects with their entities and relations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default = "default_version")]
    pub version: String,
    pub projects: Vec<ProjectDocument>,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub entities: Vec<EntityDocument>,
    #[serde(default)]
    pub relations: Vec<RelationDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDocument {
    /// ULID; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub external_id: String,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Entity id or unambiguous external id
    pub source: String,
    /// Entity id or unambiguous external id
    pub target: String,
    #[serde(rename = "type")]
    pub relation_type: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl GraphDocument {
    pub fn from_json_str(content: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> StorageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let document = Self::from_json_str(&content)?;
        tracing::debug!(
            "Loaded graph document {:?} (version {}, {} projects)",
            path,
            document.version,
            document.projects.len()
        );
        Ok(document)
    }

    /// Build an in-memory store holding every project of the document
    pub fn into_store(self) -> StorageResult<MemoryStorage> {
        let storage = MemoryStorage::new();
        for project in self.projects {
            project.load_into(&storage)?;
        }
        Ok(storage)
    }
}

impl ProjectDocument {
    fn load_into(self, storage: &MemoryStorage) -> StorageResult<()> {
        if !Project::validate_name(&self.name) {
            return Err(StorageError::InvalidDocument(format!(
                "invalid project name '{}'",
                self.name
            )));
        }

        let mut project = Project::new(&self.name);
        if let Some(description) = &self.description {
            project = project.with_description(description);
        }
        if let Some(owner) = &self.owner {
            project = project.with_owner(owner);
        }
        storage.save_project(&project)?;

        let mut ids: HashSet<EntityId> = HashSet::with_capacity(self.entities.len());
        let mut by_external: HashMap<String, Vec<EntityId>> = HashMap::new();
        for doc in self.entities {
            let mut entity = Entity::new(project.id.clone(), doc.external_id, doc.entity_type);
            if let Some(raw) = &doc.id {
                entity = entity.with_id(parse_id(raw, EntityId::from_string)?);
            }
            for label in doc.labels {
                entity.add_label(label);
            }
            entity.properties = doc.properties;

            storage.save_entity(&entity)?;
            by_external
                .entry(entity.external_id.clone())
                .or_default()
                .push(entity.id.clone());
            ids.insert(entity.id);
        }

        let resolve = |reference: &str| -> StorageResult<EntityId> {
            if let Ok(id) = EntityId::from_string(reference) {
                if ids.contains(&id) {
                    return Ok(id);
                }
            }
            match by_external.get(reference).map(Vec::as_slice) {
                Some([id]) => Ok(id.clone()),
                Some(_) => Err(StorageError::InvalidDocument(format!(
                    "ambiguous entity reference '{}' in project '{}'",
                    reference, self.name
                ))),
                None => Err(StorageError::InvalidDocument(format!(
                    "unknown entity reference '{}' in project '{}'",
                    reference, self.name
                ))),
            }
        };

        let relation_count = self.relations.len();
        for doc in &self.relations {
            let mut relation = Relation::new(
                project.id.clone(),
                resolve(&doc.source)?,
                resolve(&doc.target)?,
                doc.relation_type.clone(),
            );
            if let Some(raw) = &doc.id {
                relation = relation.with_id(parse_id(raw, RelationId::from_string)?);
            }
            relation.properties = doc.properties.clone();
            storage.save_relation(&relation)?;
        }

        tracing::info!(
            "Loaded project '{}': {} entities, {} relations",
            self.name,
            ids.len(),
            relation_count
        );
        Ok(())
    }
}

fn parse_id<T>(
    raw: &str,
    parse: impl Fn(&str) -> Result<T, ulid::DecodeError>,
) -> StorageResult<T> {
    parse(raw).map_err(|e| StorageError::InvalidDocument(format!("invalid id '{}': {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{GraphStore, ListOptions};
    use std::io::Write;
    use tessera_core::PropertyValue;

    const SAMPLE: &str = r#"{
        "version": "1",
        "projects": [{
            "name": "acme",
            "owner": "alice",
            "entities": [
                {"external_id": "alice", "type": "PERSON", "labels": ["director"],
                 "properties": {"name": "Alice", "age": 41}},
                {"id": "01HZX3K8Q4M7N2P5R6S9T0V1W2", "external_id": "acme-co", "type": "COMPANY"}
            ],
            "relations": [
                {"source": "alice", "target": "01HZX3K8Q4M7N2P5R6S9T0V1W2", "type": "OWNS",
                 "properties": {"share": 0.51}}
            ]
        }]
    }"#;

    #[tokio::test]
    async fn test_load_sample() {
        let storage = GraphDocument::from_json_str(SAMPLE).unwrap().into_store().unwrap();
        let project = storage.get_project_by_name("acme").await.unwrap().unwrap();
        assert_eq!(project.owner.as_deref(), Some("alice"));

        let entities = storage
            .list_entities(&project.id, &ListOptions::new())
            .await
            .unwrap();
        assert_eq!(entities.len(), 2);
        assert!(entities[0].has_label("director"));
        assert_eq!(
            entities[0].properties.get("age"),
            Some(&PropertyValue::Int(41))
        );
        assert_eq!(entities[1].id.to_string(), "01HZX3K8Q4M7N2P5R6S9T0V1W2");

        let relations = storage
            .list_relations(&project.id, &ListOptions::new())
            .await
            .unwrap();
        assert_eq!(relations.len(), 1);
        assert_eq!(relations[0].source_id, entities[0].id);
        assert_eq!(relations[0].target_id, entities[1].id);
    }

    #[test]
    fn test_unknown_reference_rejected() {
        let doc = r#"{"projects": [{"name": "p",
            "entities": [{"external_id": "a", "type": "T"}],
            "relations": [{"source": "a", "target": "ghost", "type": "R"}]}]}"#;
        let err = GraphDocument::from_json_str(doc)
            .unwrap()
            .into_store()
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_ambiguous_reference_rejected() {
        let doc = r#"{"projects": [{"name": "p",
            "entities": [{"external_id": "a", "type": "T"}, {"external_id": "a", "type": "U"}],
            "relations": [{"source": "a", "target": "a", "type": "R"}]}]}"#;
        let err = GraphDocument::from_json_str(doc)
            .unwrap()
            .into_store()
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidDocument(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let document = GraphDocument::load(file.path()).unwrap();
        assert_eq!(document.version, "1");
        assert_eq!(document.projects[0].entities.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GraphDocument::load(Path::new("/nonexistent/graph.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
