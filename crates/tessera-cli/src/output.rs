//! Output formatting utilities

use serde::Serialize;
use tessera_core::{Direction, Entity, Path};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Print `data` as pretty JSON
pub fn print_json<T: Serialize>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// `external_id (TYPE) [label, ...]`
pub fn entity_line(entity: &Entity) -> String {
    let labels = if entity.labels.is_empty() {
        String::new()
    } else {
        format!(" [{}]", entity.labels.join(", "))
    };
    format!("{} ({}){}", entity.external_id, entity.entity_type, labels)
}

/// `A -[OWNS]-> B <-[PAYS]- C`
pub fn path_line(path: &Path) -> String {
    let mut line = String::new();
    for step in &path.steps {
        if let Some(edge) = &step.via {
            match edge.direction {
                Direction::Outgoing => line.push_str(&format!(" -[{}]-> ", edge.relation_type)),
                Direction::Incoming => line.push_str(&format!(" <-[{}]- ", edge.relation_type)),
            }
        }
        line.push_str(&step.entity.external_id);
    }
    line
}
