//! Filters and searchable text shared by the engines

use tessera_core::{Entity, LabelMatchMode, SearchQuery};

/// Type and label filters; both compare case-insensitively
pub fn matches_filters(entity: &Entity, query: &SearchQuery) -> bool {
    if !query.entity_types.is_empty()
        && !query
            .entity_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(entity.entity_type.as_str()))
    {
        return false;
    }

    if !query.labels.is_empty() {
        let has = |label: &String| entity.labels.iter().any(|l| l.eq_ignore_ascii_case(label));
        let label_match = match query.label_match_mode {
            LabelMatchMode::Any => query.labels.iter().any(has),
            LabelMatchMode::All => query.labels.iter().all(has),
        };
        if !label_match {
            return false;
        }
    }

    true
}

/// External id, type, labels and string property values joined by spaces
pub fn searchable_text(entity: &Entity) -> String {
    let mut parts: Vec<&str> = vec![entity.external_id.as_str(), entity.entity_type.as_str()];
    parts.extend(entity.labels.iter().map(String::as_str));
    for value in entity.properties.values() {
        value.collect_text(&mut parts);
    }
    parts.join(" ")
}
