//! Property values attached to entities and relations

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ordered property bag
pub type Properties = BTreeMap<String, PropertyValue>;

/// A dynamically shaped property value.
///
/// Serialized untagged so a property bag reads as plain JSON. Variant order
/// matters for deserialization: integers are tried before floats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Collect every string leaf (used for text search)
    pub fn collect_text<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::String(s) => out.push(s),
            Self::List(items) => items.iter().for_each(|v| v.collect_text(out)),
            Self::Map(map) => map.values().for_each(|v| v.collect_text(out)),
            _ => {}
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::String(s) => write!(f, "{}", s),
            Self::List(_) | Self::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_shape() {
        let mut props = Properties::new();
        props.insert("name".into(), "Acme".into());
        props.insert("capital".into(), PropertyValue::Int(1000));
        props.insert("listed".into(), PropertyValue::Bool(true));

        let json = serde_json::to_value(&props).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"capital": 1000, "listed": true, "name": "Acme"})
        );
    }

    #[test]
    fn test_nested_deserialization() {
        let raw = r#"{"score": 0.5, "count": 3, "tags": ["a", "b"], "meta": {"x": null}}"#;
        let props: Properties = serde_json::from_str(raw).unwrap();

        assert_eq!(props["score"], PropertyValue::Float(0.5));
        assert_eq!(props["count"], PropertyValue::Int(3));
        assert_eq!(props["tags"].type_name(), "list");
        match &props["meta"] {
            PropertyValue::Map(m) => assert!(m["x"].is_null()),
            other => panic!("expected map, got {:?}", other),
        }
    }

    #[test]
    fn test_collect_text() {
        let value: PropertyValue =
            serde_json::from_str(r#"{"a": "alpha", "b": [1, "beta"], "c": {"d": "delta"}}"#)
                .unwrap();
        let mut out = Vec::new();
        value.collect_text(&mut out);
        assert_eq!(out, vec!["alpha", "beta", "delta"]);
    }
}
