//! Index-to-label-name mapping

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Maps label ids to human-readable names (`idx2label`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelMap {
    names: BTreeMap<usize, String>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: usize, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn get(&self, id: usize) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Name for `id`, or [`Error::UnknownLabel`]
    pub fn name(&self, id: usize) -> Result<&str> {
        self.get(id).ok_or(Error::UnknownLabel(id))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names.iter().map(|(&id, name)| (id, name.as_str()))
    }

    /// Parse a YAML or JSON document.
    ///
    /// Accepts either a mapping of `id: name` (integer or numeric-string
    /// keys) or a list of names where the position is the id.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| Error::Serialization {
            message: format!("label map: {e}"),
        })?;

        match value {
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(id, item)| Ok((id, scalar_to_string(&item)?)))
                .collect(),
            Value::Mapping(mapping) => mapping
                .iter()
                .map(|(k, v)| Ok((key_to_id(k)?, scalar_to_string(v)?)))
                .collect(),
            other => Err(Error::Serialization {
                message: format!("label map must be a mapping or a list, got {other:?}"),
            }),
        }
    }

    /// Load from a YAML/JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading label map {}", path.display()), e))?;
        Self::from_yaml_str(&content)
    }
}

impl<S: Into<String>> FromIterator<(usize, S)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (usize, S)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(id, name)| (id, name.into())).collect(),
        }
    }
}

fn key_to_id(key: &Value) -> Result<usize> {
    let id = match key {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    id.ok_or_else(|| Error::Serialization {
        message: format!("label map key {key:?} is not a non-negative integer"),
    })
}

fn scalar_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(Error::Serialization {
            message: format!("label name must be a scalar, got {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_mapping() {
        let map = LabelMap::from_yaml_str("0: <pad>\n1: NOUN\n2: VERB\n").unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(1), Some("NOUN"));
        assert_eq!(map.name(2).unwrap(), "VERB");
    }

    #[test]
    fn test_parse_json_with_string_keys() {
        let map = LabelMap::from_yaml_str(r#"{"1": "B-PER", "2": "I-PER"}"#).unwrap();
        assert_eq!(map.get(1), Some("B-PER"));
        assert_eq!(map.get(2), Some("I-PER"));
    }

    #[test]
    fn test_parse_list_uses_position_as_id() {
        let map = LabelMap::from_yaml_str("[\"<pad>\", \"DET\", \"ADJ\"]").unwrap();
        assert_eq!(map.get(0), Some("<pad>"));
        assert_eq!(map.get(2), Some("ADJ"));
    }

    #[test]
    fn test_unknown_label() {
        let map = LabelMap::from_iter([(1, "NOUN")]);
        assert!(matches!(map.name(5), Err(Error::UnknownLabel(5))));
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(LabelMap::from_yaml_str("noun: NOUN").is_err());
        assert!(LabelMap::from_yaml_str("-1: NEG").is_err());
        assert!(LabelMap::from_yaml_str("just a string").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("idx2label.yaml");
        fs::write(&path, "1: NOUN\n").unwrap();

        let map = LabelMap::load(&path).unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![(1, "NOUN")]);
    }
}
