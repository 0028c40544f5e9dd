//! Structured configuration file.
//!
//! YAML is parsed into a `serde_json::Value` tree (JSON documents parse as
//! YAML too). Entries are addressed with dashed names: the key segment
//! `out_dir` matches the file entry `out-dir`.

use super::{Layer, Raw, Source};
use crate::error::{ConfigError, Result};
use crate::key::{Key, file_segment};
use serde_json::{Map, Value};

/// Parsed file contents. The root is always a mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileTree {
    root: Map<String, Value>,
}

impl FileTree {
    /// Parse YAML or JSON text. `origin` names the input in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_value(value)
    }

    /// Wrap an already-parsed tree. A null document is an empty mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Ok(Self::default()),
            other => Err(ConfigError::NotAMapping {
                found: describe(&other),
            }),
        }
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Walk the tree one key segment at a time.
    ///
    /// An absent (or null) entry anywhere along the way yields `Ok(None)`.
    /// Reaching a non-mapping node while segments remain is a type mismatch
    /// reported against the key prefix that led to that node.
    pub fn descend(&self, key: &Key) -> Result<Option<&Value>> {
        let mut map = &self.root;
        let mut segments = key.segments().enumerate().peekable();
        while let Some((depth, segment)) = segments.next() {
            let node = match map.get(&file_segment(segment)) {
                None | Some(Value::Null) => return Ok(None),
                Some(node) => node,
            };
            if segments.peek().is_none() {
                return Ok(Some(node));
            }
            map = match node {
                Value::Object(next) => next,
                other => {
                    return Err(ConfigError::type_mismatch(
                        key.prefix(depth + 1),
                        "mapping",
                        describe(other),
                    ));
                }
            };
        }
        Ok(None)
    }
}

impl Layer for FileTree {
    fn source(&self) -> Source {
        Source::File
    }

    fn raw(&self, key: &Key) -> Result<Option<Raw<'_>>> {
        Ok(self.descend(key)?.map(Raw::Node))
    }
}

/// Short human description of a node for error messages.
pub fn describe(node: &Value) -> String {
    match node {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(items) => format!("sequence of {} item(s)", items.len()),
        Value::Object(map) => format!("mapping with {} key(s)", map.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(s: &str) -> Key {
        Key::parse(s).unwrap()
    }

    #[test]
    fn test_parse_yaml() {
        let tree = FileTree::parse("build:\n  out-dir: [C1, C2]\n", "test").unwrap();
        assert_eq!(
            tree.descend(&key("build.out_dir")).unwrap(),
            Some(&json!(["C1", "C2"]))
        );
    }

    #[test]
    fn test_parse_json() {
        let tree = FileTree::parse(r#"{"debug": true, "level": 3}"#, "test").unwrap();
        assert_eq!(tree.descend(&key("debug")).unwrap(), Some(&json!(true)));
        assert_eq!(tree.descend(&key("level")).unwrap(), Some(&json!(3)));
    }

    #[test]
    fn test_empty_document_is_empty_tree() {
        let tree = FileTree::parse("  \n", "test").unwrap();
        assert!(tree.root().is_empty());
    }

    #[test]
    fn test_non_mapping_root_rejected() {
        let err = FileTree::parse("- a\n- b\n", "test").unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
        let err = FileTree::from_value(json!("scalar")).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let err = FileTree::parse("a: [unclosed\n", "broken.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.yaml"));
    }

    #[test]
    fn test_absent_segments_yield_none() {
        let tree = FileTree::from_value(json!({"a": {"b": 1}, "n": null})).unwrap();
        assert_eq!(tree.descend(&key("x")).unwrap(), None);
        assert_eq!(tree.descend(&key("a.x")).unwrap(), None);
        assert_eq!(tree.descend(&key("a.x.y")).unwrap(), None);
        assert_eq!(tree.descend(&key("n")).unwrap(), None);
        assert_eq!(tree.descend(&key("n.deeper")).unwrap(), None);
    }

    #[test]
    fn test_scalar_mid_path_is_mismatch() {
        let tree = FileTree::from_value(json!({"a": "scalar"})).unwrap();
        let err = tree.descend(&key("a.b")).unwrap_err();
        match err {
            ConfigError::TypeMismatch { key, found, .. } => {
                assert_eq!(key, "a");
                assert_eq!(found, "string \"scalar\"");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sequence_mid_path_is_mismatch() {
        let tree = FileTree::from_value(json!({"a": {"list": [1, 2]}})).unwrap();
        let err = tree.descend(&key("a.list.first")).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref key, .. } if key == "a.list"));
    }

    #[test]
    fn test_underscored_file_entries_not_matched() {
        let tree = FileTree::from_value(json!({"out_dir": "x"})).unwrap();
        assert_eq!(tree.descend(&key("out_dir")).unwrap(), None);
    }
}
