//! Per-access type conversion.
//!
//! CLI and environment values are strings and get coerced; file values are
//! already typed and must match the requested kind exactly.

use crate::error::{ConfigError, Result};
use crate::key::Key;
use crate::sources::file::describe;
use regex_lite::Regex;
use serde_json::Value;

/// Tokens accepted for booleans from CLI and environment values.
pub const BOOL_TOKENS: [&str; 6] = ["0", "1", "false", "FALSE", "true", "TRUE"];

/// A scalar kind that can be read from any source.
pub trait FromConfig: Sized {
    /// Name used in type mismatch errors.
    const EXPECTED: &'static str;

    /// Convert a string from the CLI or environment.
    fn from_flat(key: &Key, raw: &str) -> Result<Self>;

    /// Convert a node from the file tree.
    fn from_node(key: &Key, node: &Value) -> Result<Self>;
}

impl FromConfig for String {
    const EXPECTED: &'static str = "string";

    fn from_flat(_key: &Key, raw: &str) -> Result<Self> {
        Ok(raw.to_string())
    }

    fn from_node(key: &Key, node: &Value) -> Result<Self> {
        match node {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConfigError::type_mismatch(
                key.as_str(),
                Self::EXPECTED,
                describe(other),
            )),
        }
    }
}

impl FromConfig for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_flat(key: &Key, raw: &str) -> Result<Self> {
        match raw {
            "1" | "true" | "TRUE" => Ok(true),
            "0" | "false" | "FALSE" => Ok(false),
            _ => Err(ConfigError::invalid_value(key.as_str(), raw, &BOOL_TOKENS)),
        }
    }

    fn from_node(key: &Key, node: &Value) -> Result<Self> {
        match node {
            Value::Bool(b) => Ok(*b),
            other => Err(ConfigError::type_mismatch(
                key.as_str(),
                Self::EXPECTED,
                describe(other),
            )),
        }
    }
}

impl FromConfig for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_flat(key: &Key, raw: &str) -> Result<Self> {
        raw.parse().map_err(|_| {
            ConfigError::type_mismatch(key.as_str(), Self::EXPECTED, format!("string \"{}\"", raw))
        })
    }

    fn from_node(key: &Key, node: &Value) -> Result<Self> {
        node.as_i64().ok_or_else(|| {
            ConfigError::type_mismatch(key.as_str(), Self::EXPECTED, describe(node))
        })
    }
}

/// Split a CLI or environment string into list elements.
///
/// Without a delimiter the whole string is one element. Empty pieces left
/// by the split are dropped.
pub(crate) fn split_flat(raw: &str, delimiter: Option<&Regex>) -> Vec<String> {
    match delimiter {
        Some(re) => re
            .split(raw)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        None => vec![raw.to_string()],
    }
}

/// Read a file node as a list of strings. File lists are never split.
pub(crate) fn string_list_from_node(key: &Key, node: &Value) -> Result<Vec<String>> {
    const EXPECTED: &str = "sequence of strings";

    let Value::Array(items) = node else {
        return Err(ConfigError::type_mismatch(key.as_str(), EXPECTED, describe(node)));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ConfigError::type_mismatch(
                key.as_str(),
                EXPECTED,
                format!("{} at index {}", describe(other), index),
            )),
        })
        .collect()
}
