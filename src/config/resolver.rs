//! The layered configuration resolver.
//!
//! Lookups consult the sources in precedence order, CLI defines first, then
//! environment variables, then the configuration file. Nothing is validated
//! up front: a malformed or mistyped entry only fails when it is read.

use super::builder::ConfigBuilder;
use super::paths::{PathOptions, check_exists, resolve_path};
use super::value::{FromConfig, split_flat, string_list_from_node};
use crate::error::{ConfigError, Result};
use crate::key::Key;
use crate::sources::file::describe;
use crate::sources::{CliMap, EnvMap, FileTree, Layer, Raw, Source};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

/// How list lookups combine the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    /// Concatenate every source's elements, CLI then environment then file.
    Combine,
    /// Take the elements of the highest-precedence source that has the key.
    Override,
}

/// A value together with the source that supplied it.
#[derive(Debug, Clone, PartialEq)]
struct Sourced<T> {
    value: T,
    source: Source,
}

/// Immutable view over CLI defines, environment variables and one file.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub(super) cli: CliMap,
    pub(super) env: EnvMap,
    pub(super) file: FileTree,
    pub(super) location: Option<Url>,
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn cli(&self) -> &CliMap {
        &self.cli
    }

    pub fn env(&self) -> &EnvMap {
        &self.env
    }

    pub fn file(&self) -> &FileTree {
        &self.file
    }

    /// Location the file was loaded from, if known.
    pub fn location(&self) -> Option<&Url> {
        self.location.as_ref()
    }

    fn layers(&self) -> [&dyn Layer; 3] {
        [&self.cli, &self.env, &self.file]
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get_optional_string(key)?
            .ok_or_else(|| ConfigError::missing_key(key))
    }

    pub fn get_optional_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lookup::<String>(&Key::parse(key)?)?.map(|s| s.value))
    }

    /// Like [`get_string`](Self::get_string), but the value must be one of `allowed`.
    pub fn get_string_one_of(&self, key: &str, allowed: &[&str]) -> Result<String> {
        self.get_optional_string_one_of(key, allowed)?
            .ok_or_else(|| ConfigError::missing_key(key))
    }

    pub fn get_optional_string_one_of(
        &self,
        key: &str,
        allowed: &[&str],
    ) -> Result<Option<String>> {
        match self.get_optional_string(key)? {
            Some(value) if !allowed.contains(&value.as_str()) => {
                Err(ConfigError::invalid_value(key, &value, allowed))
            }
            value => Ok(value),
        }
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get_optional_bool(key)?
            .ok_or_else(|| ConfigError::missing_key(key))
    }

    pub fn get_optional_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(self.lookup::<bool>(&Key::parse(key)?)?.map(|s| s.value))
    }

    pub fn get_i64(&self, key: &str) -> Result<i64> {
        self.get_optional_i64(key)?
            .ok_or_else(|| ConfigError::missing_key(key))
    }

    pub fn get_optional_i64(&self, key: &str) -> Result<Option<i64>> {
        Ok(self.lookup::<i64>(&Key::parse(key)?)?.map(|s| s.value))
    }

    /// Which source would answer a scalar lookup of `key`.
    pub fn source_of(&self, key: &str) -> Result<Option<Source>> {
        let key = Key::parse(key)?;
        for layer in self.layers() {
            if layer.raw(&key)?.is_some() {
                return Ok(Some(layer.source()));
            }
        }
        Ok(None)
    }

    /// Scalar lookup shared by every value kind.
    fn lookup<T: FromConfig>(&self, key: &Key) -> Result<Option<Sourced<T>>> {
        for layer in self.layers() {
            let value = match layer.raw(key)? {
                None => continue,
                Some(Raw::Flat(values)) => match values.as_slice() {
                    [single] => T::from_flat(key, single)?,
                    many => {
                        let values: Vec<String> = many.iter().map(|v| v.to_string()).collect();
                        return Err(ConfigError::ambiguous(key.as_str(), &values));
                    }
                },
                Some(Raw::Node(node)) => T::from_node(key, node)?,
            };
            let source = layer.source();
            debug!(key = %key, %source, "Resolved configuration value");
            return Ok(Some(Sourced { value, source }));
        }
        trace!(key = %key, "No source has configuration value");
        Ok(None)
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// List lookup.
    ///
    /// CLI occurrences and the environment value are split by `delimiter`
    /// when one is given; file values must be sequences of strings.
    pub fn get_string_list(
        &self,
        key: &str,
        delimiter: Option<&Regex>,
        mode: ListMode,
    ) -> Result<Option<Vec<String>>> {
        let key = Key::parse(key)?;
        Ok(self.lookup_list(&key, delimiter, mode)?.map(|parts| {
            parts
                .into_iter()
                .flat_map(|part| part.value)
                .collect()
        }))
    }

    /// Per-source list contributions in precedence order.
    fn lookup_list(
        &self,
        key: &Key,
        delimiter: Option<&Regex>,
        mode: ListMode,
    ) -> Result<Option<Vec<Sourced<Vec<String>>>>> {
        let mut parts = Vec::new();
        for layer in self.layers() {
            let value: Vec<String> = match layer.raw(key)? {
                None => continue,
                Some(Raw::Flat(values)) => values
                    .into_iter()
                    .flat_map(|v| split_flat(v, delimiter))
                    .collect(),
                Some(Raw::Node(node)) => string_list_from_node(key, node)?,
            };
            let source = layer.source();
            debug!(key = %key, %source, count = value.len(), "Resolved configuration list");
            parts.push(Sourced { value, source });
            if mode == ListMode::Override {
                break;
            }
        }
        Ok(if parts.is_empty() { None } else { Some(parts) })
    }

    // =========================================================================
    // Paths
    // =========================================================================

    pub fn get_path(&self, key: &str, options: PathOptions) -> Result<Url> {
        self.get_optional_path(key, options)?
            .ok_or_else(|| ConfigError::missing_key(key))
    }

    pub fn get_optional_path(&self, key: &str, options: PathOptions) -> Result<Option<Url>> {
        let key = Key::parse(key)?;
        let Some(raw) = self.lookup::<String>(&key)? else {
            return Ok(None);
        };
        let location = self.resolve_sourced(&key, &raw.value, raw.source, options)?;
        if options.must_exist {
            check_exists(key.as_str(), &location)?;
        }
        Ok(Some(location))
    }

    /// List of paths, each resolved by the rules of its own source.
    pub fn get_path_list(
        &self,
        key: &str,
        delimiter: Option<&Regex>,
        mode: ListMode,
        options: PathOptions,
    ) -> Result<Option<Vec<Url>>> {
        let key = Key::parse(key)?;
        let Some(parts) = self.lookup_list(&key, delimiter, mode)? else {
            return Ok(None);
        };
        let mut locations = Vec::new();
        for part in parts {
            for raw in &part.value {
                locations.push(self.resolve_sourced(&key, raw, part.source, options)?);
            }
        }
        if options.must_exist {
            for location in &locations {
                check_exists(key.as_str(), location)?;
            }
        }
        Ok(Some(locations))
    }

    fn resolve_sourced(
        &self,
        key: &Key,
        raw: &str,
        source: Source,
        options: PathOptions,
    ) -> Result<Url> {
        let base = match source {
            Source::File if options.resolve_file_uri => self.location.as_ref(),
            _ => None,
        };
        resolve_path(key.as_str(), raw, base)
    }

    // =========================================================================
    // Raw file access
    // =========================================================================

    /// Borrow the file node at `key`, ignoring CLI and environment.
    pub fn file_node(&self, key: &str) -> Result<Option<&Value>> {
        self.file.descend(&Key::parse(key)?)
    }

    /// Deserialize the file node at `key` into `T`, ignoring CLI and environment.
    ///
    /// This is the way to read mappings and heterogeneous sequences.
    pub fn get_file_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(node) = self.file_node(key)? else {
            return Ok(None);
        };
        serde_json::from_value(node.clone())
            .map(Some)
            .map_err(|_| ConfigError::type_mismatch(key, std::any::type_name::<T>(), describe(node)))
    }
}
