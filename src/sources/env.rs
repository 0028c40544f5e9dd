//! Environment variable mapping.
//!
//! `BUILD__OUT_DIR=x` becomes key `build.out_dir` with value `x`.

use super::{Layer, Raw, Source};
use crate::error::Result;
use crate::key::Key;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvMap {
    values: HashMap<String, String>,
}

impl EnvMap {
    /// Build from raw `(name, value)` pairs. A repeated name keeps the last value.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = vars
            .into_iter()
            .map(|(name, value)| (env_name_to_key(name.as_ref()), value.into()))
            .collect();
        Self { values }
    }

    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Lower-case the name and turn `__` separators into dots.
pub fn env_name_to_key(name: &str) -> String {
    name.to_lowercase().replace("__", ".")
}

impl Layer for EnvMap {
    fn source(&self) -> Source {
        Source::Env
    }

    fn raw(&self, key: &Key) -> Result<Option<Raw<'_>>> {
        Ok(self.get(key.as_str()).map(|value| Raw::Flat(vec![value])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_name_to_key() {
        assert_eq!(env_name_to_key("BUILD__OUT_DIR"), "build.out_dir");
        assert_eq!(env_name_to_key("HOME"), "home");
        assert_eq!(env_name_to_key("A__B__C"), "a.b.c");
    }

    #[test]
    fn test_last_write_wins() {
        let env = EnvMap::from_vars([("MODE", "debug"), ("MODE", "release")]);
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("mode"), Some("release"));
    }

    #[test]
    fn test_layer_returns_single_value() {
        let env = EnvMap::from_vars([("BUILD__OUT_DIR", "B1:B2")]);
        let key = Key::parse("build.out_dir").unwrap();
        assert_eq!(env.raw(&key).unwrap(), Some(Raw::Flat(vec!["B1:B2"])));
    }
}
