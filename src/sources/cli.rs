//! Command-line define parsing.

use super::{Layer, Raw, Source};
use crate::error::{ConfigError, Result};
use crate::key::Key;
use std::collections::HashMap;

/// Defines given on the command line, keyed by their literal dotted key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliMap {
    values: HashMap<String, Vec<String>>,
}

impl CliMap {
    /// All values given for `key`, in command-line order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.values.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse `<key>=<value>` defines.
///
/// The key is everything before the first `=`; the value may itself contain
/// `=`. Repeating a key appends another value.
pub fn parse_defines<I, S>(defines: I) -> Result<CliMap>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values: HashMap<String, Vec<String>> = HashMap::new();
    for define in defines {
        let define = define.as_ref();
        let (key, value) = define
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedDefine {
                define: define.to_string(),
            })?;
        if key.is_empty() {
            return Err(ConfigError::MalformedDefine {
                define: define.to_string(),
            });
        }
        values
            .entry(key.to_string())
            .or_default()
            .push(value.to_string());
    }
    Ok(CliMap { values })
}

impl Layer for CliMap {
    fn source(&self) -> Source {
        Source::Cli
    }

    fn raw(&self, key: &Key) -> Result<Option<Raw<'_>>> {
        Ok(self
            .get(key.as_str())
            .map(|values| Raw::Flat(values.iter().map(String::as_str).collect())))
    }
}
