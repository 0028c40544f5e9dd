//! Configuration sources.
//!
//! Each source turns its native input into a normalized view:
//! - **CLI** - `-D<key>=<value>` defines, flat map of key to every value given
//! - **Environment** - `SECTION__NAME` variables, flat map of key to one value
//! - **File** - YAML/JSON document, nested tree addressed segment by segment
//!
//! All three answer the same question through [`Layer`]: what raw value, if
//! any, does this source hold for a dotted key?

pub mod cli;
pub mod env;
pub mod file;

use crate::error::Result;
use crate::key::Key;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub use cli::CliMap;
pub use env::EnvMap;
pub use file::FileTree;

/// Source priority (highest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Command-line defines (highest priority)
    Cli = 0,
    /// Environment variables
    Env = 1,
    /// Configuration file (lowest priority)
    File = 2,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Cli => write!(f, "cli"),
            Source::Env => write!(f, "environment"),
            Source::File => write!(f, "file"),
        }
    }
}

/// Raw value held by a single source, before any type conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum Raw<'a> {
    /// Strings from a flat source. CLI defines may carry several.
    Flat(Vec<&'a str>),
    /// Terminal node from the file tree.
    Node(&'a Value),
}

/// Lookup by dotted key in one backing store.
pub trait Layer {
    fn source(&self) -> Source;

    /// Returns `Ok(None)` when the store has no value for `key`.
    fn raw(&self, key: &Key) -> Result<Option<Raw<'_>>>;
}
