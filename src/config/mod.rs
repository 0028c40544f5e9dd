//! Layered configuration resolution.
//!
//! One logical value space drawn from three sources, highest priority first:
//! 1. **CLI** - `-D<key>=<value>` defines
//! 2. **Environment** - `SECTION__NAME=value` variables
//! 3. **File** - a YAML or JSON document, entries named with dashes
//!
//! ## Lookup Strategy
//! - Scalars (string, bool, integer, path): first source holding the key wins
//! - Lists: either concatenate all sources or take the first, see [`ListMode`]
//! - Raw file access: [`Config::get_file_value`] reads mappings and sequences
//!
//! Types are checked when a value is read, never at construction.

mod builder;
mod loader;
mod paths;
mod resolver;
mod value;

pub use builder::ConfigBuilder;
pub use loader::{ConfigArgs, ConfigLoader};
pub use paths::PathOptions;
pub use resolver::{Config, ListMode};
pub use value::{BOOL_TOKENS, FromConfig};
