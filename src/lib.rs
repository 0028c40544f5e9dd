//! Layered configuration resolver.
//!
//! This module exports the resolver, its sources and the CLI used by the
//! `layerconf` binary.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod key;
pub mod logging;
pub mod sources;

pub use config::{Config, ConfigBuilder, ConfigLoader, ListMode, PathOptions};
pub use error::{ConfigError, Result};
pub use key::Key;
pub use sources::Source;
