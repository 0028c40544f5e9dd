//! Construction of a [`Config`] from raw inputs.

use super::resolver::Config;
use crate::error::{ConfigError, Result};
use crate::sources::{EnvMap, FileTree, cli::parse_defines};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Collects raw inputs and hands them to the source parsers on `build`.
///
/// The environment defaults to empty, not to the process environment; use
/// [`EnvMap::from_process`] explicitly when that is wanted.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    defines: Vec<String>,
    env: EnvMap,
    file_text: Option<String>,
    file_tree: Option<Value>,
    location: Option<Url>,
}

impl ConfigBuilder {
    /// Add `<key>=<value>` defines. May be called repeatedly.
    pub fn defines<I, S>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.defines
            .extend(defines.into_iter().map(|d| d.as_ref().to_string()));
        self
    }

    /// Raw environment variables (`NAME__SUB=value`).
    pub fn env<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.env = EnvMap::from_vars(vars);
        self
    }

    /// An already-mapped environment.
    pub fn env_map(mut self, env: EnvMap) -> Self {
        self.env = env;
        self
    }

    /// YAML or JSON file contents, parsed on `build`.
    pub fn file_text(mut self, text: impl Into<String>) -> Self {
        self.file_text = Some(text.into());
        self
    }

    /// An already-parsed file tree.
    pub fn file_tree(mut self, tree: Value) -> Self {
        self.file_tree = Some(tree);
        self
    }

    /// Where the file came from; relative path values in the file resolve against it.
    pub fn location(mut self, location: Url) -> Self {
        self.location = Some(location);
        self
    }

    pub fn build(self) -> Result<Config> {
        let file = match (self.file_text, self.file_tree) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingFileInput),
            (Some(text), None) => {
                let origin = self
                    .location
                    .as_ref()
                    .map(Url::to_string)
                    .unwrap_or_else(|| "inline text".to_string());
                FileTree::parse(&text, &origin)?
            }
            (None, Some(tree)) => FileTree::from_value(tree)?,
            (None, None) => FileTree::default(),
        };
        let cli = parse_defines(&self.defines)?;

        debug!(
            defines = cli.len(),
            env_vars = self.env.len(),
            file_keys = file.root().len(),
            location = ?self.location.as_ref().map(Url::as_str),
            "Built configuration"
        );

        Ok(Config {
            cli,
            env: self.env,
            file,
            location: self.location,
        })
    }
}
