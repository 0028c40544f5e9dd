//! Get subcommand for layerconf CLI

use crate::config::{Config, ListMode, PathOptions};
use crate::error::ConfigError;
use crate::format::Resolved;
use anyhow::Context;
use clap::{Args, ValueEnum};
use regex_lite::Regex;

/// Kind of value to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ValueKind {
    #[default]
    String,
    Bool,
    Int,
    Path,
    List,
    PathList,
}

/// Arguments for the get subcommand
#[derive(Args, Debug, Default)]
pub struct GetArgs {
    /// Dotted key, e.g. build.out_dir
    pub key: String,

    /// Kind of value to resolve
    #[arg(short, long, value_enum, default_value_t)]
    pub kind: ValueKind,

    /// Regex splitting CLI and environment values of list kinds
    #[arg(long, value_name = "REGEX")]
    pub delimiter: Option<String>,

    /// Concatenate list values from every source instead of taking the first
    #[arg(long)]
    pub combine: bool,

    /// Resolve relative paths from the file against the working directory
    #[arg(long)]
    pub no_resolve_file_uri: bool,

    /// Fail unless the resolved path exists
    #[arg(long)]
    pub must_exist: bool,

    /// Allowed string values (repeatable)
    #[arg(long = "valid", value_name = "VALUE")]
    pub valid: Vec<String>,

    /// Print nothing instead of failing when the key is absent
    #[arg(long)]
    pub optional: bool,
}

impl GetArgs {
    fn list_mode(&self) -> ListMode {
        if self.combine {
            ListMode::Combine
        } else {
            ListMode::Override
        }
    }

    fn path_options(&self) -> PathOptions {
        PathOptions::default()
            .resolve_file_uri(!self.no_resolve_file_uri)
            .must_exist(self.must_exist)
    }

    fn delimiter(&self) -> anyhow::Result<Option<Regex>> {
        self.delimiter
            .as_deref()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("invalid delimiter regex '{}'", pattern))
            })
            .transpose()
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<Option<Resolved>> {
        let key = self.key.as_str();
        let delimiter = self.delimiter()?;
        let allowed: Vec<&str> = self.valid.iter().map(String::as_str).collect();

        let value = match self.kind {
            ValueKind::String if allowed.is_empty() => {
                config.get_optional_string(key)?.map(Resolved::String)
            }
            ValueKind::String => config
                .get_optional_string_one_of(key, &allowed)?
                .map(Resolved::String),
            ValueKind::Bool => config.get_optional_bool(key)?.map(Resolved::Bool),
            ValueKind::Int => config.get_optional_i64(key)?.map(Resolved::Int),
            ValueKind::Path => config
                .get_optional_path(key, self.path_options())?
                .map(Resolved::from),
            ValueKind::List => config
                .get_string_list(key, delimiter.as_ref(), self.list_mode())?
                .map(Resolved::List),
            ValueKind::PathList => config
                .get_path_list(
                    key,
                    delimiter.as_ref(),
                    self.list_mode(),
                    self.path_options(),
                )?
                .map(Resolved::from),
        };

        match value {
            None if !self.optional => Err(ConfigError::missing_key(key).into()),
            value => Ok(value),
        }
    }
}
