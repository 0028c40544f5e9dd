//! `layerconf` commands.
//!
//! - `get <key>` resolves a value across defines, environment and file
//! - `file <key>` prints a raw subtree of the configuration file
//! - `source <key>` names the source that would answer a lookup

pub mod get;

use crate::config::{Config, ConfigArgs};
use crate::format::{OutputFormat, Resolved};
use clap::{Args, Parser, Subcommand};
use get::GetArgs;

/// Resolve configuration values from CLI defines, environment and a config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve a value across CLI defines, environment and file
    Get(GetArgs),

    /// Print a raw subtree of the configuration file
    File(KeyArgs),

    /// Print which source supplies a key
    Source(KeyArgs),
}

/// A single dotted key argument
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Dotted key, e.g. build.out_dir
    pub key: String,
}

impl Command {
    /// Run the command against a built configuration.
    pub fn execute(&self, config: &Config) -> anyhow::Result<Option<Resolved>> {
        match self {
            Command::Get(args) => args.execute(config),
            Command::File(args) => Ok(config.file_node(&args.key)?.cloned().map(Resolved::Node)),
            Command::Source(args) => Ok(config.source_of(&args.key)?.map(Resolved::Source)),
        }
    }
}
