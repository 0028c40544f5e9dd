//! layerconf
//!
//! Resolve a configuration value from `-D` defines, environment variables
//! and a `--config` file, and print it.

use anyhow::Result;
use clap::Parser;
use layerconf::cli::Cli;
use layerconf::config::ConfigLoader;
use layerconf::error::{ConfigError, ErrorReport};
use layerconf::format::{OutputFormat, render};
use layerconf::logging::{self, LogTarget};
use std::process::ExitCode;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    logging::init(&LogTarget::parse(&cli.log), cli.verbose)?;

    let outcome = match ConfigLoader::from_config_args(&cli.config, None).await {
        Ok(config) => cli.command.execute(&config),
        Err(err) => Err(err.into()),
    };

    match outcome {
        Ok(value) => {
            let rendered = render(value.as_ref(), cli.format);
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            debug!(error = ?err, "Command failed");
            match (err.downcast_ref::<ConfigError>(), cli.format) {
                (Some(config_err), OutputFormat::Json) => {
                    let report = ErrorReport::from(config_err);
                    eprintln!("{}", serde_json::to_string_pretty(&report)?);
                }
                _ => eprintln!("error: {:#}", err),
            }
            Ok(ExitCode::from(2))
        }
    }
}
