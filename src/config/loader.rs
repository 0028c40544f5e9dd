//! Loading a [`Config`] straight from process arguments.
//!
//! Recognizes `--config <path>` and repeated `-D <key>=<value>`. The file is
//! read once; its absolute `file://` URL becomes the base location for
//! relative paths inside it.

use super::paths::normalize_path_components;
use super::resolver::Config;
use crate::error::{ConfigError, Result};
use crate::sources::EnvMap;
use clap::{Args, Parser};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

/// Configuration arguments, meant to be flattened into an application's CLI.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Path to configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Define a configuration value, e.g. -Dbuild.out_dir=target/ (repeatable)
    #[arg(short = 'D', value_name = "KEY=VALUE", global = true)]
    pub defines: Vec<String>,
}

#[derive(Debug, Parser)]
struct LoaderCli {
    #[command(flatten)]
    args: ConfigArgs,
}

/// Builds a [`Config`] from command-line arguments.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Parse `args` (program name first) and load the named file, if any.
    ///
    /// `env = None` snapshots the process environment.
    pub async fn from_args<I, T>(args: I, env: Option<EnvMap>) -> Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = LoaderCli::try_parse_from(args)?;
        Self::from_config_args(&cli.args, env).await
    }

    /// Build from already-parsed arguments.
    pub async fn from_config_args(args: &ConfigArgs, env: Option<EnvMap>) -> Result<Config> {
        let env = env.unwrap_or_else(EnvMap::from_process);
        let mut builder = Config::builder().defines(&args.defines).env_map(env);

        if let Some(path) = &args.config {
            let (text, location) = read_config_file(path).await?;
            builder = builder.file_text(text).location(location);
        }

        builder.build()
    }
}

async fn read_config_file(path: &Path) -> Result<(String, Url)> {
    let absolute = if path.is_absolute() {
        normalize_path_components(path)
    } else {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        normalize_path_components(&cwd.join(path))
    };

    let text = tokio::fs::read_to_string(&absolute)
        .await
        .map_err(|source| ConfigError::Io {
            path: absolute.clone(),
            source,
        })?;
    info!(path = %absolute.display(), bytes = text.len(), "Loaded configuration file");

    let location = Url::from_file_path(&absolute).map_err(|()| ConfigError::Io {
        path: absolute.clone(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path cannot be expressed as a file URL",
        ),
    })?;
    Ok((text, location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_from_args_without_file() {
        let cfg = ConfigLoader::from_args(
            ["app", "-Da=1", "-D", "b=two"],
            Some(EnvMap::from_vars([("C", "three")])),
        )
        .await
        .unwrap();
        assert_eq!(cfg.get_i64("a").unwrap(), 1);
        assert_eq!(cfg.get_string("b").unwrap(), "two");
        assert_eq!(cfg.get_string("c").unwrap(), "three");
        assert!(cfg.location().is_none());
    }

    #[tokio::test]
    async fn test_from_args_loads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.yaml");
        std::fs::write(&path, "name: from-file\n").unwrap();

        let cfg = ConfigLoader::from_args(
            ["app".into(), "--config".into(), path.clone().into_os_string()],
            Some(EnvMap::default()),
        )
        .await
        .unwrap();
        assert_eq!(cfg.get_string("name").unwrap(), "from-file");
        assert_eq!(cfg.location(), Some(&Url::from_file_path(&path).unwrap()));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.yaml");
        let args = ConfigArgs {
            config: Some(path),
            defines: vec![],
        };
        let err = ConfigLoader::from_config_args(&args, Some(EnvMap::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[tokio::test]
    async fn test_unknown_argument_rejected() {
        let err = ConfigLoader::from_args(["app", "--bogus"], Some(EnvMap::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Arguments(_)));
    }
}
