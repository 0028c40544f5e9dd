//! Structured error types for configuration access.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Access errors
    MissingKey,
    AmbiguousValue,
    TypeMismatch,
    InvalidValue,
    PathNotFound,
    InvalidKey,

    // Construction errors
    ConflictingFileInput,
    MalformedDefine,
    NotAMapping,
    ParseError,
    IoError,
    InvalidArguments,
}

/// Errors raised while building a [`Config`](crate::config::Config) or
/// reading a value out of it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration key '{key}'")]
    MissingKey { key: String },

    #[error(
        "ambiguous value for '{key}': expected a single value but got [{}]",
        .values.join(", ")
    )]
    AmbiguousValue { key: String, values: Vec<String> },

    #[error("type mismatch at '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },

    #[error(
        "invalid value '{value}' for '{key}': expected one of [{}]",
        .allowed.join(", ")
    )]
    InvalidValue {
        key: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("path for '{key}' does not exist: {location}")]
    PathNotFound { key: String, location: String },

    #[error("invalid configuration key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("only one of file text or a parsed file tree may be supplied")]
    ConflictingFileInput,

    #[error("malformed define '{define}': expected <key>=<value>")]
    MalformedDefine { define: String },

    #[error("configuration file root must be a mapping, found {found}")]
    NotAMapping { found: String },

    #[error("failed to parse configuration from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Arguments(#[from] clap::Error),
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::MissingKey { .. } => ErrorCode::MissingKey,
            ConfigError::AmbiguousValue { .. } => ErrorCode::AmbiguousValue,
            ConfigError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            ConfigError::InvalidValue { .. } => ErrorCode::InvalidValue,
            ConfigError::PathNotFound { .. } => ErrorCode::PathNotFound,
            ConfigError::InvalidKey { .. } => ErrorCode::InvalidKey,
            ConfigError::ConflictingFileInput => ErrorCode::ConflictingFileInput,
            ConfigError::MalformedDefine { .. } => ErrorCode::MalformedDefine,
            ConfigError::NotAMapping { .. } => ErrorCode::NotAMapping,
            ConfigError::Parse { .. } => ErrorCode::ParseError,
            ConfigError::Io { .. } => ErrorCode::IoError,
            ConfigError::Arguments(_) => ErrorCode::InvalidArguments,
        }
    }

    // Convenience constructors

    pub fn missing_key(key: &str) -> Self {
        ConfigError::MissingKey {
            key: key.to_string(),
        }
    }

    pub fn ambiguous(key: &str, values: &[String]) -> Self {
        ConfigError::AmbiguousValue {
            key: key.to_string(),
            values: values.to_vec(),
        }
    }

    pub fn type_mismatch(key: &str, expected: &'static str, found: impl Into<String>) -> Self {
        ConfigError::TypeMismatch {
            key: key.to_string(),
            expected,
            found: found.into(),
        }
    }

    pub fn invalid_value<S: AsRef<str>>(key: &str, value: &str, allowed: &[S]) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            allowed: allowed.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn path_not_found(key: &str, location: &url::Url) -> Self {
        ConfigError::PathNotFound {
            key: key.to_string(),
            location: location.to_string(),
        }
    }

    pub fn invalid_key(key: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidKey {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error report suitable for JSON output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ConfigError> for ErrorReport {
    fn from(err: &ConfigError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
