//! Dotted configuration keys.
//!
//! A key such as `build.out_dir` addresses the same setting in every source:
//! the CLI define `-Dbuild.out_dir=...`, the environment variable
//! `BUILD__OUT_DIR`, and the file entry `build: { out-dir: ... }`.

use crate::error::{ConfigError, Result};
use std::fmt;

/// A validated dot-separated key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    dotted: String,
}

impl Key {
    /// Parse and validate a dotted key.
    ///
    /// Segments must be non-empty and contain only lowercase ASCII letters,
    /// digits and underscores.
    pub fn parse(key: &str) -> Result<Self> {
        if key.is_empty() {
            return Err(ConfigError::invalid_key(key, "key is empty"));
        }
        for segment in key.split('.') {
            if segment.is_empty() {
                return Err(ConfigError::invalid_key(key, "empty segment"));
            }
            if let Some(c) = segment
                .chars()
                .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_'))
            {
                return Err(ConfigError::invalid_key(
                    key,
                    format!("segment '{}' contains invalid character '{}'", segment, c),
                ));
            }
        }
        Ok(Self {
            dotted: key.to_string(),
        })
    }

    /// The key in its dotted form, as used by CLI and environment maps.
    pub fn as_str(&self) -> &str {
        &self.dotted
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.dotted.split('.')
    }

    /// Dotted form of the first `count` segments.
    pub fn prefix(&self, count: usize) -> &str {
        match self.dotted.match_indices('.').nth(count.saturating_sub(1)) {
            Some((idx, _)) if count > 0 => &self.dotted[..idx],
            _ if count == 0 => "",
            _ => &self.dotted,
        }
    }
}

/// Convert a key segment to the dashed form used inside files.
pub fn file_segment(segment: &str) -> String {
    segment.replace('_', "-")
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.dotted
    }
}
