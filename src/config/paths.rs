//! Path value resolution.
//!
//! Path strings become `file://` URLs:
//! - CLI and environment values resolve against the working directory
//! - File values resolve against the file's own location when one is known
//! - A trailing separator marks a directory (the URL keeps its trailing `/`)

use crate::error::{ConfigError, Result};
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};
use url::Url;

/// Options shared by the path accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathOptions {
    /// Resolve relative file values against the file's location.
    pub resolve_file_uri: bool,
    /// Fail with `PathNotFound` unless the resolved location exists.
    pub must_exist: bool,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            resolve_file_uri: true,
            must_exist: false,
        }
    }
}

impl PathOptions {
    pub fn resolve_file_uri(mut self, resolve: bool) -> Self {
        self.resolve_file_uri = resolve;
        self
    }

    pub fn must_exist(mut self, must_exist: bool) -> Self {
        self.must_exist = must_exist;
        self
    }
}

/// Resolve a path string. `base` is the file location for file-sourced
/// values, `None` for working-directory resolution.
///
/// The value is always a filesystem path, never a URL reference: `#`, `?`
/// and `%` are ordinary characters in it.
pub(crate) fn resolve_path(key: &str, raw: &str, base: Option<&Url>) -> Result<Url> {
    match base {
        Some(base) if base.scheme() == "file" => match base.to_file_path() {
            Ok(base_path) => {
                let dir = if base.path().ends_with('/') {
                    base_path.as_path()
                } else {
                    base_path.parent().unwrap_or(base_path.as_path())
                };
                resolve_against(key, dir, raw)
            }
            Err(()) => resolve_remote(key, raw, base),
        },
        Some(base) => resolve_remote(key, raw, base),
        None => {
            let cwd = std::env::current_dir().map_err(|source| ConfigError::Io {
                path: PathBuf::from("."),
                source,
            })?;
            resolve_against(key, &cwd, raw)
        }
    }
}

fn is_directory_value(raw: &str) -> bool {
    raw.ends_with('/') || raw.ends_with(MAIN_SEPARATOR)
}

fn resolve_against(key: &str, dir: &Path, raw: &str) -> Result<Url> {
    let absolute = normalize_path_components(&dir.join(raw));
    let url = if is_directory_value(raw) {
        Url::from_directory_path(&absolute)
    } else {
        Url::from_file_path(&absolute)
    };
    url.map_err(|()| ConfigError::type_mismatch(key, "path", format!("string \"{}\"", raw)))
}

/// Resolve against a non-`file` base segment by segment, so every segment
/// is percent-encoded as path text.
fn resolve_remote(key: &str, raw: &str, base: &Url) -> Result<Url> {
    let mut segments: Vec<String> = if raw.starts_with('/') {
        Vec::new()
    } else {
        let mut inherited: Vec<String> = base
            .path_segments()
            .map(|parts| parts.map(str::to_string).collect())
            .unwrap_or_default();
        // The last segment is the file name (or empty after a trailing `/`).
        inherited.pop();
        inherited
    };
    for segment in raw.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            name => segments.push(name.to_string()),
        }
    }
    if is_directory_value(raw) || segments.is_empty() {
        segments.push(String::new());
    }

    let mut location = base.clone();
    location.set_query(None);
    location.set_fragment(None);
    location
        .path_segments_mut()
        .map_err(|()| {
            ConfigError::type_mismatch(key, "path", format!("string \"{}\"", raw))
        })?
        .clear()
        .extend(segments.iter().map(String::as_str));
    Ok(location)
}

/// Filesystem check run after resolution.
///
/// URLs ending in `/` must be directories, all others regular files.
/// Non-`file` URLs cannot be checked locally and count as missing.
pub(crate) fn check_exists(key: &str, location: &Url) -> Result<()> {
    let exists = match location.to_file_path() {
        Ok(path) if location.path().ends_with('/') => path.is_dir(),
        Ok(path) => path.is_file(),
        Err(()) => false,
    };
    if exists {
        Ok(())
    } else {
        Err(ConfigError::path_not_found(key, location))
    }
}

/// Resolve `.` and `..` without touching the filesystem.
pub(crate) fn normalize_path_components(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => components.push(Component::RootDir),
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                } else if !matches!(components.last(), Some(Component::RootDir)) {
                    components.push(Component::ParentDir);
                }
            }
            Component::Normal(name) => components.push(Component::Normal(name)),
        }
    }

    components.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_dot_components() {
        let normalized = normalize_path_components(Path::new("/a/./b/../c"));
        assert_eq!(normalized, PathBuf::from("/a/c"));
    }

    #[test]
    fn test_normalize_cannot_escape_root() {
        let normalized = normalize_path_components(Path::new("/../x"));
        assert_eq!(normalized, PathBuf::from("/x"));
    }

    #[test]
    fn test_local_file_path() {
        let cwd = std::env::current_dir().unwrap();
        let url = resolve_path("k", "src/lib.rs", None).unwrap();
        assert_eq!(url, Url::from_file_path(cwd.join("src/lib.rs")).unwrap());
        assert!(!url.path().ends_with('/'));
    }

    #[test]
    fn test_local_directory_path_keeps_trailing_slash() {
        let url = resolve_path("k", "out/dir/", None).unwrap();
        assert!(url.path().ends_with("/out/dir/"));
    }

    #[test]
    fn test_local_absolute_path() {
        let url = resolve_path("k", "/tmp/x/../y", None).unwrap();
        assert_eq!(url.as_str(), "file:///tmp/y");
    }

    #[test]
    fn test_base_relative_path() {
        let base = Url::parse("file:///etc/app/config.yaml").unwrap();
        let url = resolve_path("k", "rel/path/", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "file:///etc/app/rel/path/");
        let url = resolve_path("k", "../shared.txt", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "file:///etc/shared.txt");
    }

    #[test]
    fn test_file_base_treats_value_as_filesystem_path() {
        let base = Url::parse("file:///etc/app/config.yaml").unwrap();

        let dir = resolve_path("k", "data#1/", Some(&base)).unwrap();
        assert_eq!(dir.as_str(), "file:///etc/app/data%231/");
        assert_eq!(dir.to_file_path().unwrap(), PathBuf::from("/etc/app/data#1"));

        let pct = resolve_path("k", "a%2Fb?x", Some(&base)).unwrap();
        assert_eq!(pct.to_file_path().unwrap(), PathBuf::from("/etc/app/a%2Fb?x"));
        assert_eq!(pct.query(), None);
    }

    #[test]
    fn test_file_and_local_resolution_agree() {
        let cwd = std::env::current_dir().unwrap();
        let base = Url::from_file_path(cwd.join("config.yaml")).unwrap();
        for raw in ["data#1/", "a%2Fb", "x?y", "./sub/../plain.txt"] {
            assert_eq!(
                resolve_path("k", raw, Some(&base)).unwrap(),
                resolve_path("k", raw, None).unwrap(),
                "value {raw}"
            );
        }
    }

    #[test]
    fn test_remote_base_encodes_segments() {
        let base = Url::parse("https://example.com/conf/app.yaml?v=2").unwrap();
        let url = resolve_path("k", "data#1/x y", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/conf/data%231/x%20y");

        let url = resolve_path("k", "../up/", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/up/");

        let url = resolve_path("k", "/abs.txt", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "https://example.com/abs.txt");
    }

    #[test]
    fn test_check_exists_file_and_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("present.txt");
        std::fs::write(&file, "x").unwrap();

        let file_url = Url::from_file_path(&file).unwrap();
        assert!(check_exists("k", &file_url).is_ok());

        let dir_url = Url::from_directory_path(temp.path()).unwrap();
        assert!(check_exists("k", &dir_url).is_ok());

        // A directory addressed as a file does not count.
        let dir_as_file = Url::from_file_path(temp.path()).unwrap();
        assert!(check_exists("k", &dir_as_file).is_err());

        let missing = Url::from_file_path(temp.path().join("absent.txt")).unwrap();
        let err = check_exists("k", &missing).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound { ref key, .. } if key == "k"));
    }

    #[test]
    fn test_check_exists_rejects_remote_urls() {
        let url = Url::parse("https://example.com/config/").unwrap();
        assert!(check_exists("k", &url).is_err());
    }
}
