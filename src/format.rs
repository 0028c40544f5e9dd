//! Output formatting for resolved values.

use crate::sources::Source;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;
use url::Url;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, lists one element per line
    #[default]
    Text,
    /// JSON
    Json,
}

/// A value produced by one of the `layerconf` commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Resolved {
    String(String),
    Bool(bool),
    Int(i64),
    Path(String),
    List(Vec<String>),
    Node(Value),
    Source(Source),
}

impl From<Url> for Resolved {
    fn from(url: Url) -> Self {
        Resolved::Path(url.into())
    }
}

impl From<Vec<Url>> for Resolved {
    fn from(urls: Vec<Url>) -> Self {
        Resolved::List(urls.into_iter().map(String::from).collect())
    }
}

/// Render a result. `None` prints as an empty line in text and `null` in JSON.
pub fn render(value: Option<&Resolved>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value).unwrap_or_default(),
        OutputFormat::Text => match value {
            None => String::new(),
            Some(Resolved::String(s)) | Some(Resolved::Path(s)) => s.clone(),
            Some(Resolved::Bool(b)) => b.to_string(),
            Some(Resolved::Int(n)) => n.to_string(),
            Some(Resolved::List(items)) => items.join("\n"),
            Some(Resolved::Source(source)) => source.to_string(),
            Some(Resolved::Node(node)) => match node {
                Value::String(s) => s.clone(),
                other => serde_yaml::to_string(other)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_else(|_| other.to_string()),
            },
        },
    }
}
