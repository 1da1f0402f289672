use std::path::PathBuf;
use thiserror::Error;

/// The main error type for labelmap operations.
#[derive(Debug, Error)]
pub enum LabelmapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse taxonomy JSON from {path}: {source}")]
    TaxonomyJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse taxonomy YAML from {path}: {source}")]
    TaxonomyYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write taxonomy JSON to {path}: {source}")]
    TaxonomyJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to render JSON output: {0}")]
    JsonOutput(#[source] serde_json::Error),

    /// The taxonomy handed to a registry is malformed.
    #[error("Invalid taxonomy configuration: {0}")]
    Configuration(String),

    /// A query or merge referenced state that does not exist.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
