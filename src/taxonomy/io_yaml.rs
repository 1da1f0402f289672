//! YAML reading for taxonomy files.
//!
//! Same layout as the JSON form; YAML is the more common choice for
//! hand-maintained dataset definitions.

use std::fs;
use std::path::Path;

use super::model::Taxonomy;
use crate::error::LabelmapError;

/// Reads a taxonomy from a YAML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_taxonomy_yaml(path: &Path) -> Result<Taxonomy, LabelmapError> {
    let data = fs::read_to_string(path)?;

    serde_yaml::from_str(&data).map_err(|source| LabelmapError::TaxonomyYamlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a taxonomy from a YAML string.
pub fn from_yaml_str(yaml: &str) -> Result<Taxonomy, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}
