//! Static taxonomy definitions for labelmap.
//!
//! A [`Taxonomy`] is plain data: it lists the categories that can occur in a
//! dataset and the sub-categories each category may carry. It can be read
//! from JSON or YAML and is turned into a live, mutable view by
//! [`CategoryRegistry`](crate::registry::CategoryRegistry).

mod ids;
pub mod io_json;
pub mod io_yaml;
mod model;

use std::path::Path;

pub use ids::CategoryId;
pub use model::{DatasetInfo, DatasetUrl, SubCategories, SubCategoryMap, Taxonomy};

use crate::error::LabelmapError;

/// On-disk encodings a taxonomy can be read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaxonomyFormat {
    Json,
    Yaml,
}

impl TaxonomyFormat {
    /// Human-readable name for the format.
    pub fn name(&self) -> &'static str {
        match self {
            TaxonomyFormat::Json => "json",
            TaxonomyFormat::Yaml => "yaml",
        }
    }

    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(TaxonomyFormat::Json),
            "yaml" | "yml" => Some(TaxonomyFormat::Yaml),
            _ => None,
        }
    }
}

/// Reads a taxonomy, inferring the format from the extension when `format`
/// is `None`.
///
/// # Errors
/// Returns [`LabelmapError::UnsupportedFormat`] if no format is given and the
/// extension is not recognised, otherwise any read or parse error.
pub fn read_taxonomy(
    path: &Path,
    format: Option<TaxonomyFormat>,
) -> Result<Taxonomy, LabelmapError> {
    let format = match format.or_else(|| TaxonomyFormat::from_path(path)) {
        Some(format) => format,
        None => {
            return Err(LabelmapError::UnsupportedFormat(format!(
                "cannot infer taxonomy format of '{}' (expected .json, .yaml or .yml)",
                path.display()
            )));
        }
    };

    tracing::debug!(path = %path.display(), format = format.name(), "reading taxonomy");
    match format {
        TaxonomyFormat::Json => io_json::read_taxonomy_json(path),
        TaxonomyFormat::Yaml => io_yaml::read_taxonomy_yaml(path),
    }
}
