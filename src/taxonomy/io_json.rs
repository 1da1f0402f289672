//! JSON serialization for taxonomy files.
//!
//! The JSON layout mirrors [`Taxonomy`] field by field:
//!
//! ```json
//! {
//!   "info": { "name": "doclaynet", "splits": { "train": "train" } },
//!   "categories": ["text", "table", "cell"],
//!   "sub_categories": { "cell": { "header": ["yes", "no"] } }
//! }
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::model::Taxonomy;
use crate::error::LabelmapError;

/// Reads a taxonomy from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_taxonomy_json(path: &Path) -> Result<Taxonomy, LabelmapError> {
    let file = File::open(path).map_err(LabelmapError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| LabelmapError::TaxonomyJsonParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a taxonomy to a pretty-printed JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_taxonomy_json(path: &Path, taxonomy: &Taxonomy) -> Result<(), LabelmapError> {
    let file = File::create(path).map_err(LabelmapError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, taxonomy).map_err(|source| {
        LabelmapError::TaxonomyJsonWrite {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Reads a taxonomy from a JSON string.
pub fn from_json_str(json: &str) -> Result<Taxonomy, serde_json::Error> {
    serde_json::from_str(json)
}

/// Reads a taxonomy from raw JSON bytes.
///
/// Useful for fuzzing and processing raw bytes without requiring UTF-8 upfront.
pub fn from_json_slice(bytes: &[u8]) -> Result<Taxonomy, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Writes a taxonomy to a pretty-printed JSON string.
pub fn to_json_string(taxonomy: &Taxonomy) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(taxonomy)
}
