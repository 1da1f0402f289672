//! Static taxonomy model for a dataset.
//!
//! A taxonomy is the declarative description of which labels can occur in a
//! dataset's annotations: the category names, and for each category the
//! sub-categories it may be tagged with together with their admissible
//! values. It is the input from which a
//! [`CategoryRegistry`](crate::registry::CategoryRegistry) is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sub-category key -> ordered list of values.
pub type SubCategoryMap = IndexMap<String, Vec<String>>;

/// Category name -> its sub-category definitions.
pub type SubCategories = IndexMap<String, SubCategoryMap>;

/// A dataset taxonomy together with descriptive metadata.
///
/// # Example
///
/// An annotation file has the category/sub-category combinations
/// `(cell, header=yes)`, `(cell, header=no)` and `(table, -)`:
///
/// ```
/// use labelmap::taxonomy::Taxonomy;
///
/// let taxonomy = Taxonomy::from_parts(
///     ["cell", "table"],
///     [("cell", vec![("header", vec!["yes", "no"])])],
/// );
/// assert_eq!(taxonomy.categories, vec!["cell", "table"]);
/// assert_eq!(taxonomy.sub_categories["cell"]["header"], vec!["yes", "no"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Metadata about the dataset.
    #[serde(default)]
    pub info: DatasetInfo,

    /// All category names, in canonical id order.
    pub categories: Vec<String>,

    /// Sub-category definitions, keyed by category name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub sub_categories: SubCategories,
}

impl Taxonomy {
    /// Creates a taxonomy that has categories only.
    pub fn with_categories<C>(categories: C) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Creates a taxonomy without metadata from plain name lists.
    pub fn from_parts<C, S, K, V>(categories: C, sub_categories: S) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        S: IntoIterator<Item = (K, Vec<(K, Vec<V>)>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            info: DatasetInfo::default(),
            categories: categories.into_iter().map(Into::into).collect(),
            sub_categories: sub_categories
                .into_iter()
                .map(|(cat, subs)| {
                    let subs = subs
                        .into_iter()
                        .map(|(key, values)| {
                            (key.into(), values.into_iter().map(Into::into).collect())
                        })
                        .collect();
                    (cat.into(), subs)
                })
                .collect(),
        }
    }
}

/// Metadata about a dataset.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Name of the dataset.
    #[serde(default)]
    pub name: String,

    /// Short description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// License of the dataset.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,

    /// Where the dataset can be downloaded from.
    #[serde(default, skip_serializing_if = "DatasetUrl::is_empty")]
    pub url: DatasetUrl,

    /// Split name (e.g. "train") -> relative path of the split.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub splits: IndexMap<String, String>,
}

impl DatasetInfo {
    /// Creates metadata with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the relative path of a split, or `""` if the split is unknown.
    pub fn get_split(&self, key: &str) -> &str {
        self.splits.get(key).map(String::as_str).unwrap_or("")
    }
}

/// A single download location or a list of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetUrl {
    One(String),
    Many(Vec<String>),
}

impl Default for DatasetUrl {
    fn default() -> Self {
        DatasetUrl::One(String::new())
    }
}

impl DatasetUrl {
    /// Returns true if no location is given.
    pub fn is_empty(&self) -> bool {
        match self {
            DatasetUrl::One(url) => url.is_empty(),
            DatasetUrl::Many(urls) => urls.iter().all(String::is_empty),
        }
    }

    /// Iterates over all non-empty locations.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let urls: &[String] = match self {
            DatasetUrl::One(url) => std::slice::from_ref(url),
            DatasetUrl::Many(urls) => urls,
        };
        urls.iter().map(String::as_str).filter(|url| !url.is_empty())
    }
}
