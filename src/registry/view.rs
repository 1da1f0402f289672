//! Query options and result views for category lookups.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::taxonomy::CategoryId;

/// Which category list a lookup reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategorySelection {
    /// The categories as initially declared, ignoring all updates.
    Init,
    /// The categories after substitution, ignoring any filter.
    Current,
    /// The filtered categories, or [`Current`](Self::Current) if no filter
    /// has been applied.
    Filtered,
}

/// Options for [`CategoryRegistry::get_categories`](super::CategoryRegistry::get_categories).
#[derive(Clone, Debug)]
pub struct CategoryQuery {
    /// Return an id mapping instead of a plain list.
    pub as_dict: bool,
    /// With `as_dict`, key the mapping by name instead of by id.
    pub name_as_key: bool,
    /// Read the initial categories. Takes precedence over `filtered`.
    pub init: bool,
    /// Read the filtered categories.
    pub filtered: bool,
}

impl Default for CategoryQuery {
    fn default() -> Self {
        Self {
            as_dict: true,
            name_as_key: false,
            init: false,
            filtered: false,
        }
    }
}

impl CategoryQuery {
    /// A query returning the selected categories as a plain list.
    pub fn list(selection: CategorySelection) -> Self {
        Self {
            as_dict: false,
            ..Self::default().select(selection)
        }
    }

    /// A query returning an id -> name mapping of the selected categories.
    pub fn by_id(selection: CategorySelection) -> Self {
        Self::default().select(selection)
    }

    /// A query returning a name -> id mapping of the selected categories.
    pub fn by_name(selection: CategorySelection) -> Self {
        Self {
            name_as_key: true,
            ..Self::default().select(selection)
        }
    }

    fn select(self, selection: CategorySelection) -> Self {
        Self {
            init: selection == CategorySelection::Init,
            filtered: selection == CategorySelection::Filtered,
            ..self
        }
    }

    /// The category list this query reads from.
    pub fn selection(&self) -> CategorySelection {
        if self.init {
            CategorySelection::Init
        } else if self.filtered {
            CategorySelection::Filtered
        } else {
            CategorySelection::Current
        }
    }
}

/// The result of a category lookup.
///
/// Ids are always the 1-based position of the name in the selected list.
/// Serialized ids are decimal strings in both mapping shapes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CategoryView {
    List(Vec<String>),
    ById(IndexMap<CategoryId, String>),
    #[serde(serialize_with = "ids_as_strings")]
    ByName(IndexMap<String, CategoryId>),
}

fn ids_as_strings<S>(map: &IndexMap<String, CategoryId>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(map.iter().map(|(name, id)| (name, id.to_string())))
}

impl CategoryView {
    pub(crate) fn build(categories: &[String], query: &CategoryQuery) -> Self {
        if !query.as_dict {
            return CategoryView::List(categories.to_vec());
        }

        let positions = categories
            .iter()
            .enumerate()
            .map(|(idx, name)| (CategoryId::from_position(idx), name.clone()));

        if query.name_as_key {
            CategoryView::ByName(positions.map(|(id, name)| (name, id)).collect())
        } else {
            CategoryView::ById(positions.collect())
        }
    }

    /// Number of categories in the view.
    pub fn len(&self) -> usize {
        match self {
            CategoryView::List(list) => list.len(),
            CategoryView::ById(map) => map.len(),
            CategoryView::ByName(map) => map.len(),
        }
    }

    /// Returns true if the view holds no categories.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the plain list, if this is a list view.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            CategoryView::List(list) => Some(list),
            _ => None,
        }
    }

    /// Returns the id -> name mapping, if this is an id-keyed view.
    pub fn as_by_id(&self) -> Option<&IndexMap<CategoryId, String>> {
        match self {
            CategoryView::ById(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the name -> id mapping, if this is a name-keyed view.
    pub fn as_by_name(&self) -> Option<&IndexMap<String, CategoryId>> {
        match self {
            CategoryView::ByName(map) => Some(map),
            _ => None,
        }
    }

    /// Category names in id order, whatever the shape of the view.
    pub fn names(&self) -> Vec<&str> {
        match self {
            CategoryView::List(list) => list.iter().map(String::as_str).collect(),
            CategoryView::ById(map) => map.values().map(String::as_str).collect(),
            CategoryView::ByName(map) => map.keys().map(String::as_str).collect(),
        }
    }
}
