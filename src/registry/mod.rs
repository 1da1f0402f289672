//! Category bookkeeping for a single dataset.
//!
//! A [`CategoryRegistry`] keeps the taxonomy a dataset was declared with and
//! a derived "current view" of it. The view can be changed in two ways:
//!
//! - **substitution** ([`CategoryRegistry::set_cat_to_sub_cat`]) replaces a
//!   category by the values of one of its sub-categories, promoting those
//!   values to top-level categories;
//! - **filtering** ([`CategoryRegistry::filter_categories`]) restricts the
//!   view to a subset of names without touching the substituted list.
//!
//! Whatever the view, category ids are the dense 1-based positions of the
//! names in the selected list.
//!
//! Mutators take `&mut self`; a registry shared between threads must be
//! wrapped in a lock by the caller.
//!
//! # Example
//!
//! ```
//! use labelmap::registry::{CategoryQuery, CategoryRegistry, CategorySelection};
//! use labelmap::taxonomy::{CategoryId, Taxonomy};
//!
//! let taxonomy = Taxonomy::from_parts(
//!     ["cat1", "cat2"],
//!     [("cat1", vec![("s", vec!["a", "b"])])],
//! );
//! let mut registry = CategoryRegistry::from_taxonomy(&taxonomy)?;
//!
//! registry.set_cat_to_sub_cat([("cat1", "s")]);
//! assert_eq!(registry.categories(CategorySelection::Current), ["a", "b", "cat2"]);
//!
//! let view = registry.get_categories(&CategoryQuery::by_name(CategorySelection::Current));
//! assert_eq!(view.as_by_name().unwrap()["cat2"], CategoryId(3));
//!
//! registry.filter_categories(["cat2", "a"]);
//! assert_eq!(registry.categories(CategorySelection::Filtered), ["a", "cat2"]);
//! # Ok::<(), labelmap::LabelmapError>(())
//! ```

mod merge;
mod view;

pub use merge::merge;
pub use view::{CategoryQuery, CategorySelection, CategoryView};

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::LabelmapError;
use crate::taxonomy::{CategoryId, DatasetInfo, SubCategories, Taxonomy};

/// A versioned view over a fixed category taxonomy.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryRegistry {
    init_categories: Vec<String>,
    init_sub_categories: SubCategories,
    categories_update: Vec<String>,
    cat_to_sub_cat: Option<IndexMap<String, String>>,
    categories_filter_update: Option<Vec<String>>,
}

impl CategoryRegistry {
    /// Creates a registry from category names and their sub-categories.
    ///
    /// # Errors
    /// Returns [`LabelmapError::Configuration`] if a category is listed twice,
    /// if a sub-category definition refers to an undeclared category, or if a
    /// sub-category has no values.
    pub fn new<C>(
        init_categories: C,
        init_sub_categories: SubCategories,
    ) -> Result<Self, LabelmapError>
    where
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let init_categories: Vec<String> = init_categories.into_iter().map(Into::into).collect();
        check_taxonomy(&init_categories, &init_sub_categories)?;

        Ok(Self {
            categories_update: init_categories.clone(),
            init_categories,
            init_sub_categories,
            cat_to_sub_cat: None,
            categories_filter_update: None,
        })
    }

    /// Creates a registry from a loaded taxonomy.
    ///
    /// # Errors
    /// Same as [`CategoryRegistry::new`].
    pub fn from_taxonomy(taxonomy: &Taxonomy) -> Result<Self, LabelmapError> {
        Self::new(
            taxonomy.categories.iter().cloned(),
            taxonomy.sub_categories.clone(),
        )
    }

    /// Exports the declared taxonomy, attaching the given metadata.
    pub fn to_taxonomy(&self, info: DatasetInfo) -> Taxonomy {
        Taxonomy {
            info,
            categories: self.init_categories.clone(),
            sub_categories: self.init_sub_categories.clone(),
        }
    }

    /// The categories as initially declared.
    pub fn init_categories(&self) -> &[String] {
        &self.init_categories
    }

    /// The sub-categories as initially declared.
    pub fn init_sub_categories(&self) -> &SubCategories {
        &self.init_sub_categories
    }

    /// Borrows the category list selected by `selection`.
    pub fn categories(&self, selection: CategorySelection) -> &[String] {
        match selection {
            CategorySelection::Init => &self.init_categories,
            CategorySelection::Current => &self.categories_update,
            CategorySelection::Filtered => self
                .categories_filter_update
                .as_deref()
                .unwrap_or(&self.categories_update),
        }
    }

    /// Returns the selected categories as a list or as an id mapping.
    ///
    /// See [`CategoryQuery`] for how the flags select the list and shape of
    /// the result.
    pub fn get_categories(&self, query: &CategoryQuery) -> CategoryView {
        CategoryView::build(self.categories(query.selection()), query)
    }

    /// Returns the id of `name` within the selected list.
    pub fn category_id(&self, name: &str, selection: CategorySelection) -> Option<CategoryId> {
        self.categories(selection)
            .iter()
            .position(|cat| cat == name)
            .map(CategoryId::from_position)
    }

    /// Returns sub-category information for the given categories.
    ///
    /// For a category with its own sub-category definition the entry lists
    /// the sub-category keys. For a name that only exists because a
    /// substitution promoted it, the entry lists the values of the
    /// sub-category of the substituted category that carries this name
    /// (empty if there is none). Names with neither are left out.
    ///
    /// # Errors
    /// Returns [`LabelmapError::InvalidRequest`] if a name is not part of the
    /// filtered view.
    pub fn get_sub_categories<I, S>(
        &self,
        categories: I,
    ) -> Result<IndexMap<String, Vec<String>>, LabelmapError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let available = self.categories(CategorySelection::Filtered);
        let mut sub_categories = IndexMap::new();

        for category in categories {
            let category = category.as_ref();
            if !available.iter().any(|cat| cat == category) {
                return Err(LabelmapError::InvalidRequest(format!(
                    "{category} not in categories, maybe has been replaced with sub category"
                )));
            }
            if let Some(entry) = self.sub_categories_of(category) {
                sub_categories.insert(category.to_string(), entry);
            }
        }

        Ok(sub_categories)
    }

    /// Returns sub-category information for every category in the filtered view.
    pub fn get_all_sub_categories(&self) -> IndexMap<String, Vec<String>> {
        self.categories(CategorySelection::Filtered)
            .iter()
            .filter_map(|cat| Some((cat.clone(), self.sub_categories_of(cat)?)))
            .collect()
    }

    fn sub_categories_of(&self, category: &str) -> Option<Vec<String>> {
        if let Some(subs) = self.init_sub_categories.get(category) {
            return Some(subs.keys().cloned().collect());
        }

        let mut entry = None;
        for (replaced, chosen) in self.cat_to_sub_cat.as_ref()? {
            let Some(subs) = self.init_sub_categories.get(replaced) else {
                continue;
            };
            if subs.contains_key(chosen) {
                entry = Some(subs.get(category).cloned().unwrap_or_default());
            }
        }
        entry
    }

    /// Replaces categories with the values of one of their sub-categories.
    ///
    /// `cat_to_sub_cat` maps a category to the sub-category key whose values
    /// should take its place. Substitution always starts from the declared
    /// categories: any earlier substitution and any filter are discarded.
    /// Entries naming an unknown category or sub-category are kept in the
    /// stored mapping but leave the category unchanged.
    pub fn set_cat_to_sub_cat<I, K, V>(&mut self, cat_to_sub_cat: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let cat_to_sub_cat: IndexMap<String, String> = cat_to_sub_cat
            .into_iter()
            .map(|(cat, sub)| (cat.into(), sub.into()))
            .collect();

        tracing::info!("resetting all previous category updates");
        self.categories_filter_update = None;

        for (cat, sub) in &cat_to_sub_cat {
            let defined = self
                .init_sub_categories
                .get(cat)
                .is_some_and(|subs| subs.contains_key(sub));
            if !defined {
                tracing::warn!(
                    category = %cat,
                    sub_category = %sub,
                    "no such sub-category, category is kept as is"
                );
            }
        }

        let mut categories_update = Vec::with_capacity(self.init_categories.len());
        for cat in &self.init_categories {
            let values = cat_to_sub_cat
                .get(cat)
                .and_then(|sub| self.init_sub_categories.get(cat)?.get(sub));
            match values {
                Some(values) => categories_update.extend(values.iter().cloned()),
                None => categories_update.push(cat.clone()),
            }
        }

        tracing::debug!(categories = categories_update.len(), "substitution applied");
        self.categories_update = categories_update;
        self.cat_to_sub_cat = Some(cat_to_sub_cat);
    }

    /// Restricts the filtered view to the given names.
    ///
    /// The result keeps the order of the current (substituted) categories.
    /// Each call replaces the previous filter.
    pub fn filter_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keep: HashSet<String> = categories
            .into_iter()
            .map(|cat| cat.as_ref().to_string())
            .collect();

        let filtered: Vec<String> = self
            .categories_update
            .iter()
            .filter(|cat| keep.contains(cat.as_str()))
            .cloned()
            .collect();

        tracing::debug!(
            requested = keep.len(),
            kept = filtered.len(),
            "categories filtered"
        );
        self.categories_filter_update = Some(filtered);
    }

    /// The active substitution mapping, if any.
    pub fn cat_to_sub_cat(&self) -> Option<&IndexMap<String, String>> {
        self.cat_to_sub_cat.as_ref()
    }

    /// Returns true if a substitution has been applied.
    pub fn is_cat_to_sub_cat(&self) -> bool {
        self.cat_to_sub_cat.is_some()
    }

    /// Returns true if a filter has been applied since the last substitution.
    pub fn is_filtered(&self) -> bool {
        self.categories_filter_update.is_some()
    }
}

fn check_taxonomy(
    categories: &[String],
    sub_categories: &SubCategories,
) -> Result<(), LabelmapError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(categories.len());
    for cat in categories {
        if !seen.insert(cat.as_str()) {
            return Err(LabelmapError::Configuration(format!(
                "category '{cat}' is listed more than once"
            )));
        }
    }

    for (cat, subs) in sub_categories {
        if !seen.contains(cat.as_str()) {
            return Err(LabelmapError::Configuration(format!(
                "sub-categories defined for unknown category '{cat}'"
            )));
        }
        for (key, values) in subs {
            if values.is_empty() {
                return Err(LabelmapError::Configuration(format!(
                    "sub-category '{key}' of category '{cat}' has no values"
                )));
            }
        }
    }

    Ok(())
}
