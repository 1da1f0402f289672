//! Combining the registries of several datasets into one id space.
//!
//! Categories merge permissively: a label known to any dataset survives.
//! Sub-categories merge conservatively: a category keeps a sub-category only
//! if every dataset defines that sub-category for it, and its values are
//! the union of all datasets' values.

use std::collections::HashSet;

use super::{CategoryRegistry, CategorySelection};
use crate::error::LabelmapError;
use crate::taxonomy::{SubCategories, SubCategoryMap};

/// Merges the registries of several datasets.
///
/// The result declares the first-appearance union of all declared
/// categories. Its current and filtered views are the unions of the inputs'
/// current and filtered views, and the result always counts as filtered.
/// All unions keep first-appearance order.
///
/// # Errors
/// Returns [`LabelmapError::InvalidRequest`] when no registry is given.
///
/// # Example
///
/// ```
/// use labelmap::registry::{merge, CategoryRegistry};
/// use labelmap::taxonomy::Taxonomy;
///
/// let a = CategoryRegistry::from_taxonomy(&Taxonomy::from_parts(
///     ["cat1", "cat2"],
///     [("cat1", vec![("s", vec!["x", "y"])])],
/// ))?;
/// let b = CategoryRegistry::from_taxonomy(&Taxonomy::with_categories(["cat2", "cat3"]))?;
///
/// let merged = merge([&a, &b])?;
/// assert_eq!(merged.init_categories(), ["cat1", "cat2", "cat3"]);
/// assert!(merged.init_sub_categories().is_empty());
/// # Ok::<(), labelmap::LabelmapError>(())
/// ```
pub fn merge<'a, I>(registries: I) -> Result<CategoryRegistry, LabelmapError>
where
    I: IntoIterator<Item = &'a CategoryRegistry>,
{
    let registries: Vec<&CategoryRegistry> = registries.into_iter().collect();
    let Some((first, rest)) = registries.split_first() else {
        return Err(LabelmapError::InvalidRequest(
            "cannot merge an empty list of category registries".to_string(),
        ));
    };

    let init_categories =
        union_in_order(registries.iter().map(|reg| reg.categories(CategorySelection::Init)));

    let mut init_sub_categories = SubCategories::new();
    for (cat, first_subs) in &first.init_sub_categories {
        let per_dataset: Option<Vec<&SubCategoryMap>> = rest
            .iter()
            .map(|reg| reg.init_sub_categories.get(cat))
            .collect();
        let Some(others) = per_dataset else {
            continue;
        };

        let mut merged_subs = SubCategoryMap::new();
        for (key, first_values) in first_subs {
            let values: Option<Vec<&Vec<String>>> =
                others.iter().map(|subs| subs.get(key)).collect();
            let Some(values) = values else {
                continue;
            };
            let all_values = std::iter::once(first_values).chain(values);
            merged_subs.insert(key.clone(), union_in_order(all_values.map(Vec::as_slice)));
        }
        init_sub_categories.insert(cat.clone(), merged_subs);
    }

    let categories_update =
        union_in_order(registries.iter().map(|reg| reg.categories(CategorySelection::Current)));
    let categories_filter_update = union_in_order(
        registries
            .iter()
            .map(|reg| reg.categories(CategorySelection::Filtered)),
    );

    tracing::debug!(
        registries = registries.len(),
        categories = init_categories.len(),
        categories_with_sub_categories = init_sub_categories.len(),
        "merged category registries"
    );

    let mut merged = CategoryRegistry::new(init_categories, init_sub_categories)?;
    merged.categories_update = categories_update;
    merged.categories_filter_update = Some(categories_filter_update);
    Ok(merged)
}

fn union_in_order<'a, I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    let mut union = Vec::new();
    for name in lists.into_iter().flatten() {
        if seen.insert(name.as_str()) {
            union.push(name.clone());
        }
    }
    union
}
