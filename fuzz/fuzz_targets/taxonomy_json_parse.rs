//! Fuzz target for taxonomy JSON parsing.
//!
//! This fuzzer feeds arbitrary byte sequences to the taxonomy JSON parser and
//! builds a registry from whatever parses, checking for panics, crashes, or
//! hangs in both steps.

#![no_main]

use libfuzzer_sys::fuzz_target;
use labelmap::registry::{merge, CategoryRegistry, CategorySelection};
use labelmap::taxonomy::io_json::from_json_slice;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(taxonomy) = from_json_slice(data) else {
        return;
    };
    let Ok(mut registry) = CategoryRegistry::from_taxonomy(&taxonomy) else {
        return;
    };

    let substitution: Vec<(String, String)> = taxonomy
        .sub_categories
        .iter()
        .filter_map(|(cat, subs)| Some((cat.clone(), subs.keys().next()?.clone())))
        .collect();
    registry.set_cat_to_sub_cat(substitution);
    registry.filter_categories(taxonomy.categories.iter().step_by(2));
    let _ = registry.get_all_sub_categories();
    let _ = registry.categories(CategorySelection::Filtered);
    let _ = merge([&registry, &registry]);
});
