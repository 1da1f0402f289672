#![allow(dead_code)]

use labelmap::taxonomy::{SubCategoryMap, Taxonomy};
use proptest::prelude::*;
use proptest::sample::Index;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// A taxonomy plus a substitution and a filter request to apply to it.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub taxonomy: Taxonomy,
    pub substitution: Vec<(String, String)>,
    pub filter: Vec<String>,
}

fn category_name_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn sub_category_key_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["header", "span", "kind", "role"]).prop_map(str::to_string)
}

fn sub_category_value_strategy() -> impl Strategy<Value = String> {
    "v_[a-z0-9]{1,3}"
}

fn arb_sub_category_map() -> impl Strategy<Value = SubCategoryMap> {
    proptest::collection::vec(
        (
            sub_category_key_strategy(),
            proptest::collection::hash_set(sub_category_value_strategy(), 1..4),
        ),
        1..3,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .map(|(key, values)| (key, values.into_iter().collect()))
            .collect()
    })
}

pub fn arb_taxonomy(max_cats: usize) -> BoxedStrategy<Taxonomy> {
    assert!(max_cats > 0, "max_cats must be > 0");

    proptest::collection::hash_set(category_name_strategy(), 1..=max_cats)
        .prop_flat_map(|names| {
            let names: Vec<String> = names.into_iter().collect();
            let count = names.len();
            (
                Just(names),
                proptest::collection::vec(proptest::option::of(arb_sub_category_map()), count),
            )
        })
        .prop_map(|(names, subs)| {
            let sub_categories = names
                .iter()
                .zip(subs)
                .filter_map(|(name, subs)| Some((name.clone(), subs?)))
                .collect();
            Taxonomy {
                info: Default::default(),
                categories: names,
                sub_categories,
            }
        })
        .boxed()
}

pub fn arb_scenario(max_cats: usize) -> BoxedStrategy<Scenario> {
    arb_taxonomy(max_cats)
        .prop_flat_map(|taxonomy| {
            let count = taxonomy.categories.len();
            (
                Just(taxonomy),
                proptest::collection::vec((any::<bool>(), any::<Index>()), count),
                proptest::collection::vec(any::<Index>(), 0..=count + 2),
            )
        })
        .prop_map(|(taxonomy, picks, filter_picks)| {
            let substitution = taxonomy
                .categories
                .iter()
                .zip(&picks)
                .filter_map(|(cat, (replace, idx))| {
                    if !replace {
                        return None;
                    }
                    let subs = taxonomy.sub_categories.get(cat)?;
                    let (key, _) = subs.get_index(idx.index(subs.len()))?;
                    Some((cat.clone(), key.clone()))
                })
                .collect();

            let pool = name_pool(&taxonomy);
            let filter = filter_picks
                .iter()
                .map(|idx| pool[idx.index(pool.len())].clone())
                .collect();

            Scenario {
                taxonomy,
                substitution,
                filter,
            }
        })
        .boxed()
}

/// Every name that can appear in a view of `taxonomy`.
pub fn name_pool(taxonomy: &Taxonomy) -> Vec<String> {
    let mut pool = taxonomy.categories.clone();
    for subs in taxonomy.sub_categories.values() {
        for values in subs.values() {
            pool.extend(values.iter().cloned());
        }
    }
    pool
}

/// Returns true if `sub` appears in `sup` in the same relative order.
pub fn is_subsequence(sub: &[String], sup: &[String]) -> bool {
    let mut rest = sup.iter();
    sub.iter().all(|name| rest.any(|candidate| candidate == name))
}
