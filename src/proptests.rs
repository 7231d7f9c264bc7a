use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::Tst;

/// Keys drawn from a small alphabet so that action sequences revisit the
/// same keys and share prefixes often.
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-e]{1,6}"
}

/// Actions to run against the tree and the model side by side.
#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(#[proptest(strategy = "key_strategy()")] String, u32),
    Get(#[proptest(strategy = "key_strategy()")] String),
    Remove(#[proptest(strategy = "key_strategy()")] String),
}

proptest! {
    #[test]
    fn behaves_like_a_sorted_map(actions in prop::collection::vec(any::<Action>(), 1..128)) {
        let mut tree = Tst::new();
        let mut model = BTreeMap::new();

        for action in actions {
            match action {
                Action::Insert(key, value) => {
                    let old = tree.insert(key.clone(), value).unwrap();
                    prop_assert_eq!(old, model.insert(key, value));
                }
                Action::Get(key) => {
                    prop_assert_eq!(tree.get(&key), model.get(&key));
                    prop_assert_eq!(tree.contains_key(&key), model.contains_key(&key));
                }
                Action::Remove(key) => {
                    prop_assert_eq!(tree.remove_key(&key), model.remove(&key).is_some());
                }
            }
            prop_assert_eq!(tree.len(), model.len());
        }

        let expected: Vec<(String, u32)> =
            model.iter().map(|(key, value)| (key.clone(), *value)).collect();
        prop_assert_eq!(tree.pairs(), expected);
    }

    #[test]
    fn balance_preserves_the_pair_set(
        entries in prop::collection::btree_map(key_strategy(), any::<u32>(), 0..64),
    ) {
        let mut tree = Tst::new();
        for (key, value) in &entries {
            tree.insert(key.clone(), *value).unwrap();
        }

        let before = tree.pairs();
        tree.balance();
        prop_assert_eq!(tree.pairs(), before);
        prop_assert_eq!(tree.len(), entries.len());
    }

    #[test]
    fn bulk_insert_equals_incremental_insert(
        entries in prop::collection::btree_map(key_strategy(), any::<u32>(), 0..64),
    ) {
        let sorted: Vec<(String, u32)> =
            entries.iter().map(|(key, value)| (key.clone(), *value)).collect();

        let mut bulk = Tst::new();
        bulk.bulk_insert(sorted).unwrap();

        let mut incremental = Tst::new();
        for (key, value) in entries {
            incremental.insert(key, value).unwrap();
        }

        prop_assert_eq!(bulk.pairs(), incremental.pairs());
    }

    #[test]
    fn literal_patterns_find_exactly_their_key(
        entries in prop::collection::btree_map(key_strategy(), any::<u32>(), 1..32),
        absent in key_strategy(),
    ) {
        let mut tree = Tst::new();
        for (key, value) in &entries {
            tree.insert(key.clone(), *value).unwrap();
        }

        // The alphabet contains no wildcard characters, so every key is a
        // literal pattern matching itself and nothing else.
        for (key, value) in &entries {
            let found = tree.partial_key_search(key);
            prop_assert_eq!(found, vec![(key.clone(), *value)]);
        }
        if !entries.contains_key(&absent) {
            prop_assert!(tree.partial_key_search(&absent).is_empty());
        }
    }

    #[test]
    fn removal_demotes_without_unreaching_other_keys(
        entries in prop::collection::btree_map(key_strategy(), any::<u32>(), 2..32),
    ) {
        let mut tree = Tst::new();
        for (key, value) in &entries {
            tree.insert(key.clone(), *value).unwrap();
        }

        let victim = entries.keys().next().unwrap().clone();
        prop_assert!(tree.remove_key(&victim));
        prop_assert!(!tree.contains_key(&victim));
        // The path spelled by the removed key still exists.
        prop_assert!(tree.contains_node(&victim));

        for (key, value) in entries.iter().filter(|(key, _)| **key != victim) {
            prop_assert_eq!(tree.get(key), Some(value));
        }
    }

    #[test]
    fn clones_do_not_share_state(
        entries in prop::collection::btree_map(key_strategy(), any::<u32>(), 1..16),
    ) {
        let mut tree = Tst::new();
        for (key, value) in &entries {
            tree.insert(key.clone(), *value).unwrap();
        }

        let mut copy = tree.clone();
        let victim = entries.keys().next().unwrap().clone();
        copy.remove_key(&victim);
        copy.insert("zzzzzz".to_string(), 0).unwrap();

        prop_assert!(tree.contains_key(&victim));
        prop_assert!(!tree.contains_key(&"zzzzzz".to_string()));
        prop_assert_eq!(tree.len(), entries.len());
    }
}
