use crate::Dict;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

#[derive(Clone, Debug)]
enum Op {
    Set(String, u64),
    Delete(String),
    Get(String),
    Merge(Vec<(String, u64)>),
}

// A small alphabet makes keys repeat, so updates hit bound keys often.
fn key_strategy() -> impl Strategy<Value = String> + Clone {
    "[a-f]{0,3}"
}

fn pairs_strategy() -> impl Strategy<Value = Vec<(String, u64)>> {
    prop::collection::vec((key_strategy(), any::<u64>()), 0..=64)
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        50 => (key.clone(), any::<u64>()).prop_map(|(key, value)| Op::Set(key, value)),
        25 => key.clone().prop_map(Op::Delete),
        20 => key.prop_map(Op::Get),
        5 => pairs_strategy().prop_map(Op::Merge),
    ];
    prop::collection::vec(op, 0..=512)
}

fn check_equivalence<const B: usize>(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut dict = Dict::<u64, B>::default();
    let mut map = BTreeMap::<String, u64>::new();

    for op in ops {
        match op {
            Op::Set(key, value) => {
                dict = dict.set(key.clone(), value);
                map.insert(key, value);
            }
            Op::Delete(key) => {
                dict = dict.delete(&key);
                map.remove(&key);
            }
            Op::Get(key) => {
                prop_assert_eq!(dict.get(&key), map.get(&key));
            }
            Op::Merge(pairs) => {
                let other = pairs.into_iter().collect::<Dict<u64, B>>();

                dict = dict.merge(&other);

                for (key, value) in &other {
                    let merged = dict.get(key);

                    // Keys bound on both sides may keep either value.
                    if let Some(old) = map.get(key) {
                        prop_assert!(merged == Some(old) || merged == Some(value));
                    } else {
                        prop_assert_eq!(merged, Some(value));
                    }

                    if let Some(merged) = merged {
                        map.insert(key.into(), *merged);
                    }
                }
            }
        }

        prop_assert_eq!(dict.len(), map.len());
    }

    prop_assert!(dict.root().is_valid());

    let got = dict
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect::<BTreeMap<_, _>>();

    prop_assert_eq!(got, map);

    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_default_breadth(ops in ops_strategy()) {
        check_equivalence::<32>(ops)?;
    }

    #[test]
    fn prop_equivalence_small_breadth(ops in ops_strategy()) {
        check_equivalence::<2>(ops)?;
    }

    #[test]
    fn prop_get_after_set(pairs in pairs_strategy(), key in key_strategy(), value in any::<u64>()) {
        let dict = Dict::of(pairs).set(key.clone(), value);

        prop_assert_eq!(dict.get(&key), Some(&value));
    }

    #[test]
    fn prop_last_write_wins(
        pairs in pairs_strategy(),
        key in key_strategy(),
        first in any::<u64>(),
        second in any::<u64>(),
    ) {
        let dict = Dict::of(pairs);

        prop_assert_eq!(
            dict.set(key.clone(), first).set(key.clone(), second),
            dict.set(key, second)
        );
    }

    #[test]
    fn prop_non_interference(
        pairs in pairs_strategy(),
        key in key_strategy(),
        other in key_strategy(),
        value in any::<u64>(),
    ) {
        prop_assume!(key != other);

        let dict = Dict::of(pairs);
        let updated = dict.set(key, value);

        prop_assert_eq!(updated.get(&other), dict.get(&other));
    }

    #[test]
    fn prop_delete_removes(pairs in pairs_strategy(), key in key_strategy(), value in any::<u64>()) {
        let dict = Dict::of(pairs).set(key.clone(), value).delete(&key);

        prop_assert_eq!(dict.get(&key), None);
        prop_assert!(dict.root().is_valid());
    }

    #[test]
    fn prop_delete_absent_key(pairs in pairs_strategy(), key in key_strategy()) {
        let dict = Dict::of(pairs);

        prop_assume!(!dict.contains_key(&key));
        prop_assert_eq!(dict.delete(&key), dict);
    }

    #[test]
    fn prop_merge_union(this in pairs_strategy(), that in pairs_strategy()) {
        let this = Dict::of(this);
        let that = Dict::of(that);
        let dict = this.merge(&that);

        prop_assert!(dict.root().is_valid());
        prop_assert_eq!(dict.iter().count(), dict.len());

        for (key, value) in &this {
            if !that.contains_key(key) {
                prop_assert_eq!(dict.get(key), Some(value));
            }
        }

        for (key, value) in &that {
            if !this.contains_key(key) {
                prop_assert_eq!(dict.get(key), Some(value));
            }
        }

        for (key, _) in &dict {
            prop_assert!(this.contains_key(key) || that.contains_key(key));
        }
    }

    #[test]
    fn prop_round_trip(map in prop::collection::hash_map("\\PC{0,8}", any::<u64>(), 0..=128)) {
        let dict: Dict<u64> = Dict::from(map.clone());

        prop_assert_eq!(dict.to_hash_map(), map);
    }

    #[test]
    fn prop_delete_everything(keys in prop::collection::hash_set("\\PC{0,8}", 0..=256)) {
        let mut dict = keys.iter().map(|key| (key.clone(), ())).collect::<Dict<()>>();

        prop_assert_eq!(dict.len(), keys.len());

        for key in &keys {
            dict = dict.delete(key);
            prop_assert!(dict.root().is_valid());
        }

        prop_assert_eq!(dict.clone(), Dict::<()>::new());
        prop_assert!(dict.root().is_empty());
        prop_assert_eq!(dict.to_hash_map(), HashMap::new());
    }
}
