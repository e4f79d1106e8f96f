#![cfg(test)]

// Property tests for ChainHashMap kept inside the crate so they can reach
// bucket placement and the debug invariant walk.

use crate::chain_hash_map::ChainHashMap;
use crate::fnv::fnv1a_64;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Add(usize, i32),
    Remove(usize),
    Find(usize),
    Mutate(usize, i32),
    Contains(Vec<u8>),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<OpI>)> {
    let key = proptest::collection::vec(any::<u8>(), 0..6);
    proptest::collection::vec(key, 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Add(i, v)),
            1 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Find),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => proptest::collection::vec(any::<u8>(), 0..6).prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run(
    mut sut: ChainHashMap<i32>,
    pool: Vec<Vec<u8>>,
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let lf = sut.load_factor();
    let mut model: HashMap<Vec<u8>, i32> = HashMap::new();
    let mut last_size = sut.size();

    for op in ops {
        match op {
            OpI::Add(i, v) => {
                let k = pool[i].clone();
                let prev = sut.add(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                prop_assert_eq!(sut.find(&k), Some(&v));
                // Load bound holds as soon as add returns.
                prop_assert!(sut.size_values() as f64 / sut.size() as f64 <= lf);
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                let before = sut.size_values();
                let got = sut.remove(k);
                prop_assert_eq!(got, model.remove(k));
                prop_assert_eq!(sut.size_values(), before - usize::from(got.is_some()));
                prop_assert!(sut.find(k).is_none());
                // Second removal is a no-op.
                prop_assert!(sut.remove(k).is_none());
                prop_assert_eq!(sut.size_values(), model.len());
            }
            OpI::Find(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.find(k), model.get(k));
            }
            OpI::Mutate(i, d) => {
                let k = &pool[i];
                match (sut.find_mut(k), model.get_mut(k)) {
                    (Some(a), Some(b)) => {
                        *a = a.saturating_add(d);
                        *b = b.saturating_add(d);
                    }
                    (None, None) => {}
                    _ => prop_assert!(false, "presence diverged for {:?}", k),
                }
            }
            OpI::Contains(k) => {
                prop_assert_eq!(sut.contains_key(&k), model.contains_key(&k));
            }
        }

        // Post-conditions after each op
        // 1) Count parity and monotonic growth by doubling
        prop_assert_eq!(sut.size_values(), model.len());
        let size = sut.size();
        prop_assert!(size >= last_size);
        prop_assert!(size == last_size || (size / last_size).is_power_of_two());
        last_size = size;
        // 2) Every live key sits in bucket hash % size
        for k in model.keys() {
            let expected = (fnv1a_64(k) % size as u64) as usize;
            prop_assert_eq!(sut.locate(k), Some(expected));
        }
        // 3) Dispersion never exceeds occupancy or capacity
        prop_assert!(sut.size_lists() <= sut.size_values().min(size));
        sut.check_invariants();
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap on a
// default table.
// Invariants exercised across random operation sequences:
// - add/find/remove results match the model; overwrite returns the old value.
// - size_values equals the model length after every op.
// - size only grows, by powers of two.
// - Every key is placed in bucket fnv1a(k) % size.
// - The load bound holds right after each add.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(ChainHashMap::new(), pool, ops)?;
    }
}

// Property: same invariants starting from a single bucket with a range of
// load factors, so chains are long and growth happens often.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_small_tables(
        lf in 0.05f64..=1.0,
        buckets in 1usize..=3,
        (pool, ops) in arb_scenario(),
    ) {
        let sut = ChainHashMap::new_custom(lf, buckets).expect("valid parameters");
        run(sut, pool, ops)?;
    }
}
