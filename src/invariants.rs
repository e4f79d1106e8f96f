//! Debug-only structural checks.
//!
//! In debug builds these walk the table and panic on the first broken
//! invariant. In release builds they compile to nothing. A failure here is a
//! bug in this crate, never a caller error.

use crate::chain::{Chain, Nodes};

/// Cheap check run after every mutation: the arena holds exactly the live
/// entries, so its length must equal the element count.
#[inline]
pub(crate) fn check_len<V>(nodes: &Nodes<V>, len: usize) {
    debug_assert_eq!(
        nodes.len(),
        len,
        "element count diverged from stored entries"
    );
}

/// Full walk of every bucket. Verifies chain shape, chain lengths, the
/// element count and that each entry sits in bucket `hash % buckets.len()`.
pub(crate) fn check_table<V>(buckets: &[Chain], nodes: &Nodes<V>, len: usize) {
    #[cfg(debug_assertions)]
    {
        assert!(!buckets.is_empty(), "table has no buckets");
        let bucket_count = buckets.len() as u64;
        let mut seen = 0usize;
        for (idx, chain) in buckets.iter().enumerate() {
            let mut walked = 0usize;
            let mut last = None;
            let mut cur = chain.head();
            while let Some(k) = cur {
                let node = nodes
                    .get(k)
                    .unwrap_or_else(|| panic!("bucket {idx} links to a freed node"));
                assert_eq!(
                    (node.entry.hash % bucket_count) as usize,
                    idx,
                    "entry stored in the wrong bucket"
                );
                walked += 1;
                assert!(walked <= nodes.len(), "cycle in bucket {idx}");
                last = cur;
                cur = node.next;
            }
            assert_eq!(last, chain.tail(), "bucket {idx} tail is not its last node");
            assert_eq!(walked, chain.len(), "bucket {idx} length mismatch");
            seen += walked;
        }
        assert_eq!(seen, len, "element count differs from chained entries");
        assert_eq!(seen, nodes.len(), "arena holds unreachable nodes");
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = (buckets, nodes, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::Entry;
    use crate::fnv::fnv1a_64;

    fn entry(key: &str) -> Entry<()> {
        Entry {
            key: key.as_bytes().into(),
            hash: fnv1a_64(key.as_bytes()),
            value: (),
        }
    }

    /// Invariant: a correctly built table passes the full walk.
    #[test]
    fn consistent_table_passes() {
        let mut nodes = Nodes::with_key();
        let mut buckets = vec![Chain::new(); 4];
        for key in ["a", "b", "c", "d", "e"] {
            let e = entry(key);
            let idx = (e.hash % 4) as usize;
            buckets[idx].append(&mut nodes, e);
        }
        check_table(&buckets, &nodes, 5);
        check_len(&nodes, 5);
    }

    /// Invariant (debug-only): an entry placed in the wrong bucket is detected.
    #[cfg(debug_assertions)]
    #[test]
    fn misplaced_entry_panics() {
        let mut nodes = Nodes::with_key();
        let mut buckets = vec![Chain::new(); 4];
        let e = entry("a");
        let wrong = ((e.hash % 4) as usize + 1) % 4;
        buckets[wrong].append(&mut nodes, e);
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            check_table(&buckets, &nodes, 1);
        }));
        assert!(res.is_err(), "expected misplaced entry to panic in debug builds");
    }

    /// Invariant (debug-only): a stale element count is detected.
    #[cfg(debug_assertions)]
    #[test]
    fn count_mismatch_panics() {
        let mut nodes = Nodes::with_key();
        let mut buckets = vec![Chain::new(); 2];
        let e = entry("a");
        let idx = (e.hash % 2) as usize;
        buckets[idx].append(&mut nodes, e);
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            check_len(&nodes, 2);
        }));
        assert!(res.is_err(), "expected count mismatch to panic in debug builds");
    }
}
