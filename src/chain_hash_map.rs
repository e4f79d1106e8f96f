//! ChainHashMap: byte-keyed map over FNV-1a buckets with separate chaining.

use crate::chain::{Chain, Entry, Nodes};
use crate::config::MapConfig;
use crate::error::ConfigError;
use crate::fnv::fnv1a_64;
use crate::invariants;
use core::fmt;

/// A hash map from byte-string keys to values of type `V`.
///
/// Keys are hashed with FNV-1a (64-bit) and placed in bucket
/// `hash % size()`. Colliding keys share a bucket's chain. Before an insertion
/// would push `size_values() / size()` above the load factor, the bucket
/// count doubles and every entry is relocated.
///
/// The map never shrinks. Not-found is reported as `None`.
///
/// # Concurrency
///
/// There is no internal synchronization. All mutation goes through
/// `&mut self`; sharing a map across threads for mutation requires an
/// external lock such as `Mutex<ChainHashMap<V>>`.
pub struct ChainHashMap<V> {
    buckets: Vec<Chain>,
    nodes: Nodes<V>,
    len: usize,
    load_factor: f64,
}

impl<V> ChainHashMap<V> {
    /// Creates a map with 8 buckets and a load factor of 0.75.
    pub fn new() -> Self {
        Self::build(MapConfig::default())
    }

    /// Creates a map with `size` initial buckets and the given load factor.
    ///
    /// Fails if `size` is zero or `load_factor` is outside `(0, 1]`.
    pub fn new_custom(load_factor: f64, size: usize) -> Result<Self, ConfigError> {
        Self::with_config(MapConfig::new(load_factor, size))
    }

    pub fn with_config(config: MapConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: MapConfig) -> Self {
        log::trace!(
            "new chain map: buckets={} load_factor={}",
            config.initial_buckets,
            config.load_factor
        );
        Self {
            buckets: vec![Chain::new(); config.initial_buckets],
            nodes: Nodes::with_key(),
            len: 0,
            load_factor: config.load_factor,
        }
    }

    /// Current bucket count (capacity, not occupancy).
    #[inline]
    pub fn size(&self) -> usize {
        self.buckets.len()
    }

    /// Number of live entries.
    #[inline]
    pub fn size_values(&self) -> usize {
        self.len
    }

    /// Number of buckets holding at least one entry. Compared against
    /// [`size`](Self::size) it shows how well keys are dispersed.
    pub fn size_lists(&self) -> usize {
        self.buckets.iter().filter(|c| !c.is_empty()).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Returns the value stored under `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let key = key.as_ref();
        let hash = fnv1a_64(key);
        self.buckets[self.bucket_index(hash)]
            .find(&self.nodes, hash, key)
            .map(|k| &self.nodes[k].entry.value)
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let key = key.as_ref();
        let hash = fnv1a_64(key);
        let idx = self.bucket_index(hash);
        let k = self.buckets[idx].find(&self.nodes, hash, key)?;
        Some(&mut self.nodes[k].entry.value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        self.find(key).is_some()
    }

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Growth is decided first, on the prospective count `size_values() + 1`,
    /// so the entry is placed against the post-growth bucket count. An
    /// existing entry for `key` is removed and the new one appended at the end
    /// of its chain; the superseded value is returned.
    pub fn add<K>(&mut self, key: K, value: V) -> Option<V>
    where
        K: Into<Vec<u8>>,
    {
        self.grow_for(self.len + 1);

        let key = key.into().into_boxed_slice();
        let hash = fnv1a_64(&key);
        let idx = self.bucket_index(hash);
        let chain = &mut self.buckets[idx];

        let previous = chain.remove(&mut self.nodes, hash, &key).map(|e| e.value);
        if previous.is_some() {
            self.len -= 1;
        }
        chain.append(&mut self.nodes, Entry { key, hash, value });
        self.len += 1;

        invariants::check_len(&self.nodes, self.len);
        previous
    }

    /// Removes `key`, returning its value. Absent keys are a no-op and leave
    /// the element count unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + AsRef<[u8]>,
    {
        let key = key.as_ref();
        let hash = fnv1a_64(key);
        let idx = self.bucket_index(hash);
        let removed = self.buckets[idx].remove(&mut self.nodes, hash, key)?;
        self.len -= 1;
        invariants::check_len(&self.nodes, self.len);
        Some(removed.value)
    }

    #[inline]
    fn exceeds_load(&self, entries: usize, buckets: usize) -> bool {
        entries as f64 / buckets as f64 > self.load_factor
    }

    /// Doubles the bucket count until `entries` fit under the load factor,
    /// then relocates every entry once into the final layout. Usually a
    /// single doubling suffices; tiny tables with small load factors may
    /// need more.
    fn grow_for(&mut self, entries: usize) {
        let current = self.buckets.len();
        let mut target = current;
        while self.exceeds_load(entries, target) {
            match target.checked_mul(2) {
                Some(t) => target = t,
                None => break,
            }
        }
        if target != current {
            self.rehash(target);
        }
    }

    /// Moves every node into a fresh bucket array of `new_count` chains.
    /// Each node is visited exactly once; its new bucket depends only on its
    /// hash and `new_count`.
    fn rehash(&mut self, new_count: usize) {
        log::debug!(
            "growing chain map: buckets {} -> {} ({} entries)",
            self.buckets.len(),
            new_count,
            self.len
        );
        let old = std::mem::replace(&mut self.buckets, vec![Chain::new(); new_count]);
        let modulus = new_count as u64;
        for chain in old {
            let mut cur = chain.head();
            while let Some(k) = cur {
                let node = &self.nodes[k];
                cur = node.next;
                let idx = (node.entry.hash % modulus) as usize;
                self.buckets[idx].link_tail(&mut self.nodes, k);
            }
        }
        invariants::check_table(&self.buckets, &self.nodes, self.len);
    }

    /// Bucket that currently holds `key`, found by scanning every bucket.
    #[cfg(test)]
    pub(crate) fn locate(&self, key: &[u8]) -> Option<usize> {
        let hash = fnv1a_64(key);
        self.buckets
            .iter()
            .position(|c| c.find(&self.nodes, hash, key).is_some())
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        invariants::check_table(&self.buckets, &self.nodes, self.len);
    }
}

impl<V> Default for ChainHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for ChainHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHashMap")
            .field("size", &self.size())
            .field("size_values", &self.len)
            .field("load_factor", &self.load_factor)
            .finish()
    }
}
