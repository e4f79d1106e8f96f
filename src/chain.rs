//! Chain: the singly linked run of entries that share one bucket.
//!
//! Nodes are not boxed individually. Every node of every chain lives in one
//! generational arena (`slotmap::SlotMap`) owned by the map, and links are
//! arena keys. A `Chain` is therefore just `(head, tail, len)`:
//! - `head` is the first node, `tail` the last one, both `None` when empty.
//! - Following `next` from `head` reaches `tail` after `len - 1` hops, and
//!   `tail.next` is `None`.
//!
//! Appending is O(1) through `tail`; lookup and removal walk from `head`.
//! Keeping all chains in one arena lets growth relink nodes into new
//! buckets without moving or reallocating any entry.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Arena key of a chain node.
    pub(crate) struct NodeKey;
}

/// A stored key/value pair. The key is owned and compared by content.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<[u8]>,
    /// FNV-1a of `key`, computed once at insertion.
    pub(crate) hash: u64,
    pub(crate) value: V,
}

impl<V> Entry<V> {
    #[inline]
    fn matches(&self, hash: u64, key: &[u8]) -> bool {
        self.hash == hash && *self.key == *key
    }
}

#[derive(Debug)]
pub(crate) struct Node<V> {
    pub(crate) entry: Entry<V>,
    pub(crate) next: Option<NodeKey>,
}

/// Node storage shared by all chains of one map.
pub(crate) type Nodes<V> = SlotMap<NodeKey, Node<V>>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chain {
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    len: usize,
}

impl Chain {
    pub(crate) const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    // Only read by the debug invariant walk and tests.
    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<NodeKey> {
        self.head
    }

    #[cfg_attr(not(debug_assertions), allow(dead_code))]
    #[inline]
    pub(crate) fn tail(&self) -> Option<NodeKey> {
        self.tail
    }

    /// Stores `entry` in the arena and links it after the current tail.
    pub(crate) fn append<V>(&mut self, nodes: &mut Nodes<V>, entry: Entry<V>) -> NodeKey {
        let k = nodes.insert(Node { entry, next: None });
        self.link_tail(nodes, k);
        k
    }

    /// Links an existing arena node after the current tail, clearing its
    /// `next`. The node must not be reachable from any chain.
    pub(crate) fn link_tail<V>(&mut self, nodes: &mut Nodes<V>, k: NodeKey) {
        nodes[k].next = None;
        match self.tail {
            Some(t) => {
                debug_assert!(nodes[t].next.is_none(), "chain tail has a successor");
                nodes[t].next = Some(k);
            }
            None => {
                debug_assert!(self.head.is_none(), "chain has a head but no tail");
                self.head = Some(k);
            }
        }
        self.tail = Some(k);
        self.len += 1;
    }

    /// Returns the first node whose key equals `key` byte for byte.
    pub(crate) fn find<V>(&self, nodes: &Nodes<V>, hash: u64, key: &[u8]) -> Option<NodeKey> {
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &nodes[k];
            if node.entry.matches(hash, key) {
                return Some(k);
            }
            cur = node.next;
        }
        None
    }

    /// Unlinks the node holding `key` and frees it from the arena, returning
    /// its entry. Absent keys leave the chain untouched.
    pub(crate) fn remove<V>(
        &mut self,
        nodes: &mut Nodes<V>,
        hash: u64,
        key: &[u8],
    ) -> Option<Entry<V>> {
        let mut prev: Option<NodeKey> = None;
        let mut cur = self.head;
        while let Some(k) = cur {
            let node = &nodes[k];
            if !node.entry.matches(hash, key) {
                prev = cur;
                cur = node.next;
                continue;
            }

            let next = node.next;
            match prev {
                Some(p) => nodes[p].next = next,
                None => self.head = next,
            }
            if self.tail == Some(k) {
                self.tail = prev;
            }
            self.len -= 1;
            debug_assert_eq!(self.len == 0, self.head.is_none());
            debug_assert_eq!(self.head.is_none(), self.tail.is_none());

            return nodes.remove(k).map(|n| n.entry);
        }
        None
    }
}
