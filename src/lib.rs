//! chain-hashmap: a byte-keyed hash map with separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Keys are byte strings, compared by content. Values are any `V`.
//! - Each key is hashed once with FNV-1a (64-bit, unseeded) and lives in
//!   bucket `hash % bucket_count`.
//! - Colliding entries form a singly linked chain with a tail reference, so
//!   appends are O(1) and lookups/removals are O(chain length).
//!
//! Layers
//! - `fnv`: the hash function. Pure, so a key always re-hashes to the same
//!   value across growth.
//! - `chain`: one bucket's list. Nodes of all chains share a generational
//!   arena (`slotmap`) owned by the map; links are arena keys.
//! - `ChainHashMap`: bucket array, element count, load factor and growth.
//!
//! Growth
//! - `add` checks `(len + 1) / buckets > load_factor` before placing the new
//!   entry. If exceeded, the bucket count doubles (repeatedly, for tiny
//!   tables) and every node is relinked into its new bucket. Tables never
//!   shrink.
//!
//! Notes and non-goals
//! - Single-threaded: no internal locking. Mutation needs `&mut self`.
//! - No iteration API, no serialization, no generic key types.
//! - Internal invariants are checked with debug assertions only.

mod chain;
mod chain_hash_map;
mod chain_hash_map_proptest;
mod config;
mod error;
pub mod fnv;
mod invariants;

// Public surface
pub use chain_hash_map::ChainHashMap;
pub use config::{MapConfig, DEFAULT_BUCKETS, DEFAULT_LOAD_FACTOR};
pub use error::ConfigError;
