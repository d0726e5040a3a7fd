//! Entry Store Module
//!
//! The entry map at the core of the store: admission via the validation
//! gate, lazy expiry on reads, and the scan primitives used by the sweeper
//! and by snapshot persistence.
//!
//! `EntryStore` is synchronous; `DataStore` shares it behind one
//! `Arc<RwLock<_>>` acquired uniformly by every reading and mutating path.

use std::collections::HashMap;

use crate::error::{Result, StoreError};
use crate::store::{validate, Entry};

// == Entry Store ==
/// The mapping from key to payload+expiry. No ordering semantics.
#[derive(Debug, Default)]
pub struct EntryStore {
    entries: HashMap<String, Entry>,
}

impl EntryStore {
    // == Constructor ==
    /// Creates an empty EntryStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    // == Insert ==
    /// Stores a payload under a key with the given TTL.
    ///
    /// Runs the validation gate first. Returns `Ok(false)` without modifying
    /// the store when the key already holds a live entry; there is no
    /// overwrite. The existence check and the insertion happen in one
    /// `&mut self` step, so callers serialized on the store's lock can never
    /// race two successful inserts for the same key.
    pub fn insert(&mut self, key: String, payload: String, ttl_seconds: u64) -> Result<bool> {
        validate::validate_key(&key)?;
        validate::validate_payload(&payload)?;

        if self.entries.contains_key(&key) {
            return Ok(false);
        }

        self.entries.insert(key, Entry::new(payload, ttl_seconds));
        Ok(true)
    }

    // == Get ==
    /// Retrieves a payload by key.
    ///
    /// Applies a lazy-expiry check: an entry whose expiry has already passed
    /// is reported as `NotFound` even if the background sweep has not run
    /// yet. The expired entry itself is left for the sweeper to collect, so
    /// reads only ever need shared access.
    pub fn get(&self, key: &str) -> Result<&str> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => Ok(&entry.payload),
            _ => Err(StoreError::NotFound(key.to_string())),
        }
    }

    // == Remove ==
    /// Removes an entry by key. Returns false if the key was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Removes an entry only if it is still present and expired.
    ///
    /// Used by the sweeper's second phase: a key collected as expired may
    /// have been deleted and recreated since the scan, and the re-check
    /// keeps the fresh entry intact.
    pub fn remove_if_expired(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    // == Expired Keys ==
    /// Returns the keys of all currently expired entries.
    pub fn expired_keys(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Persistence Bridges ==
    /// Iterates over every entry, expired or not, for snapshotting.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replaces the store's contents with entries reconstructed from a
    /// snapshot, preserving their original absolute expiries.
    pub fn absorb(&mut self, entries: impl IntoIterator<Item = (String, Entry)>) {
        self.entries = entries.into_iter().collect();
    }

    // == Length ==
    /// Returns the current number of entries, including not-yet-swept
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
