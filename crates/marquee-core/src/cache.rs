//! Version-keyed pixel snapshot cache.
//!
//! Hosts that repeatedly transform the same layer keep its RGBA snapshot here
//! instead of re-reading it from the canvas on every gesture. Entries are keyed
//! by a caller-supplied id plus a version the caller bumps whenever the pixels
//! change; nothing is evicted implicitly.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::buffer::PixelBuffer;

#[derive(Debug, Clone)]
struct Entry {
    version: u64,
    snapshot: Arc<PixelBuffer>,
}

/// Snapshot cache holding at most one version per id.
#[derive(Debug, Clone)]
pub struct SnapshotCache<K> {
    entries: HashMap<K, Entry>,
}

impl<K> Default for SnapshotCache<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> SnapshotCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the snapshot for `id`, only if it was stored at `version`.
    pub fn get(&self, id: &K, version: u64) -> Option<Arc<PixelBuffer>> {
        self.entries
            .get(id)
            .filter(|entry| entry.version == version)
            .map(|entry| Arc::clone(&entry.snapshot))
    }

    /// Store a snapshot, replacing whatever was cached for `id`.
    ///
    /// Returns the shared handle so the caller can use it straight away.
    pub fn insert(&mut self, id: K, version: u64, snapshot: PixelBuffer) -> Arc<PixelBuffer> {
        self.insert_shared(id, version, Arc::new(snapshot))
    }

    /// Store a snapshot the caller already shares, without copying its pixels.
    pub fn insert_shared(
        &mut self,
        id: K,
        version: u64,
        snapshot: Arc<PixelBuffer>,
    ) -> Arc<PixelBuffer> {
        self.entries.insert(
            id,
            Entry {
                version,
                snapshot: Arc::clone(&snapshot),
            },
        );
        snapshot
    }

    /// Drop the entry for `id`. Returns whether anything was cached.
    pub fn invalidate(&mut self, id: &K) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
