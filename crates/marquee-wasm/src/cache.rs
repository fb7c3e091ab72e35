//! Snapshot cache WASM bindings.
//!
//! Lets the host keep the RGBA snapshot of a layer in WASM memory between
//! gestures, keyed by the layer's id and a version it bumps on every edit.

use crate::types::JsPixelBuffer;
use marquee_core::SnapshotCache;
use wasm_bindgen::prelude::*;

/// Version-keyed cache of layer snapshots.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cache = new JsSnapshotCache();
/// let snapshot = cache.get(layer.id, layer.version);
/// if (!snapshot) {
///   snapshot = cache.insert(layer.id, layer.version, readLayerPixels(layer));
/// }
/// ```
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsSnapshotCache {
    inner: SnapshotCache<String>,
}

#[wasm_bindgen]
impl JsSnapshotCache {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsSnapshotCache {
        Self::default()
    }

    /// The snapshot stored for `id` at exactly `version`, if any.
    ///
    /// The returned handle shares the cached pixels.
    pub fn get(&self, id: &str, version: u32) -> Option<JsPixelBuffer> {
        self.inner
            .get(&id.to_string(), u64::from(version))
            .map(JsPixelBuffer::from_shared)
    }

    /// Store a snapshot, replacing any older version for `id`.
    ///
    /// The cache keeps a handle to `image`'s pixels rather than a copy.
    pub fn insert(&mut self, id: &str, version: u32, image: &JsPixelBuffer) -> JsPixelBuffer {
        let snapshot = self
            .inner
            .insert_shared(id.to_string(), u64::from(version), image.shared());
        JsPixelBuffer::from_shared(snapshot)
    }

    /// Drop the snapshot for `id`. Returns whether one was cached.
    pub fn invalidate(&mut self, id: &str) -> bool {
        self.inner.invalidate(&id.to_string())
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn image(value: u8) -> JsPixelBuffer {
        JsPixelBuffer::try_new(1, 1, vec![value; 4]).unwrap()
    }

    #[test]
    fn test_cache_roundtrip() {
        let mut cache = JsSnapshotCache::new();
        cache.insert("layer-a", 1, &image(7));

        assert_eq!(cache.get("layer-a", 1).unwrap().pixels(), vec![7; 4]);
        assert!(cache.get("layer-a", 2).is_none());
        assert_eq!(cache.length(), 1);
    }

    #[test]
    fn test_cache_shares_pixels() {
        let mut cache = JsSnapshotCache::new();
        let original = image(3);
        let stored = cache.insert("layer-a", 1, &original);
        let hit = cache.get("layer-a", 1).unwrap();

        assert!(Arc::ptr_eq(&original.shared(), &stored.shared()));
        assert!(Arc::ptr_eq(&original.shared(), &hit.shared()));
    }

    #[test]
    fn test_cache_invalidate() {
        let mut cache = JsSnapshotCache::new();
        cache.insert("layer-a", 1, &image(7));
        cache.insert("layer-b", 1, &image(8));

        assert!(cache.invalidate("layer-a"));
        assert!(cache.get("layer-a", 1).is_none());
        assert_eq!(cache.length(), 1);

        cache.clear();
        assert_eq!(cache.length(), 0);
    }
}
