use crate::services::cover_art::CoverImage;
use crate::types::CoverId;
use std::collections::HashMap;
use std::sync::RwLock;

/// Transformed cover images, shared between the poll loop (single writer)
/// and the HTTP handlers (concurrent readers).
pub(crate) struct CoverCache {
    inner: RwLock<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    covers: HashMap<CoverId, CoverImage>,
    latest: Option<CoverId>,
}

impl CoverCache {
    pub(crate) fn new() -> Self {
        Self {
            inner: RwLock::new(CacheInner::default()),
        }
    }

    /// Stores bytes under the cover id and moves the "latest" pointer to it.
    pub(crate) fn store(&self, cover_id: CoverId, image: CoverImage) {
        let mut guard = self.inner.write().unwrap();

        guard.covers.insert(cover_id.clone(), image);
        guard.latest = Some(cover_id);
    }

    pub(crate) fn get(&self, cover_id: &CoverId) -> Option<CoverImage> {
        let guard = self.inner.read().unwrap();

        guard.covers.get(cover_id).cloned()
    }

    pub(crate) fn latest(&self) -> Option<CoverImage> {
        let guard = self.inner.read().unwrap();

        guard
            .latest
            .as_ref()
            .and_then(|cover_id| guard.covers.get(cover_id))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::CoverCache;
    use crate::services::cover_art::{CoverFormat, CoverImage};
    use crate::types::CoverId;

    fn image(bytes: &[u8]) -> CoverImage {
        CoverImage {
            bytes: bytes.to_vec(),
            format: CoverFormat::Jpeg,
        }
    }

    #[test]
    fn empty_cache_misses() {
        let cache = CoverCache::new();

        assert!(cache.get(&CoverId::from("abc123")).is_none());
        assert!(cache.latest().is_none());
    }

    #[test]
    fn store_updates_the_latest_pointer() {
        let cache = CoverCache::new();

        cache.store(CoverId::from("first0"), image(b"one"));
        cache.store(CoverId::from("second"), image(b"two"));

        assert_eq!(cache.latest().unwrap().bytes, b"two");
        assert_eq!(cache.get(&CoverId::from("first0")).unwrap().bytes, b"one");
    }

    #[test]
    fn restoring_replaces_the_bytes() {
        let cache = CoverCache::new();

        cache.store(CoverId::from("cover1"), image(b"old"));
        cache.store(CoverId::from("cover1"), image(b"new"));

        assert_eq!(cache.get(&CoverId::from("cover1")).unwrap().bytes, b"new");
    }
}
