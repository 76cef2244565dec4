//! Move-to-front candidate ordering.

use std::sync::Arc;

use smallvec::SmallVec;

/// Default bound on entries per syntax category.
pub const DEFAULT_MRU_CAPACITY: usize = 32;

/// Bounded move-to-front sequence of recently successful candidates.
///
/// Entries are `Arc`s compared by pointer identity. A candidate appears at
/// most once; promotion moves it to the front and evicts from the back past
/// the bound. Candidates never tried are absent until their first success,
/// and the cache is never cleared during a session.
#[derive(Debug)]
pub struct MruCache<T> {
    entries: Vec<Arc<T>>,
    capacity: usize,
}

impl<T> MruCache<T> {
    /// Create a cache with the default bound.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MRU_CAPACITY)
    }

    /// Create a cache bounded to `capacity` entries (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        MruCache {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Snapshot of the current front-to-back order.
    ///
    /// Search iterates the snapshot so that recursive resolution promoting
    /// into the same cache cannot invalidate an in-progress iteration.
    pub fn snapshot(&self) -> SmallVec<[Arc<T>; 8]> {
        self.entries.iter().map(Arc::clone).collect()
    }

    /// Move `entry` to the front, inserting it if absent.
    pub fn promote(&mut self, entry: &Arc<T>) {
        self.entries.retain(|existing| !Arc::ptr_eq(existing, entry));
        self.entries.insert(0, Arc::clone(entry));
        self.entries.truncate(self.capacity);
    }

    /// Whether `entry` is currently cached.
    pub fn contains(&self, entry: &Arc<T>) -> bool {
        self.entries
            .iter()
            .any(|existing| Arc::ptr_eq(existing, entry))
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been promoted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MruCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn front_to_back(cache: &MruCache<u32>) -> Vec<u32> {
        cache.snapshot().iter().map(|entry| **entry).collect()
    }

    #[test]
    fn promotion_moves_to_front_without_duplicates() {
        let mut cache = MruCache::new();
        let a = Arc::new(1);
        let b = Arc::new(2);
        cache.promote(&a);
        cache.promote(&b);
        assert_eq!(front_to_back(&cache), vec![2, 1]);
        cache.promote(&a);
        assert_eq!(front_to_back(&cache), vec![1, 2]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn identity_is_by_pointer_not_value() {
        let mut cache = MruCache::new();
        let a = Arc::new(7);
        let twin = Arc::new(7);
        cache.promote(&a);
        assert!(cache.contains(&a));
        assert!(!cache.contains(&twin));
        cache.promote(&twin);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn capacity_evicts_from_the_back() {
        let mut cache = MruCache::with_capacity(2);
        let a = Arc::new(1);
        let b = Arc::new(2);
        let c = Arc::new(3);
        cache.promote(&a);
        cache.promote(&b);
        cache.promote(&c);
        assert_eq!(front_to_back(&cache), vec![3, 2]);
        assert!(!cache.contains(&a));
    }

    #[test]
    fn starts_empty() {
        let cache: MruCache<u32> = MruCache::default();
        assert!(cache.is_empty());
        assert!(cache.snapshot().is_empty());
    }
}
