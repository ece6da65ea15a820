use std::collections::HashMap;

use crate::{CollectionId, CollectionPage};

pub const CACHE_CAPACITY: usize = 32;

/// Cache key for one page of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageKey {
    pub collection_id: CollectionId,
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CacheEntry {
    data: Option<CollectionPage>,
    in_flight: bool,
    touched: u64,
}

/// Page responses keyed by [`PageKey`], with in-flight deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageCache {
    entries: HashMap<PageKey, CacheEntry>,
    clock: u64,
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as requested. Returns `false` if a request is already in flight.
    pub fn begin(&mut self, key: &PageKey) -> bool {
        self.clock += 1;
        let clock = self.clock;
        let entry = self.entries.entry(key.clone()).or_default();
        entry.touched = clock;
        if entry.in_flight {
            return false;
        }
        entry.in_flight = true;
        self.evict();
        true
    }

    pub fn complete(&mut self, key: &PageKey, page: CollectionPage) {
        self.clock += 1;
        let entry = self.entries.entry(key.clone()).or_default();
        entry.data = Some(page);
        entry.in_flight = false;
        entry.touched = self.clock;
        self.evict();
    }

    /// Clears the in-flight flag, keeping whatever data was cached before.
    pub fn fail(&mut self, key: &PageKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.in_flight = false;
        }
    }

    pub fn get(&self, key: &PageKey) -> Option<&CollectionPage> {
        self.entries.get(key).and_then(|entry| entry.data.as_ref())
    }

    pub fn is_in_flight(&self, key: &PageKey) -> bool {
        self.entries.get(key).is_some_and(|entry| entry.in_flight)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict(&mut self) {
        while self.entries.len() > CACHE_CAPACITY {
            let oldest = self
                .entries
                .iter()
                .filter(|(_, entry)| !entry.in_flight)
                .min_by_key(|(_, entry)| entry.touched)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(collection: &str, offset: u64) -> PageKey {
        PageKey {
            collection_id: collection.to_string(),
            offset,
            limit: 25,
        }
    }

    fn page(collection: &str, total: u64) -> CollectionPage {
        CollectionPage {
            id: collection.to_string(),
            name: collection.to_uppercase(),
            companies: Vec::new(),
            total,
            job: None,
        }
    }

    #[test]
    fn repeated_begin_is_deduplicated_until_completion() {
        let mut cache = PageCache::new();
        let k = key("a", 0);
        assert!(cache.begin(&k));
        assert!(!cache.begin(&k));
        cache.complete(&k, page("a", 3));
        assert!(cache.begin(&k));
        assert_eq!(cache.get(&k).map(|p| p.total), Some(3));
    }

    #[test]
    fn different_keys_do_not_interfere() {
        let mut cache = PageCache::new();
        assert!(cache.begin(&key("a", 0)));
        assert!(cache.begin(&key("a", 25)));
        assert!(cache.begin(&key("b", 0)));
        cache.complete(&key("b", 0), page("b", 9));
        assert!(cache.is_in_flight(&key("a", 0)));
        assert!(cache.get(&key("a", 0)).is_none());
    }

    #[test]
    fn failure_keeps_previous_data() {
        let mut cache = PageCache::new();
        let k = key("a", 0);
        cache.begin(&k);
        cache.complete(&k, page("a", 5));
        cache.begin(&k);
        cache.fail(&k);
        assert!(!cache.is_in_flight(&k));
        assert_eq!(cache.get(&k).map(|p| p.total), Some(5));
    }

    #[test]
    fn eviction_drops_least_recently_touched_idle_entries() {
        let mut cache = PageCache::new();
        for offset in 0..(CACHE_CAPACITY as u64 + 4) {
            let k = key("a", offset * 25);
            cache.begin(&k);
            cache.complete(&k, page("a", 1));
        }
        assert_eq!(cache.len(), CACHE_CAPACITY);
        assert!(cache.get(&key("a", 0)).is_none());
        assert!(cache.get(&key("a", (CACHE_CAPACITY as u64 + 3) * 25)).is_some());
    }
}
