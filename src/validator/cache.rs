use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// A cached registry answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    status: String,
}

impl CacheEntry {
    /// Wrap a registry status. Empty statuses are never cacheable.
    pub fn new(status: impl Into<String>) -> Option<Self> {
        let status = status.into();
        (!status.is_empty()).then_some(Self { status })
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn is_well_formed(&self) -> bool {
        !self.status.is_empty()
    }
}

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRead {
    Hit(String),
    Miss,
    /// An entry exists but does not hold a usable status. Never trust it.
    Polluted,
}

/// Process-lifetime map from the 9-digit VAT number to the registry status.
///
/// Safe to share between tasks; writes are per-key atomic. Entries are
/// never evicted.
#[derive(Debug, Default)]
pub struct StatusCache {
    entries: DashMap<String, CacheEntry>,
}

impl StatusCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, key: &str) -> CacheRead {
        match self.entries.get(key) {
            Some(entry) if entry.is_well_formed() => CacheRead::Hit(entry.status.clone()),
            Some(_) => CacheRead::Polluted,
            None => CacheRead::Miss,
        }
    }

    /// Store `entry` unless a well-formed entry is already present, and
    /// return the status that ends up in the cache.
    pub fn load_or_store(&self, key: &str, entry: CacheEntry) -> String {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_well_formed() {
                    occupied.insert(entry);
                }
                occupied.get().status.clone()
            }
            Entry::Vacant(vacant) => vacant.insert(entry).status.clone(),
        }
    }

    /// Delete the entry under `key` if it is not well-formed.
    ///
    /// A concurrent writer may have replaced it with a good entry in the
    /// meantime; that one is kept.
    pub fn remove_polluted(&self, key: &str) -> bool {
        self.entries
            .remove_if(key, |_, entry| !entry.is_well_formed())
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&self, key: &str, status: &str) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                status: status.to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn entry(s: &str) -> CacheEntry {
        CacheEntry::new(s).unwrap()
    }

    #[test]
    fn empty_status_is_not_an_entry() {
        assert!(CacheEntry::new("").is_none());
        assert_eq!(CacheEntry::new("false").unwrap().status(), "false");
    }

    #[test]
    fn load_miss_then_hit() {
        let cache = StatusCache::new();
        assert_eq!(cache.load("302210417"), CacheRead::Miss);
        assert_eq!(cache.load_or_store("302210417", entry("true")), "true");
        assert_eq!(cache.load("302210417"), CacheRead::Hit("true".into()));
    }

    #[test]
    fn first_writer_wins() {
        let cache = StatusCache::new();
        assert_eq!(cache.load_or_store("302210417", entry("true")), "true");
        assert_eq!(cache.load_or_store("302210417", entry("false")), "true");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn polluted_entry_detected_and_replaced() {
        let cache = StatusCache::new();
        cache.insert_raw("302210417", "");
        assert_eq!(cache.load("302210417"), CacheRead::Polluted);
        assert_eq!(cache.load_or_store("302210417", entry("true")), "true");
        assert_eq!(cache.load("302210417"), CacheRead::Hit("true".into()));
    }

    #[test]
    fn remove_polluted_keeps_good_entries() {
        let cache = StatusCache::new();
        cache.insert_raw("100000000", "");
        cache.load_or_store("302210417", entry("true"));
        assert!(cache.remove_polluted("100000000"));
        assert!(!cache.remove_polluted("302210417"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_writers_agree() {
        let cache = Arc::new(StatusCache::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    let status = if i % 2 == 0 { "true" } else { "false" };
                    cache.load_or_store("302210417", entry(status))
                })
            })
            .collect();
        let results: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.load("302210417"), CacheRead::Hit(results[0].clone()));
    }
}
