//! Session-lifetime page cache keyed by filter selection.
//!
//! Entries are never evicted: switching back to a previously viewed
//! filter reuses its pages for the rest of the session.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use metrics::counter;
use tracing::debug;

use crate::application::pagination::{PAGE_SIZE, next_page_after};
use crate::domain::entries::CatalogEntry;

use super::keys::ListKey;

/// Pages fetched so far for one key plus the next page index to request.
///
/// Pages are append-only and ordered: page 0 first, page 1 after, never
/// reordered or deduplicated (the store's sort order is trusted to be
/// stable across windows for the same filter).
#[derive(Debug, Clone)]
pub struct PaginationCache {
    pages: Vec<Vec<CatalogEntry>>,
    next_page: Option<u32>,
}

impl PaginationCache {
    fn fresh() -> Self {
        Self {
            pages: Vec::new(),
            next_page: Some(0),
        }
    }

    pub fn pages(&self) -> &[Vec<CatalogEntry>] {
        &self.pages
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.pages.iter().flatten()
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_page
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    pub(crate) fn push_page(&mut self, page: Vec<CatalogEntry>) {
        let len = page.len();
        self.pages.push(page);
        self.next_page = next_page_after(self.pages.len(), len);
    }
}

/// Per-key pagination caches plus the warm unfiltered entry list used to
/// hydrate the unfiltered key's first page.
#[derive(Debug, Default)]
pub struct SessionStore {
    lists: HashMap<ListKey, PaginationCache>,
    warm_entries: Option<Vec<CatalogEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unfiltered entry list fetched elsewhere in the session.
    ///
    /// Only affects keys not yet touched: a cache entry that already
    /// exists keeps the pages it has.
    pub fn set_warm_entries(&mut self, entries: Vec<CatalogEntry>) {
        self.warm_entries = Some(entries);
    }

    pub fn get(&self, key: &ListKey) -> Option<&PaginationCache> {
        self.lists.get(key)
    }

    /// Cache entry for `key`, created on first touch.
    ///
    /// First touch of the unfiltered key seeds page 0 from the warm
    /// entry list when that list is non-empty, so the common
    /// "no filter, first load" case costs no fetch.
    pub fn entry(&mut self, key: &ListKey) -> &mut PaginationCache {
        let warm_entries = &self.warm_entries;
        match self.lists.entry(key.clone()) {
            Entry::Occupied(occupied) => occupied.into_mut(),
            Entry::Vacant(vacant) => {
                let mut cache = PaginationCache::fresh();
                if key.is_unfiltered()
                    && let Some(warm) = warm_entries.as_ref().filter(|list| !list.is_empty())
                {
                    let first_page: Vec<_> = warm.iter().take(PAGE_SIZE).cloned().collect();
                    debug!(
                        seeded = first_page.len(),
                        "hydrated unfiltered page 0 from warm session list"
                    );
                    counter!("elytra_hydration_total").increment(1);
                    cache.push_page(first_page);
                }
                vacant.insert(cache)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entries::{AssetRef, ImageRef, SlugRef};

    fn entry_titled(title: &str) -> CatalogEntry {
        CatalogEntry {
            id: format!("insect-{title}"),
            title: title.to_string(),
            latin_title: format!("Latinus {title}"),
            short_description: String::new(),
            description: String::new(),
            image: ImageRef {
                asset: AssetRef {
                    reference: "image-ref".to_string(),
                },
            },
            slug: SlugRef {
                current: title.to_lowercase(),
            },
            order: "Coleoptera".to_string(),
            class: "Insecta".to_string(),
        }
    }

    fn entries(count: usize) -> Vec<CatalogEntry> {
        (0..count).map(|i| entry_titled(&format!("{i:03}"))).collect()
    }

    #[test]
    fn fresh_entry_starts_at_page_zero() {
        let mut session = SessionStore::new();
        let cache = session.entry(&ListKey::Unfiltered);
        assert!(cache.pages().is_empty());
        assert_eq!(cache.next_page(), Some(0));
    }

    #[test]
    fn full_page_advances_the_cursor() {
        let mut session = SessionStore::new();
        let cache = session.entry(&ListKey::Unfiltered);
        cache.push_page(entries(PAGE_SIZE));
        assert_eq!(cache.next_page(), Some(1));
        cache.push_page(entries(PAGE_SIZE));
        assert_eq!(cache.next_page(), Some(2));
    }

    #[test]
    fn short_page_ends_the_sequence() {
        let mut session = SessionStore::new();
        let cache = session.entry(&ListKey::Unfiltered);
        cache.push_page(entries(PAGE_SIZE));
        cache.push_page(entries(5));
        assert!(!cache.has_next_page());
        assert_eq!(cache.entries().count(), PAGE_SIZE + 5);
    }

    #[test]
    fn warm_list_seeds_only_the_unfiltered_key() {
        let mut session = SessionStore::new();
        session.set_warm_entries(entries(45));

        let filtered = ListKey::Filtered {
            category: crate::domain::taxonomy::TaxonCategory::Order,
            value: "Coleoptera".to_string(),
        };
        assert!(session.entry(&filtered).pages().is_empty());

        let unfiltered = session.entry(&ListKey::Unfiltered);
        assert_eq!(unfiltered.pages().len(), 1);
        assert_eq!(unfiltered.pages()[0].len(), PAGE_SIZE);
        assert_eq!(unfiltered.next_page(), Some(1));
    }

    #[test]
    fn short_warm_list_seeds_and_ends_pagination() {
        let mut session = SessionStore::new();
        session.set_warm_entries(entries(7));
        let cache = session.entry(&ListKey::Unfiltered);
        assert_eq!(cache.entries().count(), 7);
        assert!(!cache.has_next_page());
    }

    #[test]
    fn empty_warm_list_triggers_no_seeding() {
        let mut session = SessionStore::new();
        session.set_warm_entries(Vec::new());
        let cache = session.entry(&ListKey::Unfiltered);
        assert!(cache.pages().is_empty());
        assert_eq!(cache.next_page(), Some(0));
    }
}
