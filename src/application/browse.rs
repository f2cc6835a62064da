//! Paged content loader: per-filter pagination with session caching.

use std::collections::HashSet;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::store::{ContentStore, StoreError};
use crate::cache::keys::ListKey;
use crate::cache::store::SessionStore;
use crate::domain::entries::CatalogEntry;
use crate::domain::taxonomy::FilterSelection;

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Correlates an issued fetch with the filter key and page index that
/// were current when the request left.
///
/// A completed fetch is applied to the issuing key only, never to
/// whatever key happens to be active when the response lands, so a
/// reply arriving after a filter switch cannot leak into the wrong
/// listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    filter: Option<FilterSelection>,
    page: u32,
}

impl LoadTicket {
    pub fn key(&self) -> ListKey {
        ListKey::from_filter(self.filter.as_ref())
    }

    pub fn filter(&self) -> Option<&FilterSelection> {
        self.filter.as_ref()
    }

    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Browsing state for one logical UI session.
///
/// Owns the per-key page caches and the set of in-flight fetches. All
/// mutation happens through discrete events (filter switch, load
/// ticket issue, fetch completion); no locking is involved.
pub struct CatalogBrowser {
    store: Arc<dyn ContentStore>,
    session: SessionStore,
    filter: Option<FilterSelection>,
    active: ListKey,
    in_flight: HashSet<(ListKey, u32)>,
}

impl CatalogBrowser {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self::with_session(store, SessionStore::new())
    }

    /// Start from a session store that may already hold warm entries or
    /// page caches from earlier in the session.
    pub fn with_session(store: Arc<dyn ContentStore>, mut session: SessionStore) -> Self {
        session.entry(&ListKey::Unfiltered);
        Self {
            store,
            session,
            filter: None,
            active: ListKey::Unfiltered,
            in_flight: HashSet::new(),
        }
    }

    pub fn active_filter(&self) -> Option<&FilterSelection> {
        self.filter.as_ref()
    }

    pub fn active_key(&self) -> &ListKey {
        &self.active
    }

    /// Pages fetched so far for the active filter, in arrival order.
    pub fn pages(&self) -> &[Vec<CatalogEntry>] {
        self.session
            .get(&self.active)
            .map(|cache| cache.pages())
            .unwrap_or_default()
    }

    /// Flattened view over [`pages`](Self::pages).
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.pages().iter().flatten()
    }

    pub fn has_next_page(&self) -> bool {
        self.session
            .get(&self.active)
            .is_some_and(|cache| cache.has_next_page())
    }

    /// Switch the active filter.
    ///
    /// A previously seen key keeps its fetched pages; a key observed for
    /// the first time starts pagination at page 0 (or, for the
    /// unfiltered key, from the warm session list).
    pub fn set_filter(&mut self, filter: Option<FilterSelection>) {
        let key = ListKey::from_filter(filter.as_ref());
        if key == self.active {
            self.filter = filter;
            return;
        }
        let reused = self
            .session
            .get(&key)
            .is_some_and(|cache| !cache.pages().is_empty());
        if reused {
            counter!("elytra_page_cache_hit_total").increment(1);
        }
        self.filter = filter;
        self.active = key;
        self.session.entry(&self.active);
        debug!(key = ?self.active, reused, "filter switched");
    }

    /// Hand out a fetch ticket for the active key's next page.
    ///
    /// Returns `None` when the key has reached end-of-data or when that
    /// page is already in flight, so concurrent load-more triggers for
    /// the same key collapse into one request.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let next = self.session.entry(&self.active).next_page()?;
        if !self.in_flight.insert((self.active.clone(), next)) {
            debug!(key = ?self.active, page = next, "load already in flight");
            return None;
        }
        Some(LoadTicket {
            filter: self.filter.clone(),
            page: next,
        })
    }

    /// Apply a completed fetch.
    ///
    /// The page lands in the cache entry of the ticket's issuing key. A
    /// ticket that no longer matches that key's next page index
    /// (superseded by an earlier completion) is dropped. Errors leave
    /// the key's cached pages intact so they stay visible and the same
    /// page can be requested again later.
    pub fn complete(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<CatalogEntry>, StoreError>,
    ) -> Result<usize, BrowseError> {
        let key = ticket.key();
        self.in_flight.remove(&(key.clone(), ticket.page));
        let page = match result {
            Ok(page) => page,
            Err(err) => {
                warn!(key = ?key, page = ticket.page, error = %err, "page fetch failed");
                return Err(BrowseError::Store(err));
            }
        };
        let cache = self.session.entry(&key);
        if cache.next_page() != Some(ticket.page) {
            debug!(key = ?key, page = ticket.page, "dropping stale page response");
            return Ok(0);
        }
        let appended = page.len();
        cache.push_page(page);
        Ok(appended)
    }

    /// Fetch the active key's next page, retrying a transport failure
    /// once.
    ///
    /// Returns the number of entries appended; `Ok(0)` when pagination
    /// has ended, the page was already in flight, or a stale response
    /// was dropped.
    pub async fn load_more(&mut self) -> Result<usize, BrowseError> {
        let Some(ticket) = self.begin_load() else {
            return Ok(0);
        };
        let result = self.fetch_with_retry(&ticket).await;
        self.complete(ticket, result)
    }

    async fn fetch_with_retry(&self, ticket: &LoadTicket) -> Result<Vec<CatalogEntry>, StoreError> {
        counter!("elytra_store_fetch_total").increment(1);
        match self.store.fetch_page(ticket.filter(), ticket.page).await {
            Err(err) if err.is_transient() => {
                warn!(page = ticket.page, error = %err, "transient store failure, retrying once");
                counter!("elytra_store_fetch_total").increment(1);
                self.store.fetch_page(ticket.filter(), ticket.page).await
            }
            other => other,
        }
    }
}
