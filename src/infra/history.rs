//! Navigation-history abstraction.
//!
//! Query-string state is mediated through an explicitly passed
//! [`History`] implementation rather than read ad hoc, so the panel and
//! its host agree on a single owner for URL state. Browser hosts wrap
//! the real history API; tests and non-browser hosts use
//! [`MemoryHistory`].

use url::form_urlencoded;

/// Parsed query-string parameters.
///
/// Tolerant of malformed input: unparseable fragments simply do not
/// yield pairs, and lookups for absent keys return `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(name, _)| name == key) {
            Some(pair) => pair.1 = value.to_string(),
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(name, _)| name != key);
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                self.pairs
                    .iter()
                    .map(|(name, value)| (name.as_str(), value.as_str())),
            )
            .finish()
    }
}

/// Host-provided navigation history.
pub trait History {
    /// Query parameters of the current location.
    fn query(&self) -> QueryParams;

    /// Push a new history entry carrying the given parameters. Must not
    /// reload the view.
    fn push(&mut self, params: &QueryParams);
}

/// In-memory history: a stack of query strings with a cursor, shaped
/// like the browser's session history.
///
/// After `back`/`forward` the host is expected to call the panel's
/// `handle_navigation`, playing the role of a popstate listener.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    stack: Vec<String>,
    position: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::with_query("")
    }

    pub fn with_query(query: &str) -> Self {
        Self {
            stack: vec![query.trim_start_matches('?').to_string()],
            position: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.stack[self.position]
    }

    /// Step back one entry; `false` at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.position > 0 {
            self.position -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one entry; `false` at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.position + 1 < self.stack.len() {
            self.position += 1;
            true
        } else {
            false
        }
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl History for MemoryHistory {
    fn query(&self) -> QueryParams {
        QueryParams::parse(self.current())
    }

    fn push(&mut self, params: &QueryParams) {
        // Pushing after going back drops the forward entries, as the
        // browser does.
        self.stack.truncate(self.position + 1);
        self.stack.push(params.to_query_string());
        self.position += 1;
    }
}
