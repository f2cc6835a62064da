//! Cache key definitions for the pagination cache.

use crate::domain::taxonomy::{FilterSelection, TaxonCategory};

/// Identifies one pagination sequence.
///
/// The unfiltered listing has its own distinct key; every
/// `{category, value}` pair observed during the session gets another.
/// Switching filters always re-keys; returning to a previously seen key
/// finds its pages still cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListKey {
    Unfiltered,
    Filtered {
        category: TaxonCategory,
        value: String,
    },
}

impl ListKey {
    pub fn from_filter(filter: Option<&FilterSelection>) -> Self {
        match filter {
            None => ListKey::Unfiltered,
            Some(selection) => ListKey::Filtered {
                category: selection.category(),
                value: selection.value().to_string(),
            },
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        matches!(self, ListKey::Unfiltered)
    }
}
