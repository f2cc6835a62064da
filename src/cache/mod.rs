//! Session-lifetime caching of fetched catalog pages.

pub mod keys;
pub mod store;

pub use keys::ListKey;
pub use store::{PaginationCache, SessionStore};
