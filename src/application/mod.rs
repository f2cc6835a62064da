//! Application layer: browsing state, filter selection, store access.

pub mod browse;
pub mod filter_panel;
pub mod pagination;
pub mod store;
