//! Elytra: headless browsing core for an insect catalog.
//!
//! The crate models the two client-side concerns of a filterable,
//! infinitely scrollable catalog view without owning any rendering:
//!
//! - [`application::filter_panel`] keeps the filter selector's category
//!   tab in sync with a navigation-history abstraction, so back/forward
//!   navigation and reloads restore the correct view.
//! - [`application::browse`] loads fixed-size pages from the external
//!   document store, caches them per filter for the lifetime of the
//!   session, and seeds the unfiltered first page from a warm session
//!   list when one exists.
//!
//! The content store is an external collaborator reached through the
//! [`application::store::ContentStore`] trait; [`infra::http`] provides
//! the HTTP adapter and [`infra::groq`] the parameterized query builder.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
