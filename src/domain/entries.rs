//! Catalog entry records as projected by the content store.

use serde::{Deserialize, Serialize};

/// Reference to an image asset held by the content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub asset: AssetRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "_ref")]
    pub reference: String,
}

/// URL slug wrapper mirroring the store's `{ current }` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlugRef {
    pub current: String,
}

/// One insect document.
///
/// Owned and mutated only by the external content store; immutable from
/// this crate's perspective. The `order` and `class` labels are
/// denormalized by the store-side projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(rename = "latinTitle")]
    pub latin_title: String,
    #[serde(rename = "shortDescription")]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    pub image: ImageRef,
    pub slug: SlugRef,
    pub order: String,
    pub class: String,
}
