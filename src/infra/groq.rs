//! Parameterized GROQ query construction for the catalog listing.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::application::pagination::PageWindow;
use crate::domain::taxonomy::FilterSelection;

/// Fields projected into a [`CatalogEntry`](crate::domain::entries::CatalogEntry).
const PROJECTION: &str = "{ _id, title, latinTitle, shortDescription, description, image, slug, \"order\": order->name, \"class\": order->class->name }";

/// Name of the bound parameter carrying the filter value.
pub const TAXON_PARAM: &str = "taxon";

/// A GROQ query plus its bound parameters.
///
/// The filter value travels as a parameter, never spliced into the
/// query text, so quote characters in a value cannot alter query
/// semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroqQuery {
    pub body: String,
    pub params: BTreeMap<String, Value>,
}

/// Build the listing query for one page window under an optional filter.
///
/// Shape: `*[_type == "insect" && <field> == $taxon] | order(title asc)
/// [start...end] { ...projection }`. The field name comes from the
/// [`TaxonCategory`](crate::domain::taxonomy::TaxonCategory) enum, so no
/// caller-controlled string ever reaches the query text.
pub fn entries_page(filter: Option<&FilterSelection>, window: PageWindow) -> GroqQuery {
    let mut params = BTreeMap::new();
    let filter_clause = match filter {
        Some(selection) => {
            params.insert(
                TAXON_PARAM.to_string(),
                Value::String(selection.value().to_string()),
            );
            format!(" && {} == ${TAXON_PARAM}", selection.category().as_str())
        }
        None => String::new(),
    };
    let mut body = format!(
        "*[_type == \"insect\"{filter_clause}] | order(title asc) [{}...{}] ",
        window.start, window.end
    );
    body.push_str(PROJECTION);
    GroqQuery { body, params }
}
