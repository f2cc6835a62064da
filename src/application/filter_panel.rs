//! Filter selector: category tabs, value rows, history synchronization.
//!
//! The panel owns exactly one piece of view state, the active category
//! tab. The active filter itself belongs to the caller and is passed in
//! where needed; the panel reports selections as [`PanelEvent`]s instead
//! of mutating filter state, which keeps tab and filter from drifting
//! apart.

use tracing::debug;

use crate::domain::taxonomy::{FilterSelection, TaxonCategory};
use crate::infra::history::{History, QueryParams};

pub const PARAM_CATEGORY: &str = "category";
pub const PARAM_TYPE: &str = "type";
pub const PARAM_VALUE: &str = "value";

/// Caller-facing events emitted by panel interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The user picked a value row; `None` is the "All" reset row.
    FilterChanged {
        category: TaxonCategory,
        value: Option<String>,
    },
    /// The user dismissed the drawer (mobile layout only).
    Closed,
}

/// One selectable row in the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    pub label: String,
    /// `None` for the "All <Category>" reset row.
    pub value: Option<String>,
    pub active: bool,
}

pub struct FilterPanel {
    orders: Vec<String>,
    classes: Vec<String>,
    active_category: TaxonCategory,
    mobile_drawer: bool,
}

impl FilterPanel {
    /// Build the panel, deriving the active tab from the `category`
    /// query parameter, falling back to the active filter's category,
    /// then to `Order`. Malformed or missing parameters take the
    /// fallback path silently.
    ///
    /// The taxonomy lists are supplied by the caller; the panel never
    /// fetches them.
    pub fn mount(
        orders: Vec<String>,
        classes: Vec<String>,
        history: &dyn History,
        active_filter: Option<&FilterSelection>,
        mobile_drawer: bool,
    ) -> Self {
        let active_category = Self::category_from(&history.query())
            .or_else(|| active_filter.map(FilterSelection::category))
            .unwrap_or(TaxonCategory::Order);
        Self {
            orders,
            classes,
            active_category,
            mobile_drawer,
        }
    }

    fn category_from(params: &QueryParams) -> Option<TaxonCategory> {
        params
            .get(PARAM_CATEGORY)
            .and_then(|value| TaxonCategory::try_from(value).ok())
    }

    pub fn active_category(&self) -> TaxonCategory {
        self.active_category
    }

    pub fn is_mobile_drawer(&self) -> bool {
        self.mobile_drawer
    }

    /// Switch the active tab, mirroring it into the URL via a
    /// non-reloading history push.
    ///
    /// When the active filter belongs to the other category, the
    /// `type`/`value` parameters are cleared in the same push, so the
    /// URL never carries an order value under the class tab or vice
    /// versa. This is the only panel operation that touches the URL;
    /// filter-value changes are the caller's navigation to make.
    pub fn select_category(
        &mut self,
        category: TaxonCategory,
        history: &mut dyn History,
        active_filter: Option<&FilterSelection>,
    ) {
        let mut params = history.query();
        params.set(PARAM_CATEGORY, category.as_str());
        if active_filter.is_some_and(|filter| filter.category() != category) {
            params.remove(PARAM_TYPE);
            params.remove(PARAM_VALUE);
        }
        history.push(&params);
        self.active_category = category;
        debug!(category = category.as_str(), "category tab switched");
    }

    /// Re-read the active tab from the URL after back/forward
    /// navigation. The filter value itself is not re-derived here; that
    /// remains the caller's responsibility.
    pub fn handle_navigation(&mut self, history: &dyn History) {
        if let Some(category) = Self::category_from(&history.query()) {
            self.active_category = category;
        }
    }

    /// Rows for the active tab: the "All <Category>" reset row first,
    /// then one row per available value.
    ///
    /// The row matching the active filter is marked active; the reset
    /// row is marked when no filter is set or the filter belongs to the
    /// other category.
    pub fn rows(&self, active_filter: Option<&FilterSelection>) -> Vec<FilterRow> {
        let category = self.active_category;
        let values = match category {
            TaxonCategory::Order => &self.orders,
            TaxonCategory::Class => &self.classes,
        };
        let selected = active_filter
            .filter(|filter| filter.category() == category)
            .map(FilterSelection::value);
        let mut rows = Vec::with_capacity(values.len() + 1);
        rows.push(FilterRow {
            label: format!("All {}", category.plural_label()),
            value: None,
            active: selected.is_none(),
        });
        for value in values {
            rows.push(FilterRow {
                label: value.clone(),
                value: Some(value.clone()),
                active: selected == Some(value.as_str()),
            });
        }
        rows
    }

    /// Report a row selection to the caller.
    pub fn select_row(&self, value: Option<String>) -> PanelEvent {
        PanelEvent::FilterChanged {
            category: self.active_category,
            value,
        }
    }

    /// Dismiss affordance, present only in the mobile drawer layout.
    pub fn dismiss(&self) -> Option<PanelEvent> {
        self.mobile_drawer.then_some(PanelEvent::Closed)
    }
}
