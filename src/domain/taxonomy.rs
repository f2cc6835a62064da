//! Taxonomic filter categories and the active filter selection.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The two mutually exclusive filter categories.
///
/// The variant name doubles as the document field an equality filter
/// applies to and as the value of the `category`/`type` query-string
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonCategory {
    Order,
    Class,
}

impl TaxonCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            TaxonCategory::Order => "order",
            TaxonCategory::Class => "class",
        }
    }

    /// Plural display label, used for the "All ..." reset row.
    pub fn plural_label(self) -> &'static str {
        match self {
            TaxonCategory::Order => "Orders",
            TaxonCategory::Class => "Classes",
        }
    }
}

impl TryFrom<&str> for TaxonCategory {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "order" => Ok(TaxonCategory::Order),
            "class" => Ok(TaxonCategory::Class),
            _ => Err(()),
        }
    }
}

/// The active `{category, value}` pair restricting which entries are
/// shown. At most one selection exists at a time; never an order and a
/// class filter simultaneously, which the single-value shape enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSelection {
    category: TaxonCategory,
    value: String,
}

impl FilterSelection {
    pub fn new(category: TaxonCategory, value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("filter value must not be empty"));
        }
        Ok(Self { category, value })
    }

    pub fn category(&self) -> TaxonCategory {
        self.category
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        assert_eq!(
            TaxonCategory::try_from(TaxonCategory::Order.as_str()),
            Ok(TaxonCategory::Order)
        );
        assert_eq!(
            TaxonCategory::try_from(TaxonCategory::Class.as_str()),
            Ok(TaxonCategory::Class)
        );
        assert!(TaxonCategory::try_from("family").is_err());
    }

    #[test]
    fn selection_rejects_blank_values() {
        let err = FilterSelection::new(TaxonCategory::Order, "   ").expect_err("blank rejected");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn selection_exposes_its_parts() {
        let selection =
            FilterSelection::new(TaxonCategory::Class, "Insecta").expect("valid selection");
        assert_eq!(selection.category(), TaxonCategory::Class);
        assert_eq!(selection.value(), "Insecta");
    }
}
