//! Client-side catalog filtering.
//!
//! [`apply`] narrows an already-fetched catalog snapshot by the criteria read
//! from the filter controls. It never touches the store and never reorders
//! records: the output is always a subsequence of the input.

use crate::errors::{Error, Result};
use crate::models::CatalogRecord;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Upper bound (exclusive) of the low stock band.
pub const LOW_STOCK_LIMIT: u32 = 20;
/// Upper bound (inclusive) of the medium stock band.
pub const HIGH_STOCK_LIMIT: u32 = 200;

/// Stock level bucket selected in the quantity control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuantityBand {
    /// No quantity constraint
    #[default]
    None,
    /// Fewer than 20 units
    Low,
    /// Between 20 and 200 units, inclusive
    Medium,
    /// More than 200 units
    High,
}

impl QuantityBand {
    /// The band a given stock quantity falls in. Never returns `None`.
    #[must_use]
    pub const fn classify(quantity: u32) -> Self {
        if quantity < LOW_STOCK_LIMIT {
            Self::Low
        } else if quantity <= HIGH_STOCK_LIMIT {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Whether `quantity` satisfies this band. `None` matches everything.
    #[must_use]
    pub fn matches(self, quantity: u32) -> bool {
        self == Self::None || Self::classify(quantity) == self
    }
}

impl FromStr for QuantityBand {
    type Err = Error;

    /// Parses the value of the quantity control. Accepts the English and the
    /// Portuguese option values; the empty string clears the band.
    fn from_str(value: &str) -> Result<Self> {
        match normalize(value.trim()).as_str() {
            "" | "none" | "todos" => Ok(Self::None),
            "low" | "baixo" => Ok(Self::Low),
            "medium" | "medio" => Ok(Self::Medium),
            "high" | "alto" => Ok(Self::High),
            _ => Err(Error::Config {
                message: format!("Unknown quantity band: {value:?}"),
            }),
        }
    }
}

/// Filter values read from the catalog controls.
///
/// Empty strings and [`QuantityBand::None`] impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case- and accent-insensitive substring of the product name
    pub name_query: String,
    /// Exact category name
    pub category: String,
    /// Supplier control value. Currently ignored by [`apply`].
    pub supplier: String,
    /// Stock level band
    pub quantity_band: QuantityBand,
}

impl FilterCriteria {
    /// Whether every criterion is empty, i.e. the criteria match all records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name_query.is_empty()
            && self.category.is_empty()
            && self.supplier.is_empty()
            && self.quantity_band == QuantityBand::None
    }
}

/// Lower-cases `text` and strips diacritics (Unicode combining marks after
/// canonical decomposition), so "Açúcar" and "acucar" compare equal.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn matches_name(record: &CatalogRecord, normalized_query: &str) -> bool {
    normalized_query.is_empty() || normalize(&record.name).contains(normalized_query)
}

fn matches_category(record: &CatalogRecord, category: &str) -> bool {
    category.is_empty() || record.category == category
}

// Supplier filtering is wired to its control but deliberately inert until the
// product decides whether it ships. Keep it a no-op; do not enable it here.
const fn matches_supplier(_record: &CatalogRecord, _supplier: &str) -> bool {
    true
}

/// Returns the records that satisfy every criterion, in their original order.
#[must_use]
pub fn apply(records: &[CatalogRecord], criteria: &FilterCriteria) -> Vec<CatalogRecord> {
    let normalized_query = normalize(&criteria.name_query);
    if !criteria.supplier.is_empty() {
        tracing::debug!(
            "Supplier filter {:?} is inert and matches every record",
            criteria.supplier
        );
    }

    records
        .iter()
        .filter(|record| matches_name(record, &normalized_query))
        .filter(|record| matches_category(record, &criteria.category))
        .filter(|record| matches_supplier(record, &criteria.supplier))
        .filter(|record| criteria.quantity_band.matches(record.quantity_on_hand))
        .cloned()
        .collect()
}
