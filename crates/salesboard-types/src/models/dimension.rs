//! Per-dimension aggregates and the comparison rows derived from them

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Categorical axis of aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// Marketplace name
    Marketplace,
    /// Two-letter state code
    State,
    /// Category label (at the current drill level)
    Category,
    /// Product SKU
    Product,
}

impl Dimension {
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Marketplace => "marketplace",
            Dimension::State => "state",
            Dimension::Category => "category",
            Dimension::Product => "product",
        }
    }

    /// Column header for the identifier column
    pub fn header(&self) -> &'static str {
        match self {
            Dimension::Marketplace => "Marketplace",
            Dimension::State => "State",
            Dimension::Category => "Category",
            Dimension::Product => "SKU",
        }
    }
}

/// One dimension value's totals for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAggregate {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders_count: u64,
    /// `revenue / orders_count`, or 0 without orders
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_ticket: f64,
}

impl DimensionAggregate {
    /// Build an aggregate, deriving the average ticket
    pub fn new(id: impl Into<String>, revenue: f64, orders_count: u64) -> Self {
        let avg_ticket = if orders_count > 0 {
            revenue / orders_count as f64
        } else {
            0.0
        };

        Self {
            id: id.into(),
            revenue,
            orders_count,
            avg_ticket,
        }
    }
}

/// Current-vs-baseline row of a comparison table.
///
/// Derived on every recomputation, never persisted. A `None` delta means
/// "no comparison available" and is distinct from a 0% change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub id: String,
    pub revenue: f64,
    pub prev_revenue: f64,
    pub revenue_delta: Option<f64>,
    pub avg_ticket: f64,
    pub prev_avg_ticket: f64,
    pub ticket_delta: Option<f64>,
}

/// Flat category fact: one leaf of the category tree with its totals.
///
/// Drill-down narrows these by category / subcategory and regroups them by
/// the next level's label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryFact {
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subcategory: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub final_category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub orders_count: u64,
}
