//! Category drill-down context

use serde::{Deserialize, Serialize};

/// Depth of the category drill-down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillLevel {
    /// Top level: rows are categories
    #[default]
    Category,
    /// Rows are subcategories of the selected category
    Subcategory,
    /// Rows are final categories of the selected subcategory (terminal)
    Final,
}

/// Filter context of the category drill-down.
///
/// Holds no data: only the selection that scopes the next fetch. Created at
/// the category level with empty selections.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrillState {
    pub level: DrillLevel,
    pub category: String,
    pub subcategory: String,
}
