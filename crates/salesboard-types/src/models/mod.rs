//! Data models for salesboard

pub mod dimension;
pub mod drill;
pub mod fact;
pub mod series;
pub mod sort;

pub use dimension::{CategoryFact, ComparisonRow, Dimension, DimensionAggregate};
pub use drill::{DrillLevel, DrillState};
pub use fact::{FactRow, Granularity};
pub use series::{BucketedSeries, SeriesPoint};
pub use sort::{SortDirection, SortState};

use serde::{Deserialize, Deserializer};

/// Read an explicit JSON `null` as the field's default, like an absent field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
