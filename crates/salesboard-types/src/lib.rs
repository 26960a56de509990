//! salesboard-types - Shared data types for salesboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No I/O, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - salesboard-core (aggregation, projection and comparison engine)
//! - salesboard (command-line front end)

pub mod models;

// Re-export model types
pub use models::{
    BucketedSeries, CategoryFact, ComparisonRow, Dimension, DimensionAggregate, DrillLevel,
    DrillState, FactRow, Granularity, SeriesPoint, SortDirection, SortState,
};
