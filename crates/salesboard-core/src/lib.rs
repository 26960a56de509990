//! salesboard-core - Core library for salesboard
//!
//! Turns flat marketplace fact rows into bucketed series, projects the live
//! period to completion, compares dimensions against historical baselines and
//! drives the category drill-down and table ordering of the analytics views.

pub mod analytics;
pub mod color;
pub mod comparison;
pub mod config;
pub mod drill;
pub mod error;
pub mod guard;
pub mod period;
pub mod projection;
pub mod series;
pub mod snapshot;
pub mod sort;

pub use salesboard_types as types;

pub use color::{color_for, Palette};
pub use comparison::{build_comparison_rows, pct_change, ComparisonSet, KpiCard};
pub use config::EngineConfig;
pub use drill::{Breadcrumb, DrillAction};
pub use error::CoreError;
pub use guard::{RequestGuard, RequestTicket};
pub use period::Period;
pub use projection::project;
pub use series::{build, build_with_report, BuildReport};
pub use snapshot::Snapshot;
pub use sort::{sort_rows, SortableRow};
