//! Snapshot of collaborator data for one filter context
//!
//! The data-fetching layer delivers fact rows and per-dimension aggregates
//! for the current period and its baselines. A snapshot freezes one such
//! delivery as JSON so views can be recomputed offline.

use salesboard_types::{CategoryFact, Dimension, DimensionAggregate, FactRow};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::comparison::BaselineOffset;
use crate::error::{CoreError, INLINE_SOURCE};
use crate::period::Period;
use crate::series::sanitize_value;

/// Aggregates of one dimension for the current period and its baselines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionSnapshot {
    pub dimension: Dimension,
    #[serde(default)]
    pub current: Vec<DimensionAggregate>,
    /// Baseline aggregates keyed by offset (periods back)
    #[serde(default)]
    pub baselines: BTreeMap<BaselineOffset, Vec<DimensionAggregate>>,
}

/// Everything one analytics page receives for one filter context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Period being analyzed
    pub period: Period,
    /// Whether the period is still in progress
    #[serde(default)]
    pub is_live: bool,
    /// Last elapsed bucket when live
    #[serde(default)]
    pub cutoff_bucket: u32,
    /// Upstream forecast of the live period's final total
    #[serde(default)]
    pub projected_total: f64,
    /// Completed period whose curve shapes the projection
    #[serde(default)]
    pub reference_period: Option<Period>,
    /// Fact rows for the period and the reference period
    #[serde(default)]
    pub facts: Vec<FactRow>,
    #[serde(default)]
    pub dimensions: Vec<DimensionSnapshot>,
    /// Category leaves of the current period
    #[serde(default)]
    pub category_facts: Vec<CategoryFact>,
    /// Category leaves of baseline periods, keyed by offset
    #[serde(default)]
    pub category_baselines: BTreeMap<BaselineOffset, Vec<CategoryFact>>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let snapshot = Self::from_json_str(&content).map_err(|e| match e {
            CoreError::JsonParse {
                message, source, ..
            } => CoreError::JsonParse {
                path: path.to_path_buf(),
                message,
                source,
            },
            other => other,
        })?;

        tracing::info!(
            "Loaded snapshot for {} ({} facts, {} dimensions, {} category facts)",
            snapshot.period,
            snapshot.facts.len(),
            snapshot.dimensions.len(),
            snapshot.category_facts.len()
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON text and normalize its aggregates
    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        let mut snapshot: Self =
            serde_json::from_str(content).map_err(|e| CoreError::JsonParse {
                path: PathBuf::from(INLINE_SOURCE),
                message: e.to_string(),
                source: e,
            })?;
        snapshot.normalize();
        Ok(snapshot)
    }

    /// Aggregates of `dimension`, if the snapshot carries them
    pub fn dimension(&self, dimension: Dimension) -> Option<&DimensionSnapshot> {
        self.dimensions.iter().find(|d| d.dimension == dimension)
    }

    /// Clamp revenues and re-derive average tickets from revenue and orders
    fn normalize(&mut self) {
        let fix = |agg: &mut DimensionAggregate| {
            *agg = DimensionAggregate::new(
                std::mem::take(&mut agg.id),
                sanitize_value(agg.revenue),
                agg.orders_count,
            );
        };

        for dim in &mut self.dimensions {
            dim.current.iter_mut().for_each(fix);
            dim.baselines.values_mut().flatten().for_each(fix);
        }
    }
}
