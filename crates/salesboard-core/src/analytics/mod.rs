//! Analytics view models
//!
//! Composes the engine into the view models of the live-day and month
//! dashboards. Every view is an explicit pure function of an immutable input
//! snapshot; callers decide when to recompute (typically after each fetch
//! for a new filter context).

use chrono::{DateTime, Utc};
use salesboard_types::{CategoryFact, Dimension, DrillState, SortState};
use std::collections::BTreeMap;

use crate::comparison::BaselineOffset;
use crate::config::EngineConfig;
use crate::drill::{Breadcrumb, DrillNavigation};
use crate::snapshot::Snapshot;

pub mod choropleth;
pub mod series_view;
pub mod table;


pub use choropleth::ChoroplethView;
pub use series_view::{SeriesInput, SeriesView};
pub use table::{DimensionInput, DimensionTable};

/// Category drill-down table with its breadcrumb trail
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub drill: DrillState,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub table: DimensionTable,
}

impl CategoryView {
    /// Scope current and baseline category facts to `drill` and compare them
    pub fn compute(
        drill: &DrillState,
        facts: &[CategoryFact],
        baselines: &BTreeMap<BaselineOffset, Vec<CategoryFact>>,
        menu: &[BaselineOffset],
        sort: SortState,
        root_label: &str,
    ) -> Self {
        let current = drill.scope(facts);
        let scoped_baselines: BTreeMap<BaselineOffset, _> = baselines
            .iter()
            .map(|(offset, rows)| (*offset, drill.scope(rows)))
            .collect();

        let input = DimensionInput {
            dimension: Dimension::Category,
            current: &current,
            baselines: &scoped_baselines,
        };

        Self {
            drill: drill.clone(),
            breadcrumbs: drill.breadcrumbs(root_label),
            table: DimensionTable::compute(&input, menu, sort),
        }
    }
}

/// Complete dashboard for one snapshot
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub series: SeriesView,
    /// One table per dimension carried by the snapshot, in snapshot order
    pub tables: Vec<DimensionTable>,
    /// Present when the snapshot carries category facts
    pub categories: Option<CategoryView>,
    /// Present when the snapshot carries state aggregates
    pub choropleth: Option<ChoroplethView>,
    /// Timestamp of computation
    pub computed_at: DateTime<Utc>,
}

impl DashboardView {
    /// Compute every view of a snapshot (sync).
    ///
    /// The baseline menu follows the period's granularity: days back for a
    /// live-day snapshot, months back for a month snapshot.
    pub fn compute(snapshot: &Snapshot, drill: &DrillState, config: &EngineConfig) -> Self {
        let menu = config.baselines_for(snapshot.period.granularity());
        let sort = SortState::by(config.default_sort_key.clone());

        let series = SeriesView::compute(&SeriesInput {
            period: snapshot.period,
            facts: &snapshot.facts,
            reference_period: snapshot.reference_period,
            reference_facts: None,
            is_live: snapshot.is_live,
            cutoff_bucket: snapshot.cutoff_bucket,
            projected_total: snapshot.projected_total,
        });

        let tables = snapshot
            .dimensions
            .iter()
            .map(|dim| {
                let input = DimensionInput {
                    dimension: dim.dimension,
                    current: &dim.current,
                    baselines: &dim.baselines,
                };
                DimensionTable::compute(&input, menu, sort.clone())
            })
            .collect();

        let categories = (!snapshot.category_facts.is_empty()).then(|| {
            CategoryView::compute(
                drill,
                &snapshot.category_facts,
                &snapshot.category_baselines,
                menu,
                sort.clone(),
                &config.root_crumb_label,
            )
        });

        let choropleth = snapshot
            .dimension(Dimension::State)
            .map(|dim| ChoroplethView::compute(&dim.current, &config.palette));

        Self {
            series,
            tables,
            categories,
            choropleth,
            computed_at: Utc::now(),
        }
    }

    /// Table of `dimension`, if the snapshot carried it
    pub fn table(&self, dimension: Dimension) -> Option<&DimensionTable> {
        self.tables.iter().find(|t| t.dimension == dimension)
    }

    pub fn table_mut(&mut self, dimension: Dimension) -> Option<&mut DimensionTable> {
        self.tables.iter_mut().find(|t| t.dimension == dimension)
    }
}
