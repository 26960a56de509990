//! Dimension comparison tables (marketplace, state, category, product)

use salesboard_types::{ComparisonRow, Dimension, DimensionAggregate, SortState};
use std::collections::BTreeMap;

use crate::comparison::{BaselineOffset, ComparisonSet, KpiCard};
use crate::sort::sorted;

/// Immutable input of one dimension table
#[derive(Debug, Clone, Copy)]
pub struct DimensionInput<'a> {
    pub dimension: Dimension,
    pub current: &'a [DimensionAggregate],
    pub baselines: &'a BTreeMap<BaselineOffset, Vec<DimensionAggregate>>,
}

/// Comparison table of one dimension, with baseline selection and sorting.
///
/// Rows for every baseline of the menu are computed once; selecting a
/// baseline or a sort column only changes which precomputed rows are shown
/// and in which order.
#[derive(Debug, Clone)]
pub struct DimensionTable {
    pub dimension: Dimension,
    pub kpi: KpiCard,
    comparisons: ComparisonSet,
    selected: BaselineOffset,
    sort: SortState,
}

impl DimensionTable {
    /// Compute the table for `menu`; the first offset is selected initially
    pub fn compute(input: &DimensionInput<'_>, menu: &[BaselineOffset], sort: SortState) -> Self {
        Self {
            dimension: input.dimension,
            kpi: KpiCard::build(input.current, input.baselines, menu),
            comparisons: ComparisonSet::build(input.current, input.baselines, menu),
            selected: menu.first().copied().unwrap_or(1),
            sort,
        }
    }

    pub fn selected_baseline(&self) -> BaselineOffset {
        self.selected
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Show the baseline `offset` periods back. Returns false (and keeps the
    /// current selection) if the offset is not on the menu.
    pub fn select_baseline(&mut self, offset: BaselineOffset) -> bool {
        if self.comparisons.rows(offset).is_none() {
            return false;
        }
        self.selected = offset;
        true
    }

    /// Header click on `key`
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort.toggle(key);
    }

    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Rows against the selected baseline, in display order
    pub fn rows(&self) -> Vec<ComparisonRow> {
        self.comparisons
            .rows(self.selected)
            .map(|rows| sorted(rows, &self.sort))
            .unwrap_or_default()
    }

    pub fn offsets(&self) -> Vec<BaselineOffset> {
        self.comparisons.offsets().collect()
    }
}
