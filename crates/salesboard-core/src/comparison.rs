//! Null-safe comparison of current figures against historical baselines
//!
//! A delta is `Option<f64>`: `None` means "no comparison available" (absent
//! or non-positive baseline) and must never be rendered as 0%.

use salesboard_types::{ComparisonRow, DimensionAggregate};
use std::collections::{BTreeMap, HashMap};

use crate::series::sanitize_value;

/// Number of periods between the current period and a baseline
pub type BaselineOffset = u32;

/// Signed relative change `(current - baseline) / baseline`.
///
/// Returns `None` when the baseline is not strictly positive. The ratio is
/// not multiplied by 100; percent formatting is a presentation concern.
pub fn pct_change(current: f64, baseline: f64) -> Option<f64> {
    let baseline = sanitize_value(baseline);
    if baseline <= 0.0 {
        return None;
    }
    let current = sanitize_value(current);
    Some((current - baseline) / baseline)
}

/// Left-join current aggregates with baseline aggregates on `id`.
///
/// Emits exactly one row per current aggregate, in input order. Ids present
/// only in the baseline are dropped; ids missing from the baseline get
/// `prev_revenue = 0` and null deltas. Revenue and ticket deltas are computed
/// independently. If the baseline repeats an id, its last entry is used.
pub fn build_comparison_rows(
    current: &[DimensionAggregate],
    baseline: &[DimensionAggregate],
) -> Vec<ComparisonRow> {
    let lookup: HashMap<&str, &DimensionAggregate> =
        baseline.iter().map(|b| (b.id.as_str(), b)).collect();

    current
        .iter()
        .map(|row| {
            let revenue = sanitize_value(row.revenue);
            let avg_ticket = sanitize_value(row.avg_ticket);
            let (prev_revenue, prev_avg_ticket) = lookup
                .get(row.id.as_str())
                .map(|b| (sanitize_value(b.revenue), sanitize_value(b.avg_ticket)))
                .unwrap_or((0.0, 0.0));

            ComparisonRow {
                id: row.id.clone(),
                revenue,
                prev_revenue,
                revenue_delta: pct_change(revenue, prev_revenue),
                avg_ticket,
                prev_avg_ticket,
                ticket_delta: pct_change(avg_ticket, prev_avg_ticket),
            }
        })
        .collect()
}

/// Fold `(id, revenue, orders)` lines into one aggregate per id.
///
/// Ids keep their first-seen order; revenue and orders are summed and the
/// average ticket is derived from the sums.
pub fn aggregate_by_id<I, S>(lines: I) -> Vec<DimensionAggregate>
where
    I: IntoIterator<Item = (S, f64, u64)>,
    S: Into<String>,
{
    let mut order: Vec<(String, f64, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (id, revenue, orders) in lines {
        let id = id.into();
        let revenue = sanitize_value(revenue);
        match index.get(&id) {
            Some(&i) => {
                order[i].1 += revenue;
                order[i].2 += orders;
            }
            None => {
                index.insert(id.clone(), order.len());
                order.push((id, revenue, orders));
            }
        }
    }

    order
        .into_iter()
        .map(|(id, revenue, orders)| DimensionAggregate::new(id, revenue, orders))
        .collect()
}

/// Grand total of a list of aggregates, with a re-derived average ticket
pub fn total_of(rows: &[DimensionAggregate], id: &str) -> DimensionAggregate {
    let revenue = rows.iter().map(|r| sanitize_value(r.revenue)).sum();
    let orders = rows.iter().map(|r| r.orders_count).sum();
    DimensionAggregate::new(id, revenue, orders)
}

/// Comparison rows for every offset of a baseline menu.
///
/// Rows are computed once per offset; switching the displayed baseline only
/// selects a precomputed set. Offsets without baseline data still produce
/// rows, with null deltas.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    rows_by_offset: BTreeMap<BaselineOffset, Vec<ComparisonRow>>,
}

impl ComparisonSet {
    pub fn build(
        current: &[DimensionAggregate],
        baselines: &BTreeMap<BaselineOffset, Vec<DimensionAggregate>>,
        menu: &[BaselineOffset],
    ) -> Self {
        let rows_by_offset = menu
            .iter()
            .map(|offset| {
                let baseline = baselines.get(offset).map(Vec::as_slice).unwrap_or(&[]);
                if baseline.is_empty() {
                    tracing::debug!("No baseline data {} periods back", offset);
                }
                (*offset, build_comparison_rows(current, baseline))
            })
            .collect();

        Self { rows_by_offset }
    }

    /// Rows compared against the baseline `offset` periods back
    pub fn rows(&self, offset: BaselineOffset) -> Option<&[ComparisonRow]> {
        self.rows_by_offset.get(&offset).map(Vec::as_slice)
    }

    /// Offsets available, ascending
    pub fn offsets(&self) -> impl Iterator<Item = BaselineOffset> + '_ {
        self.rows_by_offset.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows_by_offset.is_empty()
    }
}

/// Change of a KPI against one baseline
#[derive(Debug, Clone, PartialEq)]
pub struct KpiDelta {
    pub offset: BaselineOffset,
    pub prev_revenue: f64,
    pub revenue_delta: Option<f64>,
    pub prev_orders: u64,
    pub orders_delta: Option<f64>,
    pub prev_avg_ticket: f64,
    pub ticket_delta: Option<f64>,
}

/// Headline totals of the current period with one delta per baseline offset
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub revenue: f64,
    pub orders_count: u64,
    pub avg_ticket: f64,
    pub deltas: Vec<KpiDelta>,
}

impl KpiCard {
    pub fn build(
        current: &[DimensionAggregate],
        baselines: &BTreeMap<BaselineOffset, Vec<DimensionAggregate>>,
        menu: &[BaselineOffset],
    ) -> Self {
        let now = total_of(current, "total");

        let deltas = menu
            .iter()
            .map(|offset| {
                let prev = baselines
                    .get(offset)
                    .map(|rows| total_of(rows, "total"))
                    .unwrap_or_else(|| DimensionAggregate::new("total", 0.0, 0));

                KpiDelta {
                    offset: *offset,
                    prev_revenue: prev.revenue,
                    revenue_delta: pct_change(now.revenue, prev.revenue),
                    prev_orders: prev.orders_count,
                    orders_delta: pct_change(now.orders_count as f64, prev.orders_count as f64),
                    prev_avg_ticket: prev.avg_ticket,
                    ticket_delta: pct_change(now.avg_ticket, prev.avg_ticket),
                }
            })
            .collect();

        Self {
            revenue: now.revenue,
            orders_count: now.orders_count,
            avg_ticket: now.avg_ticket,
            deltas,
        }
    }

    pub fn delta(&self, offset: BaselineOffset) -> Option<&KpiDelta> {
        self.deltas.iter().find(|d| d.offset == offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(id: &str, revenue: f64, orders: u64) -> DimensionAggregate {
        DimensionAggregate::new(id, revenue, orders)
    }

    #[test]
    fn test_pct_change_basic() {
        assert_eq!(pct_change(150.0, 100.0), Some(0.5));
        assert_eq!(pct_change(50.0, 100.0), Some(-0.5));
        assert_eq!(pct_change(100.0, 100.0), Some(0.0));
    }

    #[test]
    fn test_pct_change_non_positive_baseline_is_none() {
        for x in [0.0, 1.0, 150.0, -3.0] {
            assert_eq!(pct_change(x, 0.0), None);
            assert_eq!(pct_change(x, -5.0), None);
        }
        assert_eq!(pct_change(10.0, f64::NAN), None);
        assert_eq!(pct_change(10.0, f64::INFINITY), None);
    }

    #[test]
    fn test_pct_change_invalid_current_counts_as_zero() {
        assert_eq!(pct_change(f64::NAN, 100.0), Some(-1.0));
    }

    #[test]
    fn test_rows_follow_current_list() {
        let current = vec![agg("Amazon", 300.0, 3), agg("Shopee", 100.0, 2)];
        let baseline = vec![agg("Shopee", 200.0, 4), agg("Magalu", 999.0, 9)];
        let rows = build_comparison_rows(&current, &baseline);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "Amazon");
        assert_eq!(rows[0].prev_revenue, 0.0);
        assert_eq!(rows[0].revenue_delta, None);
        assert_eq!(rows[0].ticket_delta, None);
        assert_eq!(rows[1].id, "Shopee");
        assert_eq!(rows[1].revenue_delta, Some(-0.5));
        assert_eq!(rows[1].ticket_delta, Some(0.0));
        assert!(rows.iter().all(|r| r.id != "Magalu"));
    }

    #[test]
    fn test_revenue_and_ticket_deltas_are_independent() {
        let current = vec![agg("SP", 100.0, 1)];
        let baseline = vec![agg("SP", 50.0, 0)];
        let rows = build_comparison_rows(&current, &baseline);
        assert_eq!(rows[0].revenue_delta, Some(1.0));
        assert_eq!(rows[0].ticket_delta, None);
    }

    #[test]
    fn test_aggregate_by_id_sums_in_first_seen_order() {
        let aggs = aggregate_by_id(vec![
            ("ML", 100.0, 1),
            ("Amazon", 50.0, 1),
            ("ML", 300.0, 3),
        ]);
        assert_eq!(aggs.len(), 2);
        assert_eq!(aggs[0], agg("ML", 400.0, 4));
        assert_eq!(aggs[0].avg_ticket, 100.0);
        assert_eq!(aggs[1].id, "Amazon");
    }

    #[test]
    fn test_comparison_set_per_offset() {
        let current = vec![agg("ML", 200.0, 2)];
        let mut baselines = BTreeMap::new();
        baselines.insert(1, vec![agg("ML", 100.0, 1)]);
        baselines.insert(7, vec![agg("ML", 400.0, 2)]);

        let set = ComparisonSet::build(&current, &baselines, &[1, 7, 28]);
        assert_eq!(set.offsets().collect::<Vec<_>>(), vec![1, 7, 28]);
        assert_eq!(set.rows(1).unwrap()[0].revenue_delta, Some(1.0));
        assert_eq!(set.rows(7).unwrap()[0].revenue_delta, Some(-0.5));
        assert_eq!(set.rows(28).unwrap()[0].revenue_delta, None);
        assert!(set.rows(2).is_none());
    }

    #[test]
    fn test_kpi_card_totals_and_deltas() {
        let current = vec![agg("ML", 300.0, 3), agg("Amazon", 100.0, 1)];
        let mut baselines = BTreeMap::new();
        baselines.insert(1, vec![agg("ML", 200.0, 2)]);

        let card = KpiCard::build(&current, &baselines, &[1, 7]);
        assert_eq!(card.revenue, 400.0);
        assert_eq!(card.orders_count, 4);
        assert_eq!(card.avg_ticket, 100.0);

        let day = card.delta(1).unwrap();
        assert_eq!(day.revenue_delta, Some(1.0));
        assert_eq!(day.orders_delta, Some(1.0));
        assert_eq!(day.ticket_delta, Some(0.0));

        let week = card.delta(7).unwrap();
        assert_eq!(week.revenue_delta, None);
        assert_eq!(week.prev_revenue, 0.0);
    }
}
