//! Series view: actual curve, projection and headline total of one period

use salesboard_types::{BucketedSeries, FactRow};

use crate::comparison::pct_change;
use crate::period::Period;
use crate::projection::{elapsed_total, project};
use crate::series::{build_with_report, sanitize_value, BuildReport};

/// Immutable input snapshot of a series view
#[derive(Debug, Clone)]
pub struct SeriesInput<'a> {
    pub period: Period,
    /// Facts for `period` (and possibly the reference period)
    pub facts: &'a [FactRow],
    /// Completed comparable period shaping the projection
    pub reference_period: Option<Period>,
    /// Facts for the reference period; defaults to `facts` when `None`
    pub reference_facts: Option<&'a [FactRow]>,
    /// Whether `period` is still in progress
    pub is_live: bool,
    /// Last elapsed bucket of a live period
    pub cutoff_bucket: u32,
    /// Upstream forecast of the live period's final total
    pub projected_total: f64,
}

/// Chart-ready series of one period
#[derive(Debug, Clone)]
pub struct SeriesView {
    pub period: Period,
    /// Actual values, zero-filled
    pub actual: BucketedSeries,
    /// Reference period values, when a reference was given
    pub reference: Option<BucketedSeries>,
    /// Actual up to the cutoff, scaled reference beyond (live periods only)
    pub projection: Option<BucketedSeries>,
    /// Sum of actual values up to the cutoff (whole period when completed)
    pub total_to_date: f64,
    /// Headline total: the projected total when live, the actual total otherwise
    pub display_total: f64,
    /// Change of the total-to-date against the reference at the same cutoff
    pub reference_delta: Option<f64>,
    /// Rows ignored or degraded while building `actual`
    pub report: BuildReport,
}

impl SeriesView {
    /// Build the view from one input snapshot (pure, sync)
    pub fn compute(input: &SeriesInput<'_>) -> Self {
        let period = input.period;
        let (actual, report) = build_with_report(
            input.facts,
            &period.key(),
            period.bucket_count(),
            period.granularity(),
        );

        let reference = input.reference_period.map(|reference_period| {
            let facts = input.reference_facts.unwrap_or(input.facts);
            build_with_report(
                facts,
                &reference_period.key(),
                reference_period.bucket_count(),
                reference_period.granularity(),
            )
            .0
        });

        let (projection, total_to_date, display_total, reference_delta) = if input.is_live {
            let reference_curve = reference
                .clone()
                .unwrap_or_else(|| BucketedSeries::zeroed(actual.granularity, actual.len()));
            let projection = project(
                &actual,
                &reference_curve,
                input.projected_total,
                input.cutoff_bucket,
            );
            let to_date = elapsed_total(&actual, input.cutoff_bucket);
            let delta = reference
                .as_ref()
                .and_then(|r| pct_change(to_date, elapsed_total(r, input.cutoff_bucket)));
            (
                Some(projection),
                to_date,
                sanitize_value(input.projected_total),
                delta,
            )
        } else {
            let total = actual.total();
            let delta = reference.as_ref().and_then(|r| pct_change(total, r.total()));
            (None, total, total, delta)
        };

        if report.has_degradations() {
            tracing::debug!("Series for {} built with degradations: {:?}", period, report);
        }

        Self {
            period,
            actual,
            reference,
            projection,
            total_to_date,
            display_total,
            reference_delta,
            report,
        }
    }
}
