//! Bucketed series builder
//!
//! Turns flat `(periodKey, bucket, value)` fact rows into a dense, zero-filled
//! series over every bucket of one period. Hourly (live-day) and daily
//! (month) views share this builder and differ only in granularity.

use salesboard_types::{BucketedSeries, FactRow, Granularity};

use crate::period::Period;

/// What the builder did with its input rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Rows written into a bucket
    pub rows_matched: usize,
    /// Rows ignored because their period key was missing or foreign
    pub rows_other_period: usize,
    /// Rows ignored because their bucket is outside the period
    pub rows_out_of_range: usize,
    /// Rows that overwrote an earlier row for the same bucket
    pub duplicates_overwritten: usize,
    /// Rows whose value was non-finite or negative and stored as 0
    pub values_sanitized: usize,
}

impl BuildReport {
    pub fn has_degradations(&self) -> bool {
        self.rows_out_of_range > 0 || self.duplicates_overwritten > 0 || self.values_sanitized > 0
    }
}

/// Clamp a raw input value to a finite, non-negative number
pub fn sanitize_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Build a zero-filled series of `bucket_count` slots for `period_key`.
///
/// Rows for other periods, rows without a period key and rows outside the
/// bucket range are ignored. When several rows target the same bucket the
/// last one wins: callers are expected to pre-aggregate, and the builder does
/// not sum duplicates.
pub fn build(
    rows: &[FactRow],
    period_key: &str,
    bucket_count: usize,
    granularity: Granularity,
) -> BucketedSeries {
    build_with_report(rows, period_key, bucket_count, granularity).0
}

/// Same as [`build`], sized and labelled from a [`Period`]
pub fn build_for(rows: &[FactRow], period: &Period) -> BucketedSeries {
    build(rows, &period.key(), period.bucket_count(), period.granularity())
}

/// [`build`] plus a report of ignored and degraded rows
pub fn build_with_report(
    rows: &[FactRow],
    period_key: &str,
    bucket_count: usize,
    granularity: Granularity,
) -> (BucketedSeries, BuildReport) {
    let mut series = BucketedSeries::zeroed(granularity, bucket_count);
    let mut written = vec![false; bucket_count];
    let mut report = BuildReport::default();

    for row in rows {
        if row.period_key.is_empty() || row.period_key != period_key {
            report.rows_other_period += 1;
            continue;
        }

        let Some(pos) = granularity.position(row.bucket, bucket_count) else {
            tracing::debug!(
                "Fact row for {} has bucket {} outside 0..{}, skipping",
                period_key,
                row.bucket,
                bucket_count
            );
            report.rows_out_of_range += 1;
            continue;
        };

        let value = sanitize_value(row.value);
        if value != row.value {
            report.values_sanitized += 1;
        }
        if written[pos] {
            report.duplicates_overwritten += 1;
        }

        written[pos] = true;
        series.points[pos].value = value;
        report.rows_matched += 1;
    }

    if report.duplicates_overwritten > 0 {
        tracing::debug!(
            "{} duplicate fact rows for {} overwritten (last write wins)",
            report.duplicates_overwritten,
            period_key
        );
    }

    (series, report)
}
