//! Projection of an in-progress period to completion
//!
//! Elapsed buckets keep their actual values. The remaining buckets follow the
//! shape of a completed reference period, scaled so the reference curve sums
//! to the projected total. Actuals and projection form one continuous series,
//! so the chart can draw "actual up to now, dashed beyond" without special
//! cases.

use salesboard_types::BucketedSeries;

use crate::series::sanitize_value;

/// Project `actual_so_far` beyond `cutoff_bucket`.
///
/// - Buckets `<= cutoff_bucket` copy the actual value exactly.
/// - Buckets `> cutoff_bucket` take `reference[bucket] * projected_total /
///   sum(reference)`; a reference that sums to 0 yields a flat zero tail.
/// - Reference buckets missing from a shorter reference period count as 0.
///
/// The output has the length and labels of `actual_so_far` and never holds a
/// non-finite value. Only meaningful for live periods; completed periods use
/// their actual total directly.
pub fn project(
    actual_so_far: &BucketedSeries,
    reference: &BucketedSeries,
    projected_total: f64,
    cutoff_bucket: u32,
) -> BucketedSeries {
    let reference_sum: f64 = reference.points.iter().map(|p| sanitize_value(p.value)).sum();
    let target = sanitize_value(projected_total);

    let scale = if reference_sum > 0.0 {
        target / reference_sum
    } else {
        tracing::debug!("Reference series sums to zero, projecting a flat tail");
        0.0
    };

    let mut projected = actual_so_far.clone();
    for point in projected.points.iter_mut() {
        if point.bucket <= cutoff_bucket {
            continue;
        }
        let reference_value = reference
            .value_at(point.bucket)
            .map(sanitize_value)
            .unwrap_or(0.0);
        point.value = sanitize_value(reference_value * scale);
    }

    projected
}

/// Sum of actual values up to and including `cutoff_bucket`
pub fn elapsed_total(actual: &BucketedSeries, cutoff_bucket: u32) -> f64 {
    actual
        .points
        .iter()
        .filter(|p| p.bucket <= cutoff_bucket)
        .map(|p| p.value)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_types::Granularity;

    fn hourly(values: &[f64]) -> BucketedSeries {
        let mut series = BucketedSeries::zeroed(Granularity::Hour, 24);
        for (point, value) in series.points.iter_mut().zip(values) {
            point.value = *value;
        }
        series
    }

    #[test]
    fn test_elapsed_buckets_match_actuals() {
        let actual = hourly(&[100.0, 200.0, 50.0]);
        let reference = hourly(&[10.0; 24]);
        let projected = project(&actual, &reference, 1000.0, 2);

        for bucket in 0..=2 {
            assert_eq!(projected.value_at(bucket), actual.value_at(bucket));
        }
    }

    #[test]
    fn test_tail_follows_scaled_reference() {
        let actual = hourly(&[100.0, 200.0]);
        let reference = hourly(&[100.0; 24]);
        let projected = project(&actual, &reference, 4800.0, 1);

        assert_eq!(projected.value_at(2), Some(200.0));
        assert_eq!(projected.value_at(23), Some(200.0));
    }

    #[test]
    fn test_zero_reference_gives_flat_zero_tail() {
        let actual = hourly(&[5.0, 5.0, 5.0]);
        let reference = hourly(&[]);
        let projected = project(&actual, &reference, 4800.0, 2);

        for bucket in 3..24 {
            assert_eq!(projected.value_at(bucket), Some(0.0));
        }
        assert!(projected.values().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_non_finite_target_is_treated_as_zero() {
        let actual = hourly(&[1.0]);
        let reference = hourly(&[1.0; 24]);
        let projected = project(&actual, &reference, f64::NAN, 0);
        assert_eq!(projected.value_at(0), Some(1.0));
        assert_eq!(projected.value_at(1), Some(0.0));
    }

    #[test]
    fn test_shorter_reference_month_pads_with_zero() {
        let mut actual = BucketedSeries::zeroed(Granularity::Day, 31);
        actual.points[0].value = 10.0;
        let mut reference = BucketedSeries::zeroed(Granularity::Day, 30);
        for point in reference.points.iter_mut() {
            point.value = 1.0;
        }

        let projected = project(&actual, &reference, 300.0, 1);
        assert_eq!(projected.len(), 31);
        assert_eq!(projected.value_at(1), Some(10.0));
        assert_eq!(projected.value_at(2), Some(10.0));
        assert_eq!(projected.value_at(31), Some(0.0));
    }

    #[test]
    fn test_cutoff_past_end_keeps_all_actuals() {
        let actual = hourly(&[3.0; 24]);
        let reference = hourly(&[1.0; 24]);
        let projected = project(&actual, &reference, 999.0, 23);
        assert_eq!(projected, actual);
    }

    #[test]
    fn test_elapsed_total() {
        let actual = hourly(&[100.0, 200.0, 300.0]);
        assert_eq!(elapsed_total(&actual, 1), 300.0);
        assert_eq!(elapsed_total(&actual, 23), 600.0);
    }
}
