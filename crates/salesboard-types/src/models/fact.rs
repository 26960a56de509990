//! Flat fact rows as delivered by the data-fetching layer.
//!
//! A fact row is a `(periodKey, bucket, value)` triple: one revenue (or count)
//! figure for one sub-period slot of one calendar period.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One `(period, bucket, value)` fact.
///
/// Rows are immutable once received. A missing or null `periodKey`
/// deserializes to an empty string, which never matches a real period and is
/// therefore ignored by the series builder. A missing or null `value` reads
/// as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactRow {
    /// Calendar period key ("YYYY-MM-DD" for days, "YYYY-MM" for months)
    #[serde(default, deserialize_with = "null_as_default")]
    pub period_key: String,
    /// Sub-period index (hour 0-23, or day-of-month 1-N)
    pub bucket: u32,
    /// Non-negative monetary or count amount
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: f64,
}

impl FactRow {
    pub fn new(period_key: impl Into<String>, bucket: u32, value: f64) -> Self {
        Self {
            period_key: period_key.into(),
            bucket,
            value,
        }
    }
}

/// Bucketing granularity of a period.
///
/// Hours are indexed from 0 (a day has buckets 0..=23), days from 1
/// (a month has buckets 1..=N).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Hourly buckets within a day
    Hour,
    /// Daily buckets within a month
    Day,
}

impl Granularity {
    /// Index of the first bucket
    pub fn first_bucket(&self) -> u32 {
        match self {
            Granularity::Hour => 0,
            Granularity::Day => 1,
        }
    }

    /// Position of `bucket` in a series of `bucket_count` slots, if in range
    pub fn position(&self, bucket: u32, bucket_count: usize) -> Option<usize> {
        let pos = bucket.checked_sub(self.first_bucket())? as usize;
        (pos < bucket_count).then_some(pos)
    }

    /// Bucket index stored at `position`
    pub fn bucket_at(&self, position: usize) -> u32 {
        self.first_bucket() + position as u32
    }

    /// Axis label for a bucket: "HH:00" for hours, zero-padded day otherwise
    pub fn label(&self, bucket: u32) -> String {
        match self {
            Granularity::Hour => format!("{:02}:00", bucket),
            Granularity::Day => format!("{:02}", bucket),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_positions_start_at_zero() {
        assert_eq!(Granularity::Hour.position(0, 24), Some(0));
        assert_eq!(Granularity::Hour.position(23, 24), Some(23));
        assert_eq!(Granularity::Hour.position(24, 24), None);
    }

    #[test]
    fn test_day_positions_start_at_one() {
        assert_eq!(Granularity::Day.position(0, 31), None);
        assert_eq!(Granularity::Day.position(1, 31), Some(0));
        assert_eq!(Granularity::Day.position(31, 31), Some(30));
        assert_eq!(Granularity::Day.position(31, 30), None);
    }

    #[test]
    fn test_labels_are_zero_padded() {
        assert_eq!(Granularity::Hour.label(7), "07:00");
        assert_eq!(Granularity::Hour.label(23), "23:00");
        assert_eq!(Granularity::Day.label(3), "03");
        assert_eq!(Granularity::Day.label(28), "28");
    }

    #[test]
    fn test_fact_row_missing_period_key_defaults_to_empty() {
        let row: FactRow = serde_json::from_str(r#"{"bucket": 3, "value": 10.5}"#).unwrap();
        assert_eq!(row.period_key, "");
        assert_eq!(row.bucket, 3);
    }

    #[test]
    fn test_fact_row_null_fields_read_as_defaults() {
        let row: FactRow =
            serde_json::from_str(r#"{"periodKey": null, "bucket": 3, "value": null}"#).unwrap();
        assert_eq!(row, FactRow::new("", 3, 0.0));
    }

    #[test]
    fn test_fact_row_camel_case() {
        let row: FactRow =
            serde_json::from_str(r#"{"periodKey": "2026-10-18", "bucket": 0, "value": 100}"#)
                .unwrap();
        assert_eq!(row, FactRow::new("2026-10-18", 0, 100.0));
    }
}
