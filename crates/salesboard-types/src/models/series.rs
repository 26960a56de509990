//! Dense, fixed-length bucketed series

use serde::{Deserialize, Serialize};

use super::fact::Granularity;

/// One slot of a bucketed series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Bucket index (hour or day-of-month)
    pub bucket: u32,
    /// Axis label ("HH:00" or "DD")
    pub label: String,
    /// Finite, non-negative value
    pub value: f64,
}

/// Ordered, zero-filled series covering every bucket of one period.
///
/// The length depends only on the period (24 for a day, days-in-month for a
/// month), never on how many fact rows were supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketedSeries {
    pub granularity: Granularity,
    pub points: Vec<SeriesPoint>,
}

impl BucketedSeries {
    /// Series of `bucket_count` zero-valued slots
    pub fn zeroed(granularity: Granularity, bucket_count: usize) -> Self {
        let points = (0..bucket_count)
            .map(|pos| {
                let bucket = granularity.bucket_at(pos);
                SeriesPoint {
                    bucket,
                    label: granularity.label(bucket),
                    value: 0.0,
                }
            })
            .collect();

        Self {
            granularity,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value stored for `bucket`, if the bucket is in range
    pub fn value_at(&self, bucket: u32) -> Option<f64> {
        let pos = self.granularity.position(bucket, self.points.len())?;
        Some(self.points[pos].value)
    }

    /// Mutable slot for `bucket`, if the bucket is in range
    pub fn slot_mut(&mut self, bucket: u32) -> Option<&mut SeriesPoint> {
        let pos = self.granularity.position(bucket, self.points.len())?;
        self.points.get_mut(pos)
    }

    /// Values in bucket order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Sum of all values
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Index of the last bucket
    pub fn last_bucket(&self) -> Option<u32> {
        self.points.last().map(|p| p.bucket)
    }
}
