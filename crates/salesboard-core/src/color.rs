//! Choropleth color quantization
//!
//! Splits `[0, domain_max]` into equal-width buckets, one per palette entry.

use serde::{Deserialize, Serialize};

use crate::series::sanitize_value;

/// Ordered sequential palette plus the color used for "no data"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Colors from lowest to highest bucket
    pub colors: Vec<String>,
    /// Color for regions without data (not part of the scale)
    pub unknown: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: ["#dbeafe", "#93c5fd", "#3b82f6", "#1d4ed8", "#1e3a8a"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            unknown: "#e5e7eb".to_string(),
        }
    }
}

/// Bucket of `value` among `buckets` equal-width slices of `[0, domain_max]`.
///
/// Values at or above `domain_max` land in the last bucket; a non-positive
/// domain puts everything in the first one.
pub fn bucket_index(value: f64, domain_max: f64, buckets: usize) -> Option<usize> {
    if buckets == 0 {
        return None;
    }
    let value = sanitize_value(value);
    let domain_max = sanitize_value(domain_max);
    if domain_max <= 0.0 {
        return Some(0);
    }

    let idx = ((value / domain_max) * buckets as f64).floor() as usize;
    Some(idx.min(buckets - 1))
}

/// Palette color for `value`; `None` (no data) maps to the unknown color
pub fn color_for(value: Option<f64>, domain_max: f64, palette: &Palette) -> &str {
    value
        .and_then(|v| bucket_index(v, domain_max, palette.colors.len()))
        .and_then(|idx| palette.colors.get(idx))
        .map(String::as_str)
        .unwrap_or(palette.unknown.as_str())
}
