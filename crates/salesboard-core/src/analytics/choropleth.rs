//! State-level choropleth coloring

use salesboard_types::DimensionAggregate;
use std::collections::BTreeMap;

use crate::color::{color_for, Palette};
use crate::series::sanitize_value;

/// Fill color per region id, scaled to the largest revenue
#[derive(Debug, Clone, PartialEq)]
pub struct ChoroplethView {
    pub domain_max: f64,
    pub colors: BTreeMap<String, String>,
    unknown: String,
}

impl ChoroplethView {
    pub fn compute(rows: &[DimensionAggregate], palette: &Palette) -> Self {
        let domain_max = rows
            .iter()
            .map(|r| sanitize_value(r.revenue))
            .fold(0.0, f64::max);

        let colors = rows
            .iter()
            .map(|r| {
                let color = color_for(Some(r.revenue), domain_max, palette);
                (r.id.clone(), color.to_string())
            })
            .collect();

        Self {
            domain_max,
            colors,
            unknown: palette.unknown.clone(),
        }
    }

    /// Color of a region; regions without data get the unknown color
    pub fn color_of(&self, id: &str) -> &str {
        self.colors.get(id).map(String::as_str).unwrap_or(self.unknown.as_str())
    }
}
