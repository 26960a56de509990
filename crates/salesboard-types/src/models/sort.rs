//! Table sort state

use serde::{Deserialize, Serialize};

/// Sort direction of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    /// Dashboard default: most meaningful values first
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column and direction of a comparison table.
///
/// The key `"id"` sorts by the row identifier; any other key names a numeric
/// metric resolved by the caller's accessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    /// Key that selects identifier ordering instead of a metric
    pub const ID_KEY: &'static str = "id";

    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Descending sort on `key`
    pub fn by(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    pub fn is_id(&self) -> bool {
        self.key == Self::ID_KEY
    }

    /// Apply a header click: same key flips direction, a new key starts
    /// descending.
    pub fn toggle(&mut self, key: &str) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key.to_string();
            self.direction = SortDirection::Desc;
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        Self::by("revenue")
    }
}
