//! Calendar periods and their bucket layout
//!
//! A live-day view buckets one calendar day by hour; a month view buckets one
//! calendar month by day. Baselines are the same kind of period shifted back
//! by a fixed offset.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Timelike};
use salesboard_types::Granularity;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Calendar period analyzed by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    /// One calendar day, bucketed by hour
    Day(NaiveDate),
    /// One calendar month, bucketed by day
    Month { year: i32, month: u32 },
}

impl Period {
    /// Parse a period key: "YYYY-MM-DD" for a day, "YYYY-MM" for a month
    pub fn parse(key: &str) -> Result<Self, CoreError> {
        let key = key.trim();
        let invalid = || CoreError::InvalidPeriodKey {
            key: key.to_string(),
        };

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        if key.len() == 10 {
            if !key.split('-').all(digits) {
                return Err(invalid());
            }
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|_| invalid())?;
            return Ok(Period::Day(date));
        }

        let (year, month) = key.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 || !digits(year) || !digits(month) {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::month(year, month).ok_or_else(invalid)
    }

    /// Month period, if `month` is 1-12
    pub fn month(year: i32, month: u32) -> Option<Self> {
        (1..=12)
            .contains(&month)
            .then_some(Period::Month { year, month })
    }

    /// Canonical key as used in `FactRow.period_key`
    pub fn key(&self) -> String {
        match self {
            Period::Day(date) => date.format("%Y-%m-%d").to_string(),
            Period::Month { year, month } => format!("{:04}-{:02}", year, month),
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Period::Day(_) => Granularity::Hour,
            Period::Month { .. } => Granularity::Day,
        }
    }

    /// Number of buckets: 24 for a day, days-in-month for a month
    pub fn bucket_count(&self) -> usize {
        match self {
            Period::Day(_) => 24,
            Period::Month { year, month } => days_in_month(*year, *month) as usize,
        }
    }

    /// Same kind of period, `n` periods earlier
    pub fn shift_back(&self, n: u32) -> Self {
        match self {
            Period::Day(date) => Period::Day(
                date.checked_sub_days(Days::new(n as u64))
                    .unwrap_or(NaiveDate::MIN),
            ),
            Period::Month { year, month } => {
                let index = *year as i64 * 12 + (*month as i64 - 1) - n as i64;
                Period::Month {
                    year: index.div_euclid(12) as i32,
                    month: index.rem_euclid(12) as u32 + 1,
                }
            }
        }
    }

    /// Last elapsed bucket if `now` falls inside this period.
    ///
    /// The current hour for a day, the current day-of-month for a month.
    /// `None` means the period is not live (already completed or not started).
    pub fn live_cutoff(&self, now: NaiveDateTime) -> Option<u32> {
        match self {
            Period::Day(date) if now.date() == *date => Some(now.hour()),
            Period::Month { year, month } if now.year() == *year && now.month() == *month => {
                Some(now.day())
            }
            _ => None,
        }
    }

    pub fn is_live(&self, now: NaiveDateTime) -> bool {
        self.live_cutoff(now).is_some()
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl TryFrom<String> for Period {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Period::parse(&value)
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.key()
    }
}

/// Number of days in a calendar month
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(key: &str, hour: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(key, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(hour, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_day_and_month() {
        assert_eq!(
            Period::parse("2026-10-18").unwrap(),
            Period::Day(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
        );
        assert_eq!(
            Period::parse("2026-02").unwrap(),
            Period::Month {
                year: 2026,
                month: 2
            }
        );
    }

    #[test]
    fn test_parse_invalid() {
        for key in [
            "",
            "2026",
            "2026-13",
            "2026-1",
            "26-10",
            "2026-02-30",
            "today",
            "2026-+1",
            "+202-10",
            "2026-+1-18",
            "+202-10-18",
        ] {
            assert!(
                matches!(Period::parse(key), Err(CoreError::InvalidPeriodKey { .. })),
                "{key} should be rejected"
            );
        }
    }

    #[test]
    fn test_key_round_trip() {
        for key in ["2026-10-18", "2026-02", "1999-12"] {
            assert_eq!(Period::parse(key).unwrap().key(), key);
        }
    }

    #[test]
    fn test_bucket_counts() {
        assert_eq!(Period::parse("2026-10-18").unwrap().bucket_count(), 24);
        assert_eq!(Period::parse("2026-10").unwrap().bucket_count(), 31);
        assert_eq!(Period::parse("2026-04").unwrap().bucket_count(), 30);
        assert_eq!(Period::parse("2024-02").unwrap().bucket_count(), 29);
        assert_eq!(Period::parse("2026-02").unwrap().bucket_count(), 28);
        assert_eq!(Period::parse("2000-02").unwrap().bucket_count(), 29);
        assert_eq!(Period::parse("1900-02").unwrap().bucket_count(), 28);
    }

    #[test]
    fn test_shift_back_days() {
        let day = Period::parse("2026-10-01").unwrap();
        assert_eq!(day.shift_back(1).key(), "2026-09-30");
        assert_eq!(day.shift_back(7).key(), "2026-09-24");
        assert_eq!(day.shift_back(0), day);
    }

    #[test]
    fn test_shift_back_months_crosses_year() {
        let month = Period::parse("2026-01").unwrap();
        assert_eq!(month.shift_back(1).key(), "2025-12");
        assert_eq!(month.shift_back(12).key(), "2025-01");
        assert_eq!(month.shift_back(13).key(), "2024-12");
    }

    #[test]
    fn test_live_cutoff_day() {
        let day = Period::parse("2026-10-18").unwrap();
        assert_eq!(day.live_cutoff(at("2026-10-18", 13)), Some(13));
        assert_eq!(day.live_cutoff(at("2026-10-19", 1)), None);
        assert!(!day.is_live(at("2026-10-17", 23)));
    }

    #[test]
    fn test_live_cutoff_month() {
        let month = Period::parse("2026-10").unwrap();
        assert_eq!(month.live_cutoff(at("2026-10-18", 9)), Some(18));
        assert_eq!(month.live_cutoff(at("2026-11-01", 0)), None);
    }

    #[test]
    fn test_serde_as_key_string() {
        let period: Period = serde_json::from_str("\"2026-10\"").unwrap();
        assert_eq!(period.granularity(), Granularity::Day);
        assert_eq!(serde_json::to_string(&period).unwrap(), "\"2026-10\"");
        assert!(serde_json::from_str::<Period>("\"bogus\"").is_err());
    }
}
