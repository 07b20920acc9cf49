//! Calendar period types used throughout the engine.
//!
//! Every series in the pipeline is keyed by either a [`Month`] (`YYYY-MM`) or a
//! [`Quarter`] (`YYYY-QN`). Both are small `Copy` value types whose `Ord`
//! implementation is chronological, so a `BTreeMap` keyed by them is always a
//! time-ordered series with unique periods.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{DisplacementError, Result};

/// Sparse monthly series. A missing key means "no data", never zero.
pub type MonthlySeries = BTreeMap<Month, f64>;

/// Sparse quarterly series.
pub type QuarterlySeries = BTreeMap<Quarter, f64>;

/// A calendar month.
///
/// # Example
///
/// ```
/// use displacement_traits::Month;
///
/// let month: Month = "2024-03".parse().unwrap();
/// assert_eq!(month.year(), 2024);
/// assert_eq!(month.quarter().to_string(), "2024-Q1");
/// assert_eq!(month.succ().to_string(), "2024-04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, rejecting month numbers outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(DisplacementError::InvalidPeriod(format!(
                "month {month} out of range in {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// Creates a month in a constant context.
    ///
    /// An out-of-range month number fails compilation when used to
    /// initialize a `const`.
    pub const fn from_parts(year: i32, month: u32) -> Self {
        assert!(month >= 1 && month <= 12, "month out of range");
        Self { year, month }
    }

    /// Returns the calendar year.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1-12).
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns the quarter containing this month.
    pub const fn quarter(&self) -> Quarter {
        Quarter {
            year: self.year,
            quarter: (self.month - 1) / 3 + 1,
        }
    }

    /// Returns the following month.
    pub const fn succ(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Leniently parses a date key as found in collector documents.
    ///
    /// Accepts `YYYY-MM` and `YYYY-MM-DD` (the day is ignored). Returns `None`
    /// for anything else so callers can skip the point.
    pub fn parse_key(key: &str) -> Option<Self> {
        let mut parts = key.trim().splitn(3, '-');
        let year = parts.next()?.parse::<i32>().ok()?;
        let month = parts.next()?.parse::<u32>().ok()?;
        Self::new(year, month).ok()
    }

    /// Returns every month from `start` to `end`, both inclusive.
    ///
    /// Returns an empty vector when `start > end`.
    pub fn range_inclusive(start: Self, end: Self) -> Vec<Self> {
        let mut months = Vec::new();
        let mut current = start;
        while current <= end {
            months.push(current);
            current = current.succ();
        }
        months
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = DisplacementError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DisplacementError::InvalidPeriod(format!("expected YYYY-MM, got '{s}'"));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A calendar quarter.
///
/// # Example
///
/// ```
/// use displacement_traits::Quarter;
///
/// let quarter: Quarter = "2024-Q2".parse().unwrap();
/// let months: Vec<String> = quarter.months().iter().map(|m| m.to_string()).collect();
/// assert_eq!(months, ["2024-04", "2024-05", "2024-06"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quarter {
    year: i32,
    quarter: u32,
}

impl Quarter {
    /// Creates a quarter, rejecting quarter numbers outside `1..=4`.
    pub fn new(year: i32, quarter: u32) -> Result<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(DisplacementError::InvalidPeriod(format!(
                "quarter {quarter} out of range in {year}"
            )));
        }
        Ok(Self { year, quarter })
    }

    /// Returns the calendar year.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the quarter number (1-4).
    pub const fn quarter(&self) -> u32 {
        self.quarter
    }

    /// Returns the three months of this quarter in order.
    pub const fn months(&self) -> [Month; 3] {
        let first = (self.quarter - 1) * 3 + 1;
        [
            Month {
                year: self.year,
                month: first,
            },
            Month {
                year: self.year,
                month: first + 1,
            },
            Month {
                year: self.year,
                month: first + 2,
            },
        ]
    }

    /// Leniently parses a quarter key such as `2024-Q3` or `2024q3`.
    pub fn parse_key(key: &str) -> Option<Self> {
        let key = key.trim();
        let split = key.find(['Q', 'q'])?;
        let year = key[..split].trim_end_matches('-').parse::<i32>().ok()?;
        let quarter = key[split + 1..].parse::<u32>().ok()?;
        Self::new(year, quarter).ok()
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-Q{}", self.year, self.quarter)
    }
}

impl FromStr for Quarter {
    type Err = DisplacementError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || DisplacementError::InvalidPeriod(format!("expected YYYY-QN, got '{s}'"));
        let (year, quarter) = s.trim().split_once("-Q").ok_or_else(invalid)?;
        if year.len() != 4 || quarter.len() != 1 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let quarter = quarter.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, quarter)
    }
}

impl Serialize for Quarter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Quarter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAUNCH: Month = Month::from_parts(2022, 11);

    #[test]
    fn test_const_month() {
        assert_eq!(LAUNCH, Month::new(2022, 11).unwrap());
        assert_eq!(LAUNCH.to_string(), "2022-11");
    }

    #[test]
    fn test_month_parse_and_display() {
        let month: Month = "2022-11".parse().unwrap();
        assert_eq!(month.year(), 2022);
        assert_eq!(month.month(), 11);
        assert_eq!(month.to_string(), "2022-11");
    }

    #[test]
    fn test_month_rejects_bad_keys() {
        assert!("2022-13".parse::<Month>().is_err());
        assert!("2022-1".parse::<Month>().is_err());
        assert!("2022/01".parse::<Month>().is_err());
        assert!("".parse::<Month>().is_err());
    }

    #[test]
    fn test_month_parse_key_is_lenient() {
        assert_eq!(
            Month::parse_key("2023-01-15"),
            Some(Month::new(2023, 1).unwrap())
        );
        assert_eq!(Month::parse_key("2023-01"), Some(Month::new(2023, 1).unwrap()));
        assert_eq!(Month::parse_key("2023"), None);
        assert_eq!(Month::parse_key("garbage"), None);
    }

    #[test]
    fn test_month_ordering_is_chronological() {
        let dec: Month = "2022-12".parse().unwrap();
        let jan: Month = "2023-01".parse().unwrap();
        assert!(dec < jan);
        assert_eq!(dec.succ(), jan);
    }

    #[test]
    fn test_month_range_inclusive() {
        let start: Month = "2022-11".parse().unwrap();
        let end: Month = "2025-12".parse().unwrap();
        let months = Month::range_inclusive(start, end);
        assert_eq!(months.len(), 38);
        assert_eq!(months[0], start);
        assert_eq!(months[37], end);

        assert!(Month::range_inclusive(end, start).is_empty());
    }

    #[test]
    fn test_month_quarter() {
        assert_eq!(Month::new(2024, 1).unwrap().quarter().quarter(), 1);
        assert_eq!(Month::new(2024, 6).unwrap().quarter().quarter(), 2);
        assert_eq!(Month::new(2024, 7).unwrap().quarter().quarter(), 3);
        assert_eq!(Month::new(2024, 12).unwrap().quarter().quarter(), 4);
    }

    #[test]
    fn test_quarter_parse_and_months() {
        let q: Quarter = "2022-Q4".parse().unwrap();
        assert_eq!(q.to_string(), "2022-Q4");
        let months = q.months();
        assert_eq!(months[0].to_string(), "2022-10");
        assert_eq!(months[2].to_string(), "2022-12");
        assert!(months.iter().all(|m| m.quarter() == q));
    }

    #[test]
    fn test_quarter_parse_key() {
        assert_eq!(Quarter::parse_key("2024q3"), Some(Quarter::new(2024, 3).unwrap()));
        assert_eq!(Quarter::parse_key("2024-Q3"), Some(Quarter::new(2024, 3).unwrap()));
        assert_eq!(Quarter::parse_key("2024-Q5"), None);
        assert_eq!(Quarter::parse_key(""), None);
        assert!("2024-Q0".parse::<Quarter>().is_err());
    }

    #[test]
    fn test_period_serde_as_strings() {
        let month: Month = "2024-02".parse().unwrap();
        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-02\"");
        let back: Month = serde_json::from_str("\"2024-02\"").unwrap();
        assert_eq!(back, month);

        let quarter: Quarter = serde_json::from_str("\"2025-Q1\"").unwrap();
        assert_eq!(quarter.year(), 2025);
        assert!(serde_json::from_str::<Quarter>("\"2025-1\"").is_err());
    }
}
