//! Calendar-month keys and whole-month arithmetic.
//!
//! Cohorts and purchase buckets are both keyed by a [`Month`]: a date
//! truncated to year + calendar month. Offsets between months are counted
//! as whole months, never derived from day counts.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

// ── Month ─────────────────────────────────────────────────────────────────────

/// A calendar month: a purchase date with the day component discarded.
///
/// Ordering is chronological (year first, then month), so a `BTreeMap`
/// keyed by `Month` iterates oldest-first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Month {
    pub year: i32,
    /// 1-based calendar month (1 = January).
    pub month: u32,
}

impl Month {
    /// Truncate a date to its calendar month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Whole months elapsed from `earlier` to `self`:
    /// `(y2 - y1) * 12 + (m2 - m1)`.
    ///
    /// Negative when `self` precedes `earlier`.
    pub fn months_since(&self, earlier: Month) -> i32 {
        (self.year - earlier.year) * 12 + self.month as i32 - earlier.month as i32
    }
}

impl fmt::Display for Month {
    /// Period format `YYYY-MM`, e.g. `"2024-01"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ── Purchase-date parsing ─────────────────────────────────────────────────────

/// Date-only formats accepted in the purchase-date column.
const DATE_FMTS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Datetime formats whose date part is taken when the export carries a
/// time-of-day component.
const DATETIME_FMTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Parse a purchase-date field into a [`NaiveDate`].
///
/// Tries the date-only formats first, then the datetime forms (a trailing
/// `Z` is tolerated). Returns `None` for empty or unrecognised values.
pub fn parse_purchase_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    for fmt in DATE_FMTS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }

    warn!("could not parse purchase date \"{}\"", s);
    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── Month::from_date ──────────────────────────────────────────────────────

    #[test]
    fn test_from_date_discards_day() {
        assert_eq!(
            Month::from_date(date(2024, 1, 15)),
            Month::from_date(date(2024, 1, 31))
        );
    }

    // ── Month::months_since ───────────────────────────────────────────────────

    #[test]
    fn test_months_since_same_month_is_zero() {
        let m = Month::from_date(date(2024, 3, 10));
        assert_eq!(m.months_since(m), 0);
    }

    #[test]
    fn test_months_since_adjacent() {
        let jan = Month::from_date(date(2024, 1, 31));
        let feb = Month::from_date(date(2024, 2, 1));
        assert_eq!(feb.months_since(jan), 1);
    }

    #[test]
    fn test_months_since_across_year_boundary() {
        let nov = Month::from_date(date(2023, 11, 20));
        let feb = Month::from_date(date(2024, 2, 5));
        assert_eq!(feb.months_since(nov), 3);
    }

    #[test]
    fn test_months_since_negative_when_reversed() {
        let jan = Month::from_date(date(2024, 1, 1));
        let mar = Month::from_date(date(2024, 3, 1));
        assert_eq!(jan.months_since(mar), -2);
    }

    // ── Month ordering ────────────────────────────────────────────────────────

    #[test]
    fn test_ordering_is_chronological() {
        let dec_2023 = Month { year: 2023, month: 12 };
        let jan_2024 = Month { year: 2024, month: 1 };
        assert!(dec_2023 < jan_2024);
    }

    // ── Month display ─────────────────────────────────────────────────────────

    #[test]
    fn test_display_zero_pads() {
        let m = Month { year: 2024, month: 3 };
        assert_eq!(m.to_string(), "2024-03");
    }

    // ── parse_purchase_date ───────────────────────────────────────────────────

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_purchase_date("2024-01-15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_slash_formats() {
        assert_eq!(parse_purchase_date("2024/01/15"), Some(date(2024, 1, 15)));
        assert_eq!(parse_purchase_date("01/15/2024"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_datetime_takes_date_part() {
        assert_eq!(
            parse_purchase_date("2024-01-15T10:30:00"),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            parse_purchase_date("2024-01-15 10:30:00Z"),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_purchase_date(" 2024-01-15 "), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_empty_returns_none() {
        assert!(parse_purchase_date("").is_none());
        assert!(parse_purchase_date("   ").is_none());
    }

    #[test]
    fn test_parse_garbage_returns_none() {
        assert!(parse_purchase_date("not-a-date").is_none());
        assert!(parse_purchase_date("2024-13-01").is_none());
    }
}
