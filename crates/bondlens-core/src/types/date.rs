//! Date type for schedule and term calculations.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

use crate::error::{CoreError, CoreResult};

/// Date-only layouts accepted by [`Date::parse_flexible`], tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y", "%d %b %Y"];

/// Timestamp layouts produced by spreadsheet exports.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A calendar date.
///
/// Newtype over `chrono::NaiveDate` with the month arithmetic coupon
/// schedules need: adding months clamps to the last valid day, so
/// Jan 31 + 1 month is Feb 28 (or 29).
///
/// # Example
///
/// ```rust
/// use bondlens_core::types::Date;
///
/// let date = Date::from_ymd(2025, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Parses the date layouts that show up in portfolio exports.
    ///
    /// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, `YYYY/MM/DD`, `DD-Mon-YYYY`,
    /// `DD Mon YYYY` and ISO timestamps (the time part is dropped).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if no layout matches.
    pub fn parse_flexible(s: &str) -> CoreResult<Self> {
        let s = s.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Ok(Date(date));
            }
        }
        for format in DATETIME_FORMATS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Date(ts.date()));
            }
        }
        Err(CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns today's date.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month. Negative values
    /// step backwards.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        let new_day = self.day().min(days_in_month(new_year, new_month));

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Counts the whole calendar months from `self` to `other`.
    ///
    /// The result is the largest `n` with `self.add_months(n) <= other`,
    /// zero when `other` is not after `self`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if month arithmetic leaves the
    /// supported range.
    pub fn months_until(&self, other: &Date) -> CoreResult<i32> {
        if other <= self {
            return Ok(0);
        }
        let mut months =
            (other.year() - self.year()) * 12 + other.month() as i32 - self.month() as i32;
        while months > 0 && self.add_months(months)? > *other {
            months -= 1;
        }
        Ok(months)
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns `(year, month)`, the key monthly reports group on.
    #[must_use]
    pub fn year_month(&self) -> (i32, u32) {
        (self.year(), self.month())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl std::str::FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_flexible(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
