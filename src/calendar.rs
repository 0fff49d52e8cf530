//! School-day calendar arithmetic.
//!
//! A school day is a weekday (Monday through Friday) that is not present in
//! the holiday set. Everything here is a pure function over a date range and
//! an immutable [`HolidaySet`]; nothing retains state between calls.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Strict "YYYY-MM-DD" date format used for holiday literals.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a single "YYYY-MM-DD" literal.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
}

/// Set of excluded calendar dates, day granularity.
///
/// Built once at startup from compiled-in literals and immutable afterwards.
/// Duplicate dates collapse silently.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet {
    dates: HashSet<NaiveDate>,
}

impl HolidaySet {
    /// Parse an ordered list of "YYYY-MM-DD" literals into a set.
    ///
    /// Any literal not matching the exact format is an error; since the list
    /// is a build-time constant this is fatal at startup, never user-facing.
    pub fn from_strs(dates: &[&str]) -> Result<Self> {
        let dates = dates
            .iter()
            .map(|s| parse_date(s))
            .collect::<Result<HashSet<_>>>()?;
        Ok(Self { dates })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Holidays within `[start, end]` inclusive, sorted ascending.
    ///
    /// An inverted range yields an empty list.
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut dates: Vec<_> = self
            .dates
            .iter()
            .copied()
            .filter(|d| start <= *d && *d <= end)
            .collect();
        dates.sort_unstable();
        dates
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// True iff `date` is Monday through Friday and not a holiday.
pub fn is_school_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(date)
}

/// All school days in `[start, end]` inclusive, in order.
fn school_days<'a>(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &'a HolidaySet,
) -> impl Iterator<Item = NaiveDate> + 'a {
    start
        .iter_days()
        .take_while(move |d| *d <= end)
        .filter(move |d| is_school_day(*d, holidays))
}

/// Count school days in `[start, end]` inclusive.
///
/// Linear day-by-day scan; ranges here are human-scale (a school term, at
/// most a few hundred days). `start > end` yields 0, not an error.
pub fn count_school_days(start: NaiveDate, end: NaiveDate, holidays: &HolidaySet) -> u32 {
    school_days(start, end, holidays).count() as u32
}

/// Count school days in `[start, end]` whose weekday is in `weekdays`.
///
/// Used for class schedules that only meet on certain days of the week.
pub fn count_by_weekdays(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HolidaySet,
    weekdays: &[Weekday],
) -> u32 {
    school_days(start, end, holidays)
        .filter(|d| weekdays.contains(&d.weekday()))
        .count() as u32
}

/// Calendar month bucket, ordered chronologically.
///
/// `year` precedes `month` so the derived `Ord` is chronological; the
/// "MM/YYYY" display form exists only at the serialization boundary and is
/// never used for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// School-day counts per calendar month over `[start, end]` inclusive.
///
/// The map iterates in chronological order via the `MonthKey` comparator.
pub fn group_by_month(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &HolidaySet,
) -> BTreeMap<MonthKey, u32> {
    let mut months = BTreeMap::new();
    for day in school_days(start, end, holidays) {
        *months.entry(MonthKey::of(day)).or_insert(0) += 1;
    }
    months
}
