//! Resolved holiday dates.

use chrono::{Datelike, NaiveDate};
use std::fmt;

/// A calendar date as produced by a rule.
///
/// Fixed-date rules are composed without validation, so a `CalendarDate` may
/// name a day that does not exist (month 13, February 30). Use
/// [`CalendarDate::to_naive`] to get a checked [`NaiveDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        CalendarDate { year, month, day }
    }

    /// Returns the date as a [`NaiveDate`], or `None` if it does not exist.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Returns true if the date exists in the proleptic Gregorian calendar.
    pub fn is_valid(&self) -> bool {
        self.to_naive().is_some()
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(d: NaiveDate) -> Self {
        CalendarDate {
            year: d.year(),
            month: d.month(),
            day: d.day(),
        }
    }
}

/// Formats as an ISO calendar date (`YYYY-MM-DD`).
impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// The outcome of resolving a rule for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// The rule produces this date.
    Date(CalendarDate),
    /// The rule does not produce a date in the requested year.
    NotApplicable,
}

impl Resolved {
    /// Returns the date, if the rule applies.
    pub fn date(&self) -> Option<CalendarDate> {
        match self {
            Resolved::Date(d) => Some(*d),
            Resolved::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Resolved::Date(_))
    }
}

impl From<NaiveDate> for Resolved {
    fn from(d: NaiveDate) -> Self {
        Resolved::Date(d.into())
    }
}

impl From<Option<CalendarDate>> for Resolved {
    fn from(d: Option<CalendarDate>) -> Self {
        match d {
            Some(d) => Resolved::Date(d),
            None => Resolved::NotApplicable,
        }
    }
}
