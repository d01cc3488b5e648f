//! Hijri (Islamic) calendar conversion
//!
//! This module implements the tabular (arithmetic) Islamic calendar: a
//! 30-year cycle of 10631 days with 11 leap years, months alternating between
//! 30 and 29 days and a 30th day added to the last month in leap years.
//!
//! ## Accuracy
//!
//! The tabular calendar is a civil approximation of the observational
//! calendar. Religious observance may differ by a day or two, depending on
//! the sighting of the new moon.
//!
//! Dates are exchanged as day counts where day 1 is 0001-01-01 of the
//! proleptic Gregorian calendar, which is what
//! [`Datelike::num_days_from_ce`] returns.

use crate::date::CalendarDate;
use chrono::{Datelike, NaiveDate};

/// Day count of 1 Muharram 1 AH (Julian 622-07-16).
const EPOCH: i64 = 227_015;

/// Day count of the given Hijri date.
///
/// Does not validate the date; day 30 of a 29-day month is the first day of
/// the following month.
pub fn fixed_from_hijri(year: i64, month: u32, day: u32) -> i64 {
    let month = i64::from(month);
    EPOCH - 1
        + (year - 1) * 354
        + (3 + 11 * year).div_euclid(30)
        + 29 * (month - 1)
        + (6 * month - 1).div_euclid(11)
        + i64::from(day)
}

/// Hijri `(year, month, day)` of the given day count.
pub fn hijri_from_fixed(fixed: i64) -> (i64, u32, u32) {
    let year = (30 * (fixed - EPOCH) + 10_646).div_euclid(10_631);
    let prior_days = fixed - fixed_from_hijri(year, 1, 1);
    let month = (11 * prior_days + 330).div_euclid(325);
    let day = fixed - fixed_from_hijri(year, month as u32, 1) + 1;
    (year, month as u32, day as u32)
}

/// Convert a Gregorian date to a Hijri date
///
/// # Arguments
/// * `date` - Gregorian date
///
/// # Returns
/// A tuple of (hijri_year, hijri_month, hijri_day)
pub fn gregorian_to_hijri(date: NaiveDate) -> (i64, u32, u32) {
    hijri_from_fixed(i64::from(date.num_days_from_ce()))
}

/// The Gregorian date of a Hijri date.
pub fn hijri_to_gregorian(year: i64, month: u32, day: u32) -> Option<NaiveDate> {
    let fixed = i32::try_from(fixed_from_hijri(year, month, day)).ok()?;
    NaiveDate::from_num_days_from_ce_opt(fixed)
}

/// The first Gregorian date in `year` that falls on Hijri `month`/`day`.
///
/// A Hijri year is about eleven days shorter than a Gregorian one, so a Hijri
/// date occurs once in most Gregorian years and twice in some. Returns
/// `None` for a month outside 1-12 or a day outside 1-30.
pub fn hijri_in_gregorian_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return None;
    }

    let (first_hijri_year, _, _) = gregorian_to_hijri(NaiveDate::from_ymd_opt(year, 1, 1)?);
    (first_hijri_year..=first_hijri_year + 2)
        .filter_map(|hijri_year| hijri_to_gregorian(hijri_year, month, day))
        .find(|date| date.year() == year)
}

/// Extension entry point: `month`/`day` are Hijri, the result is ISO formatted.
pub(crate) fn islamic(year: i32, month: u32, day: u32) -> Option<String> {
    hijri_in_gregorian_year(year, month, day).map(|date| CalendarDate::from(date).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_gregorian_to_hijri_basic() {
        assert_eq!(gregorian_to_hijri(ymd(2018, 6, 15)), (1439, 10, 1));
        assert_eq!(gregorian_to_hijri(ymd(2018, 8, 22)), (1439, 12, 10));
        assert_eq!(gregorian_to_hijri(ymd(2018, 9, 12)), (1440, 1, 1));
    }

    #[test]
    fn test_epoch() {
        assert_eq!(hijri_from_fixed(EPOCH), (1, 1, 1));
        assert_eq!(fixed_from_hijri(1, 1, 1), EPOCH);
    }

    #[test]
    fn test_round_trip_over_a_cycle() {
        let start = i64::from(ymd(2000, 1, 1).num_days_from_ce());
        for fixed in (start..start + 10_631).step_by(17) {
            let (y, m, d) = hijri_from_fixed(fixed);
            assert!((1..=12).contains(&m));
            assert!((1..=30).contains(&d));
            assert_eq!(fixed_from_hijri(y, m, d), fixed);
        }
    }

    #[test]
    fn test_hijri_in_gregorian_year() {
        // Eid al-Fitr and Eid al-Adha
        assert_eq!(hijri_in_gregorian_year(2018, 10, 1), Some(ymd(2018, 6, 15)));
        assert_eq!(hijri_in_gregorian_year(2018, 12, 10), Some(ymd(2018, 8, 22)));
        // Islamic New Year
        assert_eq!(hijri_in_gregorian_year(2018, 1, 1), Some(ymd(2018, 9, 12)));
    }

    #[test]
    fn test_invalid_hijri_fields() {
        assert_eq!(hijri_in_gregorian_year(2018, 13, 1), None);
        assert_eq!(hijri_in_gregorian_year(2018, 1, 0), None);
        assert_eq!(islamic(2018, 0, 1), None);
        assert_eq!(islamic(2018, 10, 1), Some("2018-06-15".to_string()));
    }
}
