//! Hebrew calendar conversion
//!
//! Arithmetic Hebrew calendar after Reingold & Dershowitz, *Calendrical
//! Calculations*: the molad of Tishri with the four postponement rules folded
//! into [`elapsed_days`] and [`year_length_correction`].
//!
//! Internally months are numbered the biblical way (Nisan = 1 .. Adar II = 13,
//! the year starting at Tishri = 7). The public entry points take the civil
//! numbering used in rule codes:
//!
//! | civil | month |
//! |---|---|
//! | 1-5 | Tishri, Heshvan, Kislev, Tevet, Shevat |
//! | 6 | Adar I (leap years), Adar |
//! | 7 | Adar II (leap years), Adar |
//! | 8-13 | Nisan, Iyar, Sivan, Tammuz, Av, Elul |
//!
//! Day counts are the same as [`crate::hijri`]: day 1 is 0001-01-01.

use crate::date::CalendarDate;
use chrono::{Datelike, NaiveDate};

/// Day count of 1 Tishri AM 1 (Julian 3761 BCE October 7).
const EPOCH: i64 = -1_373_427;

const NISAN: u32 = 1;
const IYYAR: u32 = 2;
const TAMMUZ: u32 = 4;
const ELUL: u32 = 6;
const TISHRI: u32 = 7;
const MARHESHVAN: u32 = 8;
const KISLEV: u32 = 9;
const TEVET: u32 = 10;
const ADAR: u32 = 12;
const ADAR_II: u32 = 13;

pub fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

fn last_month_of_year(year: i64) -> u32 {
    if is_leap_year(year) {
        ADAR_II
    } else {
        ADAR
    }
}

/// Days from the epoch to the molad of Tishri, delayed a day when the molad
/// falls on Sunday, Wednesday or Friday.
fn elapsed_days(year: i64) -> i64 {
    let months_elapsed = (235 * year - 234).div_euclid(19);
    let parts_elapsed = 12_084 + 13_753 * months_elapsed;
    let days = 29 * months_elapsed + parts_elapsed.div_euclid(25_920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

/// Delays keeping ordinary years at 353-355 days and leap years at 383-385.
fn year_length_correction(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);

    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

/// Day count of 1 Tishri of `year`.
pub fn new_year(year: i64) -> i64 {
    EPOCH + elapsed_days(year) + year_length_correction(year)
}

pub fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

fn is_long_marheshvan(year: i64) -> bool {
    matches!(days_in_year(year), 355 | 385)
}

fn is_short_kislev(year: i64) -> bool {
    matches!(days_in_year(year), 353 | 383)
}

/// Length of a biblical month.
fn days_in_month(year: i64, month: u32) -> i64 {
    let short = matches!(month, IYYAR | TAMMUZ | ELUL | TEVET | ADAR_II)
        || (month == ADAR && !is_leap_year(year))
        || (month == MARHESHVAN && !is_long_marheshvan(year))
        || (month == KISLEV && is_short_kislev(year));
    if short {
        29
    } else {
        30
    }
}

/// Day count of a Hebrew date with a biblical month number.
fn fixed_from_biblical(year: i64, month: u32, day: u32) -> i64 {
    let months_before: i64 = if month < TISHRI {
        (TISHRI..=last_month_of_year(year))
            .chain(NISAN..month)
            .map(|m| days_in_month(year, m))
            .sum()
    } else {
        (TISHRI..month).map(|m| days_in_month(year, m)).sum()
    };
    new_year(year) + months_before + i64::from(day) - 1
}

/// Biblical month number of a civil month, or `None` outside 1-13.
fn biblical_month(year: i64, civil_month: u32) -> Option<u32> {
    let month = match civil_month {
        1..=5 => civil_month + 6,
        6 => ADAR,
        7 if is_leap_year(year) => ADAR_II,
        7 => ADAR,
        8..=13 => civil_month - 7,
        _ => return None,
    };
    Some(month)
}

/// The Gregorian date of a Hebrew date with a civil month number.
///
/// Returns `None` if the month does not exist or the day is past its end.
pub fn hebrew_to_gregorian(year: i64, civil_month: u32, day: u32) -> Option<NaiveDate> {
    let month = biblical_month(year, civil_month)?;
    if day == 0 || i64::from(day) > days_in_month(year, month) {
        return None;
    }
    let fixed = i32::try_from(fixed_from_biblical(year, month, day)).ok()?;
    NaiveDate::from_num_days_from_ce_opt(fixed)
}

/// The first Gregorian date in `year` that falls on the Hebrew `month`/`day`.
///
/// Tishri to Adar of Hebrew year `year + 3761` start in the autumn of `year`,
/// Nisan to Elul of Hebrew year `year + 3760` fall in its spring and summer.
pub fn hebrew_in_gregorian_year(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let year_am = i64::from(year) + 3760;
    (year_am..=year_am + 1)
        .filter_map(|hebrew_year| hebrew_to_gregorian(hebrew_year, month, day))
        .filter(|date| date.year() == year)
        .min()
}

/// Extension entry point: `month`/`day` are Hebrew, the result is ISO formatted.
pub(crate) fn hebrew(year: i32, month: u32, day: u32) -> Option<String> {
    hebrew_in_gregorian_year(year, month, day).map(|date| CalendarDate::from(date).to_string())
}
