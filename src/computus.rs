//! Easter and Passover computation
//!
//! Both Easter variants follow the classic "days after March 21st" computus:
//! the offset is added to an epoch (March 21st for the Gregorian reckoning,
//! April 3rd, i.e. March 21st Julian, for the Orthodox one) and the result is
//! snapped back to the same or preceding Sunday.
//!
//! ## Valid range
//!
//! - Easter: 1583 to 4099. Outside that window the dates are not reliable.
//! - Passover: 1900 to 2099. Gauss's congruence is exact inside that window
//!   only; it is not extended beyond it.

use chrono::{Datelike, Duration, NaiveDate};

/// Number of days Easter Sunday falls after March 21st of its calendar.
///
/// With `julian = true` the offset is counted in the Julian calendar.
pub fn easter_days(year: i32, julian: bool) -> i64 {
    let year = year as i64;
    let golden = (year % 19) + 1;

    let (dom, mut pfm) = if julian {
        let mut dom = (year + (year / 4) + 5) % 7;
        if dom < 0 {
            dom += 7;
        }
        let mut pfm = (3 - (11 * golden) - 7) % 30;
        if pfm < 0 {
            pfm += 30;
        }
        (dom, pfm)
    } else {
        let mut dom = (year + (year / 4) - (year / 100) + (year / 400)) % 7;
        if dom < 0 {
            dom += 7;
        }
        let solar = (year - 1600) / 100 - (year - 1600) / 400;
        let lunar = (((year - 1400) / 100) * 8) / 25;
        let mut pfm = (3 - (11 * golden) + solar - lunar) % 30;
        if pfm < 0 {
            pfm += 30;
        }
        (dom, pfm)
    };

    // Paschal full moon corrections
    if pfm == 29 || (pfm == 28 && golden > 11) {
        pfm -= 1;
    }

    let mut tmp = (4 - pfm - dom) % 7;
    if tmp < 0 {
        tmp += 7;
    }

    pfm + tmp + 1
}

/// Date of Easter Sunday in the proleptic Gregorian calendar.
///
/// `orthodox = true` computes the Julian (Orthodox) Easter as observed,
/// expressed as a Gregorian date.
///
/// Returns `None` only when the year is outside the range chrono can represent.
pub fn easter(year: i32, orthodox: bool) -> Option<NaiveDate> {
    let epoch = if orthodox {
        NaiveDate::from_ymd_opt(year, 4, 3)?
    } else {
        NaiveDate::from_ymd_opt(year, 3, 21)?
    };

    let date = epoch.checked_add_signed(Duration::days(easter_days(year, orthodox)))?;
    let back = date.weekday().num_days_from_sunday() as i64;
    date.checked_sub_signed(Duration::days(back))
}

/// First day of Passover (15 Nisan) using Gauss's method.
///
/// Only exact for 1900 to 2099. Returns `None` only when the year is outside
/// the range chrono can represent.
pub fn passover(year: i32) -> Option<NaiveDate> {
    let y = year as i64;
    let a = (12 * y + 12) % 19;
    let b = y % 4;
    let m = 20.0955877 + 1.5542418 * a as f64 + 0.25 * b as f64 - 0.003177794 * y as f64;
    let mut mi = m as i64;
    let mf = m - mi as f64;
    let c = (mi + 3 * y + 5 * b + 1) % 7;

    if c == 2 || c == 4 || c == 6 {
        mi += 1;
    } else if c == 1 && a > 6 && mf >= 1367.0 / 2160.0 {
        mi += 2;
    } else if c == 0 && a > 11 && mf > 23269.0 / 25920.0 {
        mi += 1;
    }

    NaiveDate::from_ymd_opt(year, 3, 13)?.checked_add_signed(Duration::days(mi))
}
