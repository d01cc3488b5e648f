//! Applying date-arithmetic expressions and modifier chains to a date.
//!
//! Items of an expression are not applied in textual order. Like the relative
//! formats of common date libraries, an expression is applied in phases:
//!
//! 1. absolute fields (`2018-04-01`, `may 1`)
//! 2. weekday moves (`next monday`)
//! 3. month and year offsets, with day overflow rolling into the next month
//! 4. day and week offsets
//! 5. business-day offsets
//! 6. `first day of` / `last day of`
//! 7. `<nth> <weekday> of`

pub mod format;

use crate::ast::{DateExpr, DateItem, Modifier, ModifierChain, Unit, WeekdayMove};
use crate::error::ModifyError;
use crate::locale::Locale;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Which end of the month `first day of` / `last day of` selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MonthEdge {
    First,
    Last,
}

/// The accumulated effect of an expression's items.
#[derive(Debug, Default)]
struct Plan {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    weekdays: Vec<(Weekday, WeekdayMove)>,
    months: i64,
    days: i64,
    business_days: i64,
    edge: Option<MonthEdge>,
    nth_weekday: Option<(i64, Weekday)>,
}

impl Plan {
    fn from_items(items: &[DateItem]) -> Result<Plan, ModifyError> {
        let mut plan = Plan::default();

        for item in items {
            match *item {
                DateItem::Date { year, month, day } => {
                    plan.year = Some(year);
                    plan.month = Some(month);
                    plan.day = Some(day.unwrap_or(1));
                }
                DateItem::MonthName { month, day } => {
                    plan.month = Some(month);
                    if day.is_some() {
                        plan.day = day;
                    }
                }
                DateItem::Offset { amount, unit } => plan.add_offset(amount, unit)?,
                DateItem::Ago => {
                    plan.months = -plan.months;
                    plan.days = -plan.days;
                    plan.business_days = -plan.business_days;
                }
                DateItem::Weekday { weekday, movement } => plan.weekdays.push((weekday, movement)),
                DateItem::FirstDayOf => plan.edge = Some(MonthEdge::First),
                DateItem::LastDayOf => plan.edge = Some(MonthEdge::Last),
                DateItem::NthWeekdayOf { nth, weekday } => plan.nth_weekday = Some((nth, weekday)),
            }
        }

        Ok(plan)
    }

    fn add_offset(&mut self, amount: i64, unit: Unit) -> Result<(), ModifyError> {
        let (total, scale) = match unit {
            Unit::Day => (&mut self.days, 1),
            Unit::Week => (&mut self.days, 7),
            Unit::Fortnight => (&mut self.days, 14),
            Unit::Month => (&mut self.months, 1),
            Unit::Year => (&mut self.months, 12),
            Unit::Weekday => (&mut self.business_days, 1),
        };
        let current = *total;
        *total = amount
            .checked_mul(scale)
            .and_then(|n| current.checked_add(n))
            .ok_or(ModifyError::OutOfRange)?;
        Ok(())
    }

    fn has_absolute_date(&self) -> bool {
        self.year.is_some()
    }
}

impl DateExpr {
    /// Apply this expression to `base`.
    ///
    /// `base` may be `None` if the expression starts from an absolute date;
    /// otherwise the result is [`ModifyError::MissingBase`].
    pub fn apply(&self, base: Option<NaiveDate>) -> Result<NaiveDate, ModifyError> {
        let plan = Plan::from_items(&self.items)?;

        let base = match base {
            Some(base) => base,
            None if plan.has_absolute_date() => NaiveDate::MIN,
            None => return Err(ModifyError::MissingBase),
        };

        // Phase 1
        let year = plan.year.unwrap_or_else(|| base.year());
        let month = plan.month.unwrap_or_else(|| base.month());
        let day = plan.day.unwrap_or_else(|| base.day());
        let mut date = roll_date(year, month, i64::from(day))?;

        // Phase 2
        for (weekday, movement) in &plan.weekdays {
            date = move_to_weekday(date, *weekday, *movement)?;
        }

        // Phase 3
        if plan.edge.is_some() || plan.nth_weekday.is_some() {
            date = first_of_month(date)?;
        }
        if plan.months != 0 {
            date = add_months(date, plan.months)?;
        }

        // Phase 4
        date = add_days(date, plan.days)?;

        // Phase 5
        if plan.business_days != 0 {
            date = add_business_days(date, plan.business_days)?;
        }

        // Phase 6
        match plan.edge {
            Some(MonthEdge::First) => date = first_of_month(date)?,
            Some(MonthEdge::Last) => date = last_of_month(date)?,
            None => {}
        }

        // Phase 7
        if let Some((nth, weekday)) = plan.nth_weekday {
            date = nth_weekday_of_month(date, nth, weekday)?;
        }

        Ok(date)
    }
}

impl ModifierChain {
    /// Apply every modifier in order, starting from `base`.
    ///
    /// Returns `Ok(None)` if a conditional segment without an action fails
    /// its condition, which vetoes the date.
    pub fn apply(
        &self,
        base: Option<NaiveDate>,
        locale: &Locale,
    ) -> Result<Option<NaiveDate>, ModifyError> {
        let mut current = base;

        for modifier in &self.modifiers {
            match modifier {
                Modifier::Plain(expr) => current = Some(expr.apply(current)?),
                Modifier::Conditional { condition, then } => {
                    let date = current.ok_or(ModifyError::MissingBase)?;
                    let holds = condition.evaluate(date, locale);
                    match then {
                        Some(expr) if holds => current = Some(expr.apply(current)?),
                        None if !holds => return Ok(None),
                        _ => {}
                    }
                }
            }
        }

        current.ok_or(ModifyError::MissingBase).map(Some)
    }
}

/// Add a signed number of days.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, ModifyError> {
    let delta = Days::new(days.unsigned_abs());
    let moved = if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    };
    moved.ok_or(ModifyError::OutOfRange)
}

/// Build a date from fields, letting the day run past either end of the month.
fn roll_date(year: i32, month: u32, day: i64) -> Result<NaiveDate, ModifyError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(ModifyError::OutOfRange)?;
    add_days(first, day - 1)
}

/// Add months keeping the day of month; `01-31 +1 month` rolls into March.
fn add_months(date: NaiveDate, months: i64) -> Result<NaiveDate, ModifyError> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0());
    let index = index.checked_add(months).ok_or(ModifyError::OutOfRange)?;
    let year = i32::try_from(index.div_euclid(12)).map_err(|_| ModifyError::OutOfRange)?;
    let month = index.rem_euclid(12) as u32 + 1;
    roll_date(year, month, i64::from(date.day()))
}

fn move_to_weekday(
    date: NaiveDate,
    target: Weekday,
    movement: WeekdayMove,
) -> Result<NaiveDate, ModifyError> {
    let current = i64::from(date.weekday().num_days_from_monday());
    let target = i64::from(target.num_days_from_monday());
    let days = match movement {
        WeekdayMove::ThisOrNext => (target - current).rem_euclid(7),
        WeekdayMove::Next => match (target - current).rem_euclid(7) {
            0 => 7,
            n => n,
        },
        WeekdayMove::Previous => match (current - target).rem_euclid(7) {
            0 => -7,
            n => -n,
        },
    };
    add_days(date, days)
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Step over Monday to Friday only.
///
/// Up to five days are stepped one at a time, which always lands on a
/// weekday. From a weekday every further five business days are one week.
fn add_business_days(date: NaiveDate, count: i64) -> Result<NaiveDate, ModifyError> {
    let step = count.signum();
    let total = count.unsigned_abs();
    let (weeks, days) = match (total / 5, total % 5) {
        (0, days) => (0, days),
        (weeks, 0) => (weeks - 1, 5),
        (weeks, days) => (weeks, days),
    };

    let mut date = date;
    let mut remaining = days;
    while remaining > 0 {
        date = add_days(date, step)?;
        if !is_weekend(date) {
            remaining -= 1;
        }
    }

    let week_days = i64::try_from(weeks)
        .ok()
        .and_then(|weeks| weeks.checked_mul(7 * step))
        .ok_or(ModifyError::OutOfRange)?;
    add_days(date, week_days)
}

fn first_of_month(date: NaiveDate) -> Result<NaiveDate, ModifyError> {
    date.with_day(1).ok_or(ModifyError::OutOfRange)
}

fn last_of_month(date: NaiveDate) -> Result<NaiveDate, ModifyError> {
    let next = add_months(first_of_month(date)?, 1)?;
    add_days(next, -1)
}

/// The `nth` given weekday of the date's month; `nth == -1` is the last one.
fn nth_weekday_of_month(date: NaiveDate, nth: i64, weekday: Weekday) -> Result<NaiveDate, ModifyError> {
    if nth < 0 {
        let last = last_of_month(date)?;
        let back = i64::from(last.weekday().num_days_from_monday())
            - i64::from(weekday.num_days_from_monday());
        return add_days(last, -back.rem_euclid(7));
    }

    let first = move_to_weekday(first_of_month(date)?, weekday, WeekdayMove::ThisOrNext)?;
    let weeks = (nth - 1).checked_mul(7).ok_or(ModifyError::OutOfRange)?;
    add_days(first, weeks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn apply(expr: &str, base: NaiveDate) -> NaiveDate {
        expr.parse::<DateExpr>().unwrap().apply(Some(base)).unwrap()
    }

    #[test]
    fn test_day_offsets() {
        assert_eq!(apply("-46 days", ymd(2018, 4, 1)), ymd(2018, 2, 14));
        assert_eq!(apply("+1 week", ymd(2018, 12, 28)), ymd(2019, 1, 4));
        assert_eq!(apply("1 fortnight ago", ymd(2018, 1, 10)), ymd(2017, 12, 27));
        assert_eq!(apply("tomorrow", ymd(2020, 2, 28)), ymd(2020, 2, 29));
    }

    #[test]
    fn test_month_offsets_roll_over() {
        assert_eq!(apply("+1 month", ymd(2019, 1, 31)), ymd(2019, 3, 3));
        assert_eq!(apply("+1 month", ymd(2020, 1, 31)), ymd(2020, 3, 2));
        assert_eq!(apply("-1 year", ymd(2020, 2, 29)), ymd(2019, 3, 1));
        assert_eq!(apply("+13 months", ymd(2018, 5, 15)), ymd(2019, 6, 15));
    }

    #[test]
    fn test_weekday_moves() {
        // 2018-05-05 is a Saturday
        let saturday = ymd(2018, 5, 5);
        assert_eq!(apply("next monday", saturday), ymd(2018, 5, 7));
        assert_eq!(apply("saturday", saturday), saturday);
        assert_eq!(apply("next saturday", saturday), ymd(2018, 5, 12));
        assert_eq!(apply("last saturday", saturday), ymd(2018, 4, 28));
        assert_eq!(apply("previous friday", saturday), ymd(2018, 5, 4));
    }

    #[test]
    fn test_absolute_dates() {
        let base = ymd(2000, 1, 1);
        assert_eq!(apply("2018-04-01-46 Days", base), ymd(2018, 2, 14));
        assert_eq!(apply("2018-05", base), ymd(2018, 5, 1));
        assert_eq!(apply("may 1", ymd(2018, 3, 15)), ymd(2018, 5, 1));
        assert_eq!(apply("2018-02-30", base), ymd(2018, 3, 2));

        let expr: DateExpr = "2018-04-01".parse().unwrap();
        assert_eq!(expr.apply(None), Ok(ymd(2018, 4, 1)));
    }

    #[test]
    fn test_month_edges() {
        assert_eq!(apply("last day of next month", ymd(2018, 1, 31)), ymd(2018, 2, 28));
        assert_eq!(apply("first day of", ymd(2018, 7, 19)), ymd(2018, 7, 1));
        assert_eq!(apply("last day of february", ymd(2020, 7, 19)), ymd(2020, 2, 29));
    }

    #[test]
    fn test_nth_weekday_of() {
        let base = ymd(2018, 1, 1);
        assert_eq!(apply("first monday of may", base), ymd(2018, 5, 7));
        assert_eq!(apply("second sunday of may", base), ymd(2018, 5, 13));
        assert_eq!(apply("last monday of may", base), ymd(2018, 5, 28));
        assert_eq!(apply("fourth thursday of november", base), ymd(2018, 11, 22));
        // 2018-09-30 is a Sunday
        assert_eq!(apply("last sunday of september", base), ymd(2018, 9, 30));
    }

    #[test]
    fn test_business_days() {
        // Friday + 1 weekday is Monday
        assert_eq!(apply("+1 weekday", ymd(2018, 5, 4)), ymd(2018, 5, 7));
        assert_eq!(apply("-1 weekday", ymd(2018, 5, 7)), ymd(2018, 5, 4));
        assert_eq!(apply("+5 weekdays", ymd(2018, 5, 7)), ymd(2018, 5, 14));
    }

    #[test]
    fn test_business_days_from_weekends() {
        // 2018-05-05 is a Saturday, 2018-05-06 a Sunday
        assert_eq!(apply("+1 weekday", ymd(2018, 5, 5)), ymd(2018, 5, 7));
        assert_eq!(apply("+5 weekdays", ymd(2018, 5, 5)), ymd(2018, 5, 11));
        assert_eq!(apply("-5 weekdays", ymd(2018, 5, 6)), ymd(2018, 4, 30));
        assert_eq!(apply("+10 weekdays", ymd(2018, 5, 4)), ymd(2018, 5, 18));
        assert_eq!(apply("-6 weekdays", ymd(2018, 5, 7)), ymd(2018, 4, 27));
        assert_eq!(apply("+23 weekdays", ymd(2018, 5, 5)), ymd(2018, 6, 6));
    }

    #[test]
    fn test_huge_business_day_offsets_fail_fast() {
        for code in ["+9223372036854775807 weekdays", "9223372036854775807 weekdays ago"] {
            let expr: DateExpr = code.parse().unwrap();
            assert_eq!(expr.apply(Some(ymd(2018, 1, 1))), Err(ModifyError::OutOfRange), "{code}");
        }
    }

    #[test]
    fn test_errors() {
        let expr: DateExpr = "+1 day".parse().unwrap();
        assert_eq!(expr.apply(None), Err(ModifyError::MissingBase));

        let expr: DateExpr = "2018-13-01".parse().unwrap();
        assert_eq!(expr.apply(None), Err(ModifyError::OutOfRange));

        let expr: DateExpr = "+9999999 years".parse().unwrap();
        assert_eq!(expr.apply(Some(ymd(2018, 1, 1))), Err(ModifyError::OutOfRange));
    }

    #[test]
    fn test_chain_conditions() {
        let locale = Locale::default();
        let chain = ModifierChain::parse("{{?D=Sat,sun}}next Monday").unwrap();
        assert_eq!(chain.apply(Some(ymd(2018, 5, 5)), &locale), Ok(Some(ymd(2018, 5, 7))));
        assert_eq!(chain.apply(Some(ymd(2018, 5, 6)), &locale), Ok(Some(ymd(2018, 5, 7))));
        assert_eq!(chain.apply(Some(ymd(2018, 5, 4)), &locale), Ok(Some(ymd(2018, 5, 4))));

        let veto = ModifierChain::parse("{{?D=Sat,sun}}").unwrap();
        assert_eq!(veto.apply(Some(ymd(2018, 5, 4)), &locale), Ok(None));
        assert_eq!(veto.apply(Some(ymd(2018, 5, 5)), &locale), Ok(Some(ymd(2018, 5, 5))));
    }

    #[test]
    fn test_chain_segments_apply_in_order() {
        let locale = Locale::default();
        let chain = ModifierChain::parse("2018-04-19|{{?D=Tue}}+1 Day|{{?D=Fri}}-1 Day").unwrap();
        assert_eq!(chain.apply(None, &locale), Ok(Some(ymd(2018, 4, 19))));

        let chain = ModifierChain::parse("2020-04-28|{{?D=Tue}}+1 Day|{{?D=Fri}}-1 Day").unwrap();
        assert_eq!(chain.apply(None, &locale), Ok(Some(ymd(2020, 4, 29))));

        let chain = ModifierChain::parse("2021-04-16|{{?D=Tue}}+1 Day|{{?D=Fri}}-1 Day").unwrap();
        assert_eq!(chain.apply(None, &locale), Ok(Some(ymd(2021, 4, 15))));
    }
}
