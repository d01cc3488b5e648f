//! Rendering dates with condition format letters.

use crate::ast::{Condition, FormatLetter};
use crate::locale::Locale;
use chrono::{Datelike, NaiveDate};

/// Render `date` with a sequence of format letters.
pub fn format_date(date: NaiveDate, format: &[FormatLetter], locale: &Locale) -> String {
    format
        .iter()
        .map(|letter| format_letter(date, *letter, locale))
        .collect()
}

/// Format a single letter.
fn format_letter(date: NaiveDate, letter: FormatLetter, locale: &Locale) -> String {
    let weekday = date.weekday();
    match letter {
        // Day formatting
        FormatLetter::Day2 => format!("{:02}", date.day()),
        FormatLetter::Day => format!("{}", date.day()),
        FormatLetter::DayAbbr => locale.day_name_short(weekday).to_string(),
        FormatLetter::DayFull => locale.day_name_full(weekday).to_string(),
        FormatLetter::IsoWeekday => format!("{}", weekday.number_from_monday()),
        FormatLetter::Weekday => format!("{}", weekday.num_days_from_sunday()),

        // Month formatting
        FormatLetter::Month2 => format!("{:02}", date.month()),
        FormatLetter::Month => format!("{}", date.month()),
        FormatLetter::MonthAbbr => locale.month_names_short[date.month0() as usize].to_string(),
        FormatLetter::MonthFull => locale.month_names_full[date.month0() as usize].to_string(),

        // Year formatting
        FormatLetter::LeapYear => {
            if date.leap_year() {
                "1".to_string()
            } else {
                "0".to_string()
            }
        }
        FormatLetter::Year4 => format!("{:04}", date.year()),
    }
}

impl Condition {
    /// Evaluate this condition against a date.
    ///
    /// The date is rendered with the condition's format letters and compared,
    /// ignoring case, with each of the listed values.
    pub fn evaluate(&self, date: NaiveDate, locale: &Locale) -> bool {
        let rendered = format_date(date, &self.format, locale);
        let found = self
            .values
            .iter()
            .any(|value| value.eq_ignore_ascii_case(&rendered));
        found != self.negated
    }
}
