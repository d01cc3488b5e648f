//! Built-in locale data.

use chrono::Weekday;

const WEEKDAYS_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Names used when rendering condition format letters and reading
/// date-arithmetic expressions.
#[derive(Debug, Clone)]
pub struct Locale {
    pub month_names_short: [&'static str; 12],
    pub month_names_full: [&'static str; 12],
    /// Sunday first, as in `chrono::Weekday::num_days_from_sunday`.
    pub day_names_short: [&'static str; 7],
    pub day_names_full: [&'static str; 7],
}

impl Default for Locale {
    fn default() -> Self {
        Self::en_us()
    }
}

impl Locale {
    /// US English locale.
    pub fn en_us() -> Self {
        Locale {
            month_names_short: [
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ],
            month_names_full: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            day_names_short: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
            day_names_full: [
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ],
        }
    }

    pub fn day_name_short(&self, weekday: Weekday) -> &'static str {
        self.day_names_short[weekday.num_days_from_sunday() as usize]
    }

    pub fn day_name_full(&self, weekday: Weekday) -> &'static str {
        self.day_names_full[weekday.num_days_from_sunday() as usize]
    }

    /// Look up a weekday by its full or abbreviated name, ignoring case.
    pub fn weekday_from_name(&self, name: &str) -> Option<Weekday> {
        let index = self
            .day_names_full
            .iter()
            .zip(self.day_names_short.iter())
            .position(|(full, short)| {
                name.eq_ignore_ascii_case(full) || name.eq_ignore_ascii_case(short)
            })?;
        Some(WEEKDAYS_FROM_SUNDAY[index])
    }

    /// Look up a month (1-12) by its full or abbreviated name, ignoring case.
    pub fn month_from_name(&self, name: &str) -> Option<u32> {
        self.month_names_full
            .iter()
            .zip(self.month_names_short.iter())
            .position(|(full, short)| {
                name.eq_ignore_ascii_case(full) || name.eq_ignore_ascii_case(short)
            })
            .map(|index| index as u32 + 1)
    }
}
