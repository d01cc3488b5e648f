//! Intermediate representation of parsed rule codes.
//!
//! A rule code is evaluated in two steps. The raw code is first parsed into a
//! [`RuleCode`] template of text and `{{...}}` placeholders. Once the
//! placeholders have been substituted for a concrete year, the resulting text
//! is parsed into a [`ModifierChain`] of date-arithmetic segments.

use crate::parser;
use crate::error::ParseError;
use chrono::Weekday;
use std::str::FromStr;

/// Placeholders substituted before anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `{{year}}`
    Year,
    /// `{{month}}`
    Month,
    /// `{{day}}`
    Day,
    /// `{{easter}}` - Western Easter Sunday
    Easter,
    /// `{{easter_o}}` - Orthodox Easter Sunday
    EasterOrthodox,
    /// `{{passover}}` - first day of Passover
    Passover,
}

impl FromStr for Placeholder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(Placeholder::Year),
            "month" => Ok(Placeholder::Month),
            "day" => Ok(Placeholder::Day),
            "easter" => Ok(Placeholder::Easter),
            "easter_o" => Ok(Placeholder::EasterOrthodox),
            "passover" => Ok(Placeholder::Passover),
            _ => Err(()),
        }
    }
}

/// A piece of a rule code template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Literal text, passed through to the modifier chain.
    Text(String),
    Placeholder(Placeholder),
    /// `{{2018:a,b,c}}` - the value for `start_year + index`. Values are
    /// templates themselves and may hold placeholders or an extension call.
    InlineList {
        start_year: i32,
        values: Vec<RuleCode>,
    },
    /// `{{name}}` - a call into the extension registry.
    Extension(String),
}

impl Fragment {
    /// The source text of this fragment.
    pub fn source(&self) -> String {
        match self {
            Fragment::Text(s) => s.clone(),
            Fragment::Placeholder(p) => {
                let name = match p {
                    Placeholder::Year => "year",
                    Placeholder::Month => "month",
                    Placeholder::Day => "day",
                    Placeholder::Easter => "easter",
                    Placeholder::EasterOrthodox => "easter_o",
                    Placeholder::Passover => "passover",
                };
                format!("{{{{{}}}}}", name)
            }
            Fragment::InlineList { start_year, values } => {
                let values: Vec<String> = values.iter().map(RuleCode::source).collect();
                format!("{{{{{:04}:{}}}}}", start_year, values.join(","))
            }
            Fragment::Extension(name) => format!("{{{{{}}}}}", name),
        }
    }
}

/// A parsed rule code template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCode {
    fragments: Vec<Fragment>,
}

impl RuleCode {
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        RuleCode { fragments }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// The source text of this template.
    pub fn source(&self) -> String {
        self.fragments.iter().map(Fragment::source).collect()
    }

    /// The first inline year list, if any.
    pub fn inline_list(&self) -> Option<&Fragment> {
        self.fragments
            .iter()
            .find(|f| matches!(f, Fragment::InlineList { .. }))
    }

    /// The name of the first extension call outside inline lists, if any.
    pub fn extension(&self) -> Option<&str> {
        self.fragments.iter().find_map(|f| match f {
            Fragment::Extension(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Parse a rule code. Parsing a template never fails: anything that is
    /// not a recognized placeholder stays literal text.
    pub fn parse(code: &str) -> RuleCode {
        parser::parse(code)
    }
}

/// Letters of the condition format mini-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatLetter {
    /// `d` - day of month, two digits
    Day2,
    /// `j` - day of month
    Day,
    /// `D` - abbreviated weekday name
    DayAbbr,
    /// `l` - full weekday name
    DayFull,
    /// `N` - ISO weekday, 1 (Monday) to 7 (Sunday)
    IsoWeekday,
    /// `w` - weekday, 0 (Sunday) to 6 (Saturday)
    Weekday,
    /// `m` - month, two digits
    Month2,
    /// `n` - month
    Month,
    /// `M` - abbreviated month name
    MonthAbbr,
    /// `F` - full month name
    MonthFull,
    /// `L` - 1 in a leap year, 0 otherwise
    LeapYear,
    /// `Y` - four digit year
    Year4,
}

impl FormatLetter {
    pub fn from_char(ch: char) -> Option<FormatLetter> {
        let letter = match ch {
            'd' => FormatLetter::Day2,
            'j' => FormatLetter::Day,
            'D' => FormatLetter::DayAbbr,
            'l' => FormatLetter::DayFull,
            'N' => FormatLetter::IsoWeekday,
            'w' => FormatLetter::Weekday,
            'm' => FormatLetter::Month2,
            'n' => FormatLetter::Month,
            'M' => FormatLetter::MonthAbbr,
            'F' => FormatLetter::MonthFull,
            'L' => FormatLetter::LeapYear,
            'Y' => FormatLetter::Year4,
            _ => return None,
        };
        Some(letter)
    }
}

/// `{{?<format>=<values>}}` or `{{?<format>!=<values>}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub format: Vec<FormatLetter>,
    pub negated: bool,
    pub values: Vec<String>,
}

/// Time units of a date offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Week,
    Fortnight,
    Month,
    Year,
    /// Monday to Friday only.
    Weekday,
}

impl FromStr for Unit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" | "days" => Ok(Unit::Day),
            "week" | "weeks" => Ok(Unit::Week),
            "fortnight" | "fortnights" => Ok(Unit::Fortnight),
            "month" | "months" => Ok(Unit::Month),
            "year" | "years" => Ok(Unit::Year),
            "weekday" | "weekdays" => Ok(Unit::Weekday),
            _ => Err(()),
        }
    }
}

/// How a weekday name moves the date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayMove {
    /// `monday`, `this monday`: the same day if it is a Monday, else the next one.
    ThisOrNext,
    /// `next monday`: strictly after.
    Next,
    /// `last monday`, `previous monday`: strictly before.
    Previous,
}

/// One item of a date-arithmetic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateItem {
    /// `2018-04-01`, or `2018-04` with `day: None`.
    Date { year: i32, month: u32, day: Option<u32> },
    /// `may`, `may 1`
    MonthName { month: u32, day: Option<u32> },
    /// `+3 days`, `next month`
    Offset { amount: i64, unit: Unit },
    /// `ago` - negates the offsets before it.
    Ago,
    Weekday { weekday: Weekday, movement: WeekdayMove },
    /// `first day of`
    FirstDayOf,
    /// `last day of`
    LastDayOf,
    /// `second monday of`; `nth` is -1 for `last monday of`.
    NthWeekdayOf { nth: i64, weekday: Weekday },
}

/// A date-arithmetic expression such as `+1 week` or `first monday of may`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateExpr {
    pub items: Vec<DateItem>,
}

impl FromStr for DateExpr {
    type Err = crate::error::ModifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::relative::parse(s)
    }
}

/// One `|`-separated segment of the modifier chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    Plain(DateExpr),
    /// Applies `then` if the condition holds. Without `then`, a failed
    /// condition vetoes the whole rule.
    Conditional {
        condition: Condition,
        then: Option<DateExpr>,
    },
}

/// The ordered modifiers of a rule code after substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierChain {
    pub modifiers: Vec<Modifier>,
}

impl ModifierChain {
    /// Parse substituted rule code text.
    pub fn parse(text: &str) -> Result<ModifierChain, ParseError> {
        parser::parse_chain(text)
    }
}
