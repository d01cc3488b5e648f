//! Year applicability of a rule.
//!
//! A rule record carries two year specifications: the years it applies to and
//! the years it is suspended in. Both share one grammar:
//!
//! - empty: no constraint
//! - `2018`: exactly that year
//! - `2018-`: that year and all later years
//! - `-2018`: all years up to and including that year
//! - `2015,2017-2019,2022`: a comma separated list of years and closed ranges
//!
//! The exception field additionally accepts `*`, meaning the rule never applies.
//! A non-empty specification that does not follow the grammar makes the rule
//! inert: it never matches, but it is not an error either.

/// A single entry of a year list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearItem {
    Single(i32),
    /// Inclusive on both ends. A reversed range contains no year.
    Range(i32, i32),
}

impl YearItem {
    fn contains(&self, year: i32) -> bool {
        match *self {
            YearItem::Single(y) => y == year,
            YearItem::Range(first, last) => first <= year && year <= last,
        }
    }
}

/// A parsed year specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSpec {
    /// Empty specification.
    Unconstrained,
    Exact(i32),
    From(i32),
    Until(i32),
    List(Vec<YearItem>),
    /// The `*` wildcard.
    Wildcard,
    /// Anything that does not follow the grammar.
    Malformed,
}

impl YearSpec {
    /// Parse a year specification. Never fails; see [`YearSpec::Malformed`].
    pub fn parse(spec: &str) -> YearSpec {
        let spec = spec.trim();

        if spec.is_empty() {
            return YearSpec::Unconstrained;
        }
        if spec == "*" {
            return YearSpec::Wildcard;
        }
        if let Some(year) = parse_year(spec) {
            return YearSpec::Exact(year);
        }
        if let Some(year) = spec.strip_suffix('-').and_then(parse_year) {
            return YearSpec::From(year);
        }
        if let Some(year) = spec.strip_prefix('-').and_then(parse_year) {
            return YearSpec::Until(year);
        }

        let mut items = Vec::new();
        for item in spec.split(',') {
            match parse_item(item.trim()) {
                Some(item) => items.push(item),
                None => return YearSpec::Malformed,
            }
        }
        YearSpec::List(items)
    }

    /// Returns true if `year` is one of the years this specification names.
    ///
    /// An unconstrained specification names every year; the wildcard and a
    /// malformed specification name none.
    pub fn contains(&self, year: i32) -> bool {
        match self {
            YearSpec::Unconstrained => true,
            YearSpec::Exact(y) => *y == year,
            YearSpec::From(first) => year >= *first,
            YearSpec::Until(last) => year <= *last,
            YearSpec::List(items) => items.iter().any(|item| item.contains(year)),
            YearSpec::Wildcard | YearSpec::Malformed => false,
        }
    }
}

/// Parse exactly four ascii digits.
fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_item(item: &str) -> Option<YearItem> {
    if let Some(year) = parse_year(item) {
        return Some(YearItem::Single(year));
    }
    let (first, last) = item.split_once('-')?;
    Some(YearItem::Range(parse_year(first)?, parse_year(last)?))
}

/// Decide whether a rule applies to `year`.
///
/// `year_spec` lists the years the rule is in effect, `except_year_spec` the
/// years it is suspended. A malformed specification in either field makes
/// the rule inert.
pub fn applies(year_spec: &str, except_year_spec: &str, year: i32) -> bool {
    match YearSpec::parse(except_year_spec) {
        YearSpec::Unconstrained => {}
        YearSpec::Wildcard | YearSpec::Malformed => return false,
        except => {
            if except.contains(year) {
                return false;
            }
        }
    }

    match YearSpec::parse(year_spec) {
        // The wildcard only has a meaning as an exception.
        YearSpec::Wildcard => false,
        spec => spec.contains(year),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(YearSpec::parse(""), YearSpec::Unconstrained);
        assert_eq!(YearSpec::parse("2018"), YearSpec::Exact(2018));
        assert_eq!(YearSpec::parse("2018-"), YearSpec::From(2018));
        assert_eq!(YearSpec::parse("-2018"), YearSpec::Until(2018));
        assert_eq!(YearSpec::parse("*"), YearSpec::Wildcard);
        assert_eq!(
            YearSpec::parse("2015, 2017-2019"),
            YearSpec::List(vec![YearItem::Single(2015), YearItem::Range(2017, 2019)])
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(YearSpec::parse("18"), YearSpec::Malformed);
        assert_eq!(YearSpec::parse("2018,x"), YearSpec::Malformed);
        assert_eq!(YearSpec::parse("20-2019"), YearSpec::Malformed);
        assert_eq!(YearSpec::parse("2018-2019-"), YearSpec::Malformed);
        assert_eq!(YearSpec::parse("2018,"), YearSpec::Malformed);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let spec = YearSpec::parse("2019-2017");
        assert_eq!(spec, YearSpec::List(vec![YearItem::Range(2019, 2017)]));
        assert!((2015..=2021).all(|y| !spec.contains(y)));
    }

    #[test]
    fn test_except_takes_precedence() {
        assert!(!applies("2018-", "2019", 2019));
        assert!(applies("2018-", "2019", 2020));
        assert!(!applies("", "2016-2018,2020", 2017));
        assert!(applies("", "2016-2018,2020", 2019));
    }

    #[test]
    fn test_wildcard_year_spec_is_inert() {
        assert!(!applies("*", "", 2018));
    }
}
