//! Holiday rule records and their resolution for a year.

use crate::date::{CalendarDate, Resolved};
use crate::error::ResolveError;
use crate::interpreter::Resolver;
use crate::year_spec;
use log::trace;
use std::ops::{BitOr, BitOrAssign};

/// Holiday kinds as a bit set.
///
/// A rule has one kind; selections combine kinds with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HolidayKind(u16);

impl HolidayKind {
    /// Public holiday
    pub const OFFICIAL: HolidayKind = HolidayKind(1);
    /// Bank holiday
    pub const BANK: HolidayKind = HolidayKind(2);
    /// Observed but not a day off
    pub const OBSERVED: HolidayKind = HolidayKind(4);
    pub const OTHER: HolidayKind = HolidayKind(8);
    pub const TYPE_4: HolidayKind = HolidayKind(16);
    pub const TYPE_5: HolidayKind = HolidayKind(32);
    pub const TYPE_6: HolidayKind = HolidayKind(64);
    pub const ALL: HolidayKind = HolidayKind(0x7FFF);

    pub const fn from_bits(bits: u16) -> Self {
        HolidayKind(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True if the two sets share a kind.
    pub const fn intersects(self, other: HolidayKind) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for HolidayKind {
    fn default() -> Self {
        HolidayKind::OFFICIAL
    }
}

impl BitOr for HolidayKind {
    type Output = HolidayKind;

    fn bitor(self, rhs: HolidayKind) -> HolidayKind {
        HolidayKind(self.0 | rhs.0)
    }
}

impl BitOrAssign for HolidayKind {
    fn bitor_assign(&mut self, rhs: HolidayKind) {
        self.0 |= rhs.0;
    }
}

/// One stored holiday rule.
///
/// Empty strings mean "no constraint": an empty `year` applies every year,
/// an empty `special` is the fixed date `month`/`day`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HolidayRule {
    pub id: u32,
    /// Years the rule applies: `2018`, `2018-`, `-2018`, `2017-2019,2021`.
    pub year: String,
    /// Years the rule does not apply, same grammar; `*` disables the rule.
    pub except_year: String,
    /// `None` or `Some(0)` takes the caller's default month.
    pub month: Option<u32>,
    /// `None` or `Some(0)` takes the caller's default day.
    pub day: Option<u32>,
    /// Rule code for movable dates, such as `{{easter}}-2 days`.
    pub special: String,
    /// Comma-separated region codes: `DE`, `DE-BY,AT`.
    pub region: String,
    pub kind: HolidayKind,
}

impl HolidayRule {
    /// A fixed-date rule.
    pub fn fixed(id: u32, month: u32, day: u32) -> Self {
        HolidayRule {
            id,
            month: Some(month),
            day: Some(day),
            ..Default::default()
        }
    }

    /// A rule with a rule code.
    pub fn movable(id: u32, special: &str) -> Self {
        HolidayRule {
            id,
            special: special.to_string(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: &str) -> Self {
        self.year = year.to_string();
        self
    }

    pub fn with_except_year(mut self, except_year: &str) -> Self {
        self.except_year = except_year.to_string();
        self
    }

    pub fn with_month_day(mut self, month: u32, day: u32) -> Self {
        self.month = Some(month);
        self.day = Some(day);
        self
    }

    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn with_kind(mut self, kind: HolidayKind) -> Self {
        self.kind = kind;
        self
    }

    /// The trimmed, non-empty region tokens.
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.region.split(',').map(str::trim).filter(|r| !r.is_empty())
    }

    /// A rule without region tokens is never selected.
    pub fn is_selectable(&self) -> bool {
        self.regions().next().is_some()
    }

    /// True if the rule is in effect in `year`.
    pub fn applies(&self, year: i32) -> bool {
        year_spec::applies(&self.year, &self.except_year, year)
    }

    /// Resolve the rule for `year`.
    ///
    /// A fixed-date rule is composed without validation, so an invalid
    /// `month`/`day` comes back as is.
    pub fn resolve(
        &self,
        resolver: &Resolver,
        year: i32,
        default_month: u32,
        default_day: u32,
    ) -> Result<Resolved, ResolveError> {
        if !self.applies(year) {
            trace!("HolidayRule: {} does not apply in {}", self.id, year);
            return Ok(Resolved::NotApplicable);
        }

        let month = self.month.filter(|&m| m != 0).unwrap_or(default_month);
        let day = self.day.filter(|&d| d != 0).unwrap_or(default_day);

        if self.special.trim().is_empty() {
            return Ok(Resolved::Date(CalendarDate::new(year, month, day)));
        }

        resolver.interpret(&self.special, year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(rule: &HolidayRule, year: i32) -> Resolved {
        rule.resolve(&Resolver::default(), year, 1, 1).unwrap()
    }

    #[test]
    fn test_fixed_rule() {
        let rule = HolidayRule::fixed(1, 10, 31);
        assert_eq!(resolve(&rule, 2018), Resolved::Date(CalendarDate::new(2018, 10, 31)));
    }

    #[test]
    fn test_fixed_rule_is_not_validated() {
        let rule = HolidayRule::fixed(1, 13, 40);
        assert_eq!(resolve(&rule, 2018), Resolved::Date(CalendarDate::new(2018, 13, 40)));
    }

    #[test]
    fn test_defaults() {
        let rule = HolidayRule::default().with_month_day(0, 0);
        assert_eq!(
            rule.resolve(&Resolver::default(), 2018, 5, 17).unwrap(),
            Resolved::Date(CalendarDate::new(2018, 5, 17))
        );
    }

    #[test]
    fn test_except_year() {
        let rule = HolidayRule::fixed(1, 10, 31).with_except_year("2018");
        assert_eq!(resolve(&rule, 2018), Resolved::NotApplicable);
        assert!(resolve(&rule, 2019).is_applicable());

        let disabled = HolidayRule::fixed(1, 10, 31).with_except_year("*");
        assert_eq!(resolve(&disabled, 2019), Resolved::NotApplicable);
    }

    #[test]
    fn test_kinds() {
        let kinds = HolidayKind::OFFICIAL | HolidayKind::BANK;
        assert_eq!(kinds.bits(), 3);
        assert!(kinds.intersects(HolidayKind::BANK));
        assert!(!kinds.intersects(HolidayKind::OTHER));
        assert!(HolidayKind::ALL.intersects(HolidayKind::TYPE_6));
    }

    #[test]
    fn test_regions() {
        let rule = HolidayRule::default().with_region(" DE-BY, ,AT ");
        assert_eq!(rule.regions().collect::<Vec<_>>(), vec!["DE-BY", "AT"]);
        assert!(rule.is_selectable());
        assert!(!HolidayRule::default().with_region(" , ").is_selectable());
    }
}
