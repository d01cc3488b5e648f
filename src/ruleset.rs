//! Rule selection by region and kind, and holiday lists.

use crate::date::CalendarDate;
use crate::error::{RegionError, ResolveError};
use crate::interpreter::Resolver;
use crate::options::ResolveOptions;
use crate::rule::{HolidayKind, HolidayRule};
use chrono::{Datelike, NaiveDate};
use log::debug;

/// The rules selected for one region filter and set of kinds.
///
/// A rule is selected if its kind is one of `kinds` and one of its region
/// tokens is a prefix of the region filter, ignoring case: rules for `DE`
/// are selected for `DE-BY`, rules for `DE-BY` are not selected for `DE`.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<HolidayRule>,
    region: String,
    kinds: HolidayKind,
    selected: Vec<usize>,
    resolver: Resolver,
}

impl RuleSet {
    /// Select `rules` for `region` and `kinds`.
    ///
    /// `region` must look like an ISO 3166 code with up to three subdivision
    /// parts, such as `DE`, `de-by` or `GB-ENG`.
    pub fn new(rules: Vec<HolidayRule>, region: &str, kinds: HolidayKind) -> Result<Self, RegionError> {
        let mut set = RuleSet {
            rules,
            region: String::new(),
            kinds,
            selected: Vec::new(),
            resolver: Resolver::default(),
        };
        set.select(region)?;
        Ok(set)
    }

    /// Use `resolver` instead of the default one.
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// The same rules selected for another region.
    pub fn with_region(mut self, region: &str) -> Result<Self, RegionError> {
        self.select(region)?;
        Ok(self)
    }

    /// The same rules selected for other kinds.
    pub fn with_kinds(mut self, kinds: HolidayKind) -> Self {
        self.kinds = kinds;
        self.selected = select(&self.rules, &self.region, kinds);
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn kinds(&self) -> HolidayKind {
        self.kinds
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// The selected rules, in the order they were given.
    pub fn rules(&self) -> impl Iterator<Item = &HolidayRule> {
        self.selected.iter().map(|&i| &self.rules[i])
    }

    fn select(&mut self, region: &str) -> Result<(), RegionError> {
        if !is_region_code(region) {
            return Err(RegionError::InvalidRegion(region.to_string()));
        }
        self.region = region.to_string();
        self.selected = select(&self.rules, region, self.kinds);
        Ok(())
    }

    /// Holidays of `year`, sorted by date.
    ///
    /// Rules with the same date keep their order.
    pub fn holiday_list(
        &self,
        year: i32,
        options: &ResolveOptions,
    ) -> Result<Vec<(CalendarDate, &HolidayRule)>, ResolveError> {
        let mut list = Vec::new();
        for rule in self.rules() {
            let resolved = rule.resolve(&self.resolver, year, options.default_month, options.default_day)?;
            if let Some(date) = resolved.date() {
                list.push((date, rule));
            }
        }
        list.sort_by_key(|(date, _)| *date);
        Ok(list)
    }

    /// The rule that falls on `date`.
    ///
    /// Rules without their own month or day take them from `date`. If several
    /// rules fall on `date`, rules are tried in descending order of
    /// `except_year`, then `year`, compared as text, so a rule limited to some
    /// years wins over an unconstrained rule for the same day. Equal rules keep
    /// their order.
    pub fn holiday_on(&self, date: NaiveDate) -> Result<Option<&HolidayRule>, ResolveError> {
        let target = CalendarDate::from(date);
        let mut candidates: Vec<&HolidayRule> = self.rules().collect();
        candidates.sort_by(|a, b| {
            b.except_year
                .cmp(&a.except_year)
                .then_with(|| b.year.cmp(&a.year))
        });

        for rule in candidates {
            let resolved = rule.resolve(&self.resolver, date.year(), date.month(), date.day())?;
            if resolved.date() == Some(target) {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> Result<bool, ResolveError> {
        Ok(self.holiday_on(date)?.is_some())
    }

    /// Holidays from `first_year` to `last_year` inclusive of the rules
    /// accepted by `filter`, sorted by date.
    pub fn holidays_between<F>(
        &self,
        first_year: i32,
        last_year: i32,
        filter: F,
    ) -> Result<Vec<(CalendarDate, &HolidayRule)>, ResolveError>
    where
        F: Fn(&HolidayRule) -> bool,
    {
        let options = ResolveOptions::default();
        let mut list = Vec::new();
        for year in first_year..=last_year {
            for rule in self.rules().filter(|rule| filter(rule)) {
                let resolved = rule.resolve(&self.resolver, year, options.default_month, options.default_day)?;
                if let Some(date) = resolved.date() {
                    list.push((date, rule));
                }
            }
        }
        list.sort_by_key(|(date, _)| *date);
        Ok(list)
    }
}

fn select(rules: &[HolidayRule], region: &str, kinds: HolidayKind) -> Vec<usize> {
    let selected: Vec<usize> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.kind.intersects(kinds) && matches_region(rule, region))
        .map(|(i, _)| i)
        .collect();
    debug!(
        "RuleSet: selected {} of {} rules for region {}",
        selected.len(),
        rules.len(),
        region
    );
    selected
}

fn matches_region(rule: &HolidayRule, region: &str) -> bool {
    rule.regions().any(|token| {
        region
            .get(..token.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(token))
    })
}

/// `[A-Z]{2,3}` followed by up to three `-[A-Z0-9]{1,8}` parts, ignoring case.
fn is_region_code(region: &str) -> bool {
    let mut parts = region.split('-');
    let country_ok = parts
        .next()
        .is_some_and(|c| (2..=3).contains(&c.len()) && c.bytes().all(|b| b.is_ascii_alphabetic()));

    let mut subdivisions = 0;
    for part in parts {
        subdivisions += 1;
        if subdivisions > 3 || !(1..=8).contains(&part.len()) || !part.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return false;
        }
    }

    country_ok
}
