//! Evaluation of rule codes.
//!
//! A rule code is evaluated for one year in this order:
//!
//! 1. `{{year}}`, `{{month}}`, `{{day}}`, `{{easter}}`, `{{easter_o}}` and
//!    `{{passover}}` are replaced by their values, also inside list values.
//! 2. An inline list `{{2018:a,b,c}}` is replaced by the entry for the year.
//!    A year outside the list does not apply.
//! 3. An extension call `{{name}}`, including one that came out of the list
//!    entry, is replaced by the extension's result. An unregistered name is
//!    an error.
//! 4. The text is split on `|` and applied as a modifier chain to the date
//!    `year-month-day`.

use crate::ast::{Fragment, ModifierChain, Placeholder, RuleCode};
use crate::cache;
use crate::computus;
use crate::date::{CalendarDate, Resolved};
use crate::error::ResolveError;
use crate::extension::ExtensionRegistry;
use crate::locale::Locale;
use chrono::NaiveDate;
use log::{debug, trace, warn};

/// Evaluates rule codes against an extension registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    registry: ExtensionRegistry,
    locale: Locale,
}

/// A resolver with the built-in `islamic` and `hebrew` extensions.
impl Default for Resolver {
    fn default() -> Self {
        Resolver::new(ExtensionRegistry::with_builtins())
    }
}

impl Resolver {
    pub fn new(registry: ExtensionRegistry) -> Self {
        Resolver {
            registry,
            locale: Locale::default(),
        }
    }

    pub fn registry(&self) -> &ExtensionRegistry {
        &self.registry
    }

    /// Evaluate `code` for `year`, starting from `year-month-day`.
    ///
    /// Returns [`Resolved::NotApplicable`] if the code yields no date for the
    /// year, including when its modifier chain cannot be parsed or applied.
    /// The only error is [`ResolveError::UnknownExtension`].
    pub fn interpret(&self, code: &str, year: i32, month: u32, day: u32) -> Result<Resolved, ResolveError> {
        let rule_code = cache::get_or_parse(code);

        let Some(text) = self.substitute(&rule_code, year, month, day)? else {
            return Ok(Resolved::NotApplicable);
        };
        trace!("Resolver: '{}' for {} expands to '{}'", code, year, text);

        let chain = match ModifierChain::parse(&text) {
            Ok(chain) => chain,
            Err(e) => {
                debug!("Resolver: '{}' is not applicable in {}: {}", code, year, e);
                return Ok(Resolved::NotApplicable);
            }
        };

        let base = NaiveDate::from_ymd_opt(year, month, day);
        match chain.apply(base, &self.locale) {
            Ok(Some(date)) => Ok(Resolved::from(date)),
            Ok(None) => {
                trace!("Resolver: '{}' vetoed by a condition in {}", code, year);
                Ok(Resolved::NotApplicable)
            }
            Err(e) => {
                debug!("Resolver: '{}' is not applicable in {}: {}", code, year, e);
                Ok(Resolved::NotApplicable)
            }
        }
    }

    /// Replace placeholders, the inline list and the extension call.
    ///
    /// Returns `None` if one of them has no value for the year. Placeholders
    /// are substituted everywhere, including inside list values. Only the
    /// first inline list and the first extension name left after the list is
    /// resolved are evaluated; any other occurrence stays literal text and
    /// fails in the modifier chain.
    fn substitute(&self, rule_code: &RuleCode, year: i32, month: u32, day: u32) -> Result<Option<String>, ResolveError> {
        let Some(fragments) = select_list_entry(rule_code, year) else {
            trace!("Resolver: no inline list entry for {}", year);
            return Ok(None);
        };

        let extension = fragments.iter().copied().find_map(|fragment| match fragment {
            Fragment::Extension(name) => Some(name.as_str()),
            _ => None,
        });
        let extension = match extension {
            Some(name) => match self.registry.call(name, year, month, day) {
                Ok(Some(value)) => Some((name, value)),
                Ok(None) => {
                    trace!("Resolver: extension '{}' has no date in {}", name, year);
                    return Ok(None);
                }
                Err(e) => {
                    warn!("Resolver: {}", e);
                    return Err(e);
                }
            },
            None => None,
        };

        let mut text = String::new();
        for fragment in fragments {
            match fragment {
                Fragment::Text(s) => text.push_str(s),
                Fragment::Placeholder(placeholder) => match placeholder_value(*placeholder, year, month, day) {
                    Some(value) => text.push_str(&value),
                    None => {
                        trace!("Resolver: {} has no value in {}", fragment.source(), year);
                        return Ok(None);
                    }
                },
                Fragment::Extension(name) => match &extension {
                    Some((called, value)) if *called == name.as_str() => text.push_str(value),
                    _ => text.push_str(&fragment.source()),
                },
                Fragment::InlineList { .. } => text.push_str(&fragment.source()),
            }
        }

        Ok(Some(text))
    }
}

/// The fragments of `rule_code` with its first inline list replaced by the
/// fragments of the entry for `year`, or `None` if there is no such entry.
fn select_list_entry(rule_code: &RuleCode, year: i32) -> Option<Vec<&Fragment>> {
    let mut selected = Vec::with_capacity(rule_code.fragments().len());
    let mut list_seen = false;

    for fragment in rule_code.fragments() {
        match fragment {
            Fragment::InlineList { start_year, values } if !list_seen => {
                list_seen = true;
                let index = usize::try_from(i64::from(year) - i64::from(*start_year)).ok()?;
                selected.extend(values.get(index)?.fragments());
            }
            _ => selected.push(fragment),
        }
    }

    Some(selected)
}

fn placeholder_value(placeholder: Placeholder, year: i32, month: u32, day: u32) -> Option<String> {
    let value = match placeholder {
        Placeholder::Year => year.to_string(),
        Placeholder::Month => month.to_string(),
        Placeholder::Day => day.to_string(),
        Placeholder::Easter => iso(computus::easter(year, false)?),
        Placeholder::EasterOrthodox => iso(computus::easter(year, true)?),
        Placeholder::Passover => iso(computus::passover(year)?),
    };
    Some(value)
}

fn iso(date: NaiveDate) -> String {
    CalendarDate::from(date).to_string()
}
