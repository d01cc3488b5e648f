//! holidate - movable holiday dates from compact rule codes
//!
//! This crate resolves holiday rules for a year: fixed dates, Easter and
//! Passover based dates, dates in the Islamic and Hebrew calendars, and
//! weekday shifts such as "if it falls on a weekend, the next Monday".
//!
//! ```
//! use holidate::{resolve, CalendarDate, HolidayRule, Resolved};
//!
//! // Ash Wednesday
//! let rule = HolidayRule::movable(1, "{{easter}}-46 days");
//! assert_eq!(
//!     resolve(&rule, 2018, 1, 1),
//!     Ok(Resolved::Date(CalendarDate::new(2018, 2, 14)))
//! );
//! ```

pub mod ast;
pub mod computus;
pub mod date;
pub mod error;
pub mod extension;
pub mod hebrew;
pub mod hijri;
pub mod interpreter;
pub mod modifier;
pub mod options;
pub mod parser;
pub mod rule;
pub mod ruleset;
pub mod year_spec;

mod cache;
mod locale;

pub use ast::{DateExpr, ModifierChain, RuleCode};
pub use date::{CalendarDate, Resolved};
pub use error::{ModifyError, ParseError, RegionError, ResolveError};
pub use extension::{ExtensionFn, ExtensionRegistry};
pub use interpreter::Resolver;
pub use locale::Locale;
pub use options::ResolveOptions;
pub use rule::{HolidayKind, HolidayRule};
pub use ruleset::RuleSet;
pub use year_spec::applies;

use std::sync::OnceLock;

fn default_resolver() -> &'static Resolver {
    static RESOLVER: OnceLock<Resolver> = OnceLock::new();
    RESOLVER.get_or_init(Resolver::default)
}

/// Resolve `rule` for `year` with the built-in extensions.
///
/// This is a convenience function that uses a shared default [`Resolver`].
/// For custom extensions, build a [`Resolver`] and call
/// [`HolidayRule::resolve`].
pub fn resolve(rule: &HolidayRule, year: i32, default_month: u32, default_day: u32) -> Result<Resolved, ResolveError> {
    rule.resolve(default_resolver(), year, default_month, default_day)
}

/// Evaluate a rule code for `year` with the built-in extensions.
pub fn interpret(code: &str, year: i32, month: u32, day: u32) -> Result<Resolved, ResolveError> {
    default_resolver().interpret(code, year, month, day)
}
