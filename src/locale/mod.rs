//! Day and month names used to render and read dates.

mod builtin;

pub use builtin::Locale;
