//! Resolution options and configuration.

/// Options for resolving rules.
///
/// A rule without its own month or day takes them from here. Rule codes see
/// them as `{{month}}` and `{{day}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ResolveOptions {
    /// Month used when a rule has none (1-12).
    pub default_month: u32,
    /// Day used when a rule has none (1-31).
    pub default_day: u32,
}

impl ResolveOptions {
    pub fn new(default_month: u32, default_day: u32) -> Self {
        ResolveOptions {
            default_month,
            default_day,
        }
    }
}

/// January 1st.
impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions {
            default_month: 1,
            default_day: 1,
        }
    }
}
