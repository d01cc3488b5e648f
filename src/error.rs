//! Error types for parsing rule codes, applying date arithmetic and resolving rules.

use thiserror::Error;

/// Errors that can occur when parsing the modifier chain of a rule code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid condition at position {position}: {reason}")]
    InvalidCondition { position: usize, reason: String },

    #[error("unknown format letter '{found}' at position {position}")]
    UnknownFormatLetter { position: usize, found: char },

    #[error("invalid date expression at position {position}: {source}")]
    InvalidExpression {
        position: usize,
        #[source]
        source: ModifyError,
    },
}

/// Errors that can occur when parsing or applying a date-arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModifyError {
    #[error("empty date expression")]
    Empty,

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedWord { position: usize, found: String },

    #[error("number at position {position} has no unit")]
    MissingUnit { position: usize },

    #[error("expected 'of' at position {position}")]
    ExpectedOf { position: usize },

    #[error("expression needs a base date but none was given")]
    MissingBase,

    #[error("date out of range")]
    OutOfRange,
}

/// Errors surfaced to the caller when resolving a rule.
///
/// Everything else (a rule that does not apply, an unparseable modifier, a
/// missed inline list index) is reported as [`crate::Resolved::NotApplicable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("unknown extension '{{{{{0}}}}}'")]
    UnknownExtension(String),

    #[error("invalid extension name '{0}': only lowercase ascii letters are allowed")]
    InvalidExtensionName(String),
}

/// Errors that can occur when selecting rules for a region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("region filter '{0}' is not like ISO 3166")]
    InvalidRegion(String),
}
