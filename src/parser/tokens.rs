//! Token types for the rule code and date expression lexers.

/// A token in a rule code template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A run of literal text, including any `{{` that is not closed.
    Text(String),
    /// The content between `{{` and `}}`.
    Braced(String),
    Eof,
}

/// A token in a date-arithmetic expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprToken {
    /// `2018-04-01` or `2018-04`
    Date {
        year: i32,
        month: u32,
        day: Option<u32>,
    },
    /// A number; `signed` is true if it carried an explicit `+` or `-`.
    Number { value: i64, signed: bool },
    /// An alphabetic word, lowercased.
    Word(String),
    Eof,
}

/// A token with its position in the source.
#[derive(Debug, Clone)]
pub struct SpannedToken<T> {
    pub token: T,
    pub start: usize,
    pub end: usize,
}
