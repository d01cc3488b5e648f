//! Lexer and parser for date-arithmetic expressions.
//!
//! Expressions are the relative formats rule authors know from common date
//! libraries: `+3 days`, `-1 week`, `next monday`, `last day of next month`,
//! `first monday of may`, optionally preceded by an absolute date such as
//! `2018-04-01` (which is how a substituted `{{easter}}` enters the chain).

use crate::ast::{DateExpr, DateItem, Unit, WeekdayMove};
use crate::error::ModifyError;
use crate::locale::Locale;
use crate::parser::tokens::{ExprToken, SpannedToken};
use chrono::Weekday;

/// Parse a date-arithmetic expression.
pub fn parse(input: &str) -> Result<DateExpr, ModifyError> {
    let tokens = ExprLexer::new(input).tokenize()?;
    let mut parser = ExprParser {
        tokens,
        index: 0,
        locale: Locale::default(),
    };
    parser.parse()
}

/// Lexer for date expressions.
pub struct ExprLexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> ExprLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the next token from the input.
    pub fn next_token(&mut self) -> Result<SpannedToken<ExprToken>, ModifyError> {
        self.skip_whitespace();
        let start = self.position;

        let Some(ch) = self.current_char() else {
            return Ok(SpannedToken {
                token: ExprToken::Eof,
                start,
                end: start,
            });
        };

        let token = match ch {
            '0'..='9' => self.lex_number_or_date()?,
            '+' | '-' => {
                self.advance();
                if !self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    return Err(ModifyError::UnexpectedWord {
                        position: start,
                        found: ch.to_string(),
                    });
                }
                let digits = self.take_while(|c| c.is_ascii_digit());
                let value = parse_number(digits, start)?;
                ExprToken::Number {
                    value: if ch == '-' { -value } else { value },
                    signed: true,
                }
            }
            c if c.is_ascii_alphabetic() => {
                let word = self.take_while(|c| c.is_ascii_alphabetic());
                ExprToken::Word(word.to_ascii_lowercase())
            }
            _ => {
                return Err(ModifyError::UnexpectedWord {
                    position: start,
                    found: ch.to_string(),
                })
            }
        };

        Ok(SpannedToken {
            token,
            start,
            end: self.position,
        })
    }

    /// Lexes `2018`, `2018-04` or `2018-04-01`.
    fn lex_number_or_date(&mut self) -> Result<ExprToken, ModifyError> {
        let start = self.position;
        let digits = self.take_while(|c| c.is_ascii_digit());

        if digits.len() == 4 && self.peek_dash_digit() {
            let year = parse_number(digits, start)? as i32;
            self.advance();
            let month = self.take_digits(2);
            let month = parse_number(month, start)? as u32;

            let day = if self.peek_dash_digit() {
                self.advance();
                let day = self.take_digits(2);
                Some(parse_number(day, start)? as u32)
            } else {
                None
            };
            return Ok(ExprToken::Date { year, month, day });
        }

        Ok(ExprToken::Number {
            value: parse_number(digits, start)?,
            signed: false,
        })
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|c| c.is_whitespace() || c == ',');
    }

    /// True if the input continues with `-` and a digit.
    fn peek_dash_digit(&self) -> bool {
        let mut rest = self.input[self.position..].chars();
        rest.next() == Some('-') && rest.next().is_some_and(|c| c.is_ascii_digit())
    }

    /// Consumes up to `max` ascii digits.
    fn take_digits(&mut self, max: usize) -> &'a str {
        let start = self.position;
        while self.position - start < max
            && self.current_char().is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
        }
        &self.input[start..self.position]
    }

    fn take_while<F>(&mut self, predicate: F) -> &'a str
    where
        F: Fn(char) -> bool,
    {
        let start = self.position;
        while let Some(ch) = self.current_char() {
            if predicate(ch) {
                self.advance();
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }

    /// Returns all remaining tokens, ending with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<SpannedToken<ExprToken>>, ModifyError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token, ExprToken::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }
}

fn parse_number(digits: &str, position: usize) -> Result<i64, ModifyError> {
    digits.parse().map_err(|_| ModifyError::UnexpectedWord {
        position,
        found: digits.to_string(),
    })
}

/// Ordinal words accepted before `<weekday> of`.
fn ordinal(word: &str) -> Option<i64> {
    let nth = match word {
        "first" | "next" => 1,
        "second" => 2,
        "third" => 3,
        "fourth" => 4,
        "fifth" => 5,
        "sixth" => 6,
        "seventh" => 7,
        "eighth" => 8,
        "ninth" => 9,
        "tenth" => 10,
        "eleventh" => 11,
        "twelfth" => 12,
        "last" => -1,
        _ => return None,
    };
    Some(nth)
}

struct ExprParser {
    tokens: Vec<SpannedToken<ExprToken>>,
    index: usize,
    locale: Locale,
}

impl ExprParser {
    fn parse(&mut self) -> Result<DateExpr, ModifyError> {
        let mut items = Vec::new();

        loop {
            let position = self.position();
            match self.current().clone() {
                ExprToken::Eof => break,
                ExprToken::Date { year, month, day } => {
                    self.advance();
                    items.push(DateItem::Date { year, month, day });
                }
                ExprToken::Number { value, .. } => {
                    self.advance();
                    let unit = self.expect_unit(position)?;
                    items.push(DateItem::Offset {
                        amount: value,
                        unit,
                    });
                }
                ExprToken::Word(word) => {
                    self.advance();
                    if let Some(item) = self.parse_word(&word, position)? {
                        items.push(item);
                    }
                }
            }
        }

        if items.is_empty() && self.tokens.len() <= 1 {
            return Err(ModifyError::Empty);
        }

        Ok(DateExpr { items })
    }

    /// Parse the item introduced by `word`. Returns `None` for words that
    /// leave the date alone (`today`, `noon`).
    fn parse_word(&mut self, word: &str, position: usize) -> Result<Option<DateItem>, ModifyError> {
        match word {
            "today" | "now" | "midnight" | "noon" => return Ok(None),
            "tomorrow" => return Ok(Some(offset(1, Unit::Day))),
            "yesterday" => return Ok(Some(offset(-1, Unit::Day))),
            "ago" => return Ok(Some(DateItem::Ago)),
            _ => {}
        }

        // `first day of`, `last day of`
        if matches!(word, "first" | "last")
            && self.peek_word() == Some("day")
            && self.peek_word_at(1) == Some("of")
        {
            self.advance();
            self.advance();
            return Ok(Some(if word == "first" {
                DateItem::FirstDayOf
            } else {
                DateItem::LastDayOf
            }));
        }

        // `second monday of`, `last friday of`
        if let Some(nth) = ordinal(word) {
            if let Some(weekday) = self.peek_weekday() {
                if self.peek_word_at(1) == Some("of") {
                    self.advance();
                    self.advance();
                    return Ok(Some(DateItem::NthWeekdayOf { nth, weekday }));
                }
            }
        }

        // `next monday`, `last week`, `this month`
        if let Some(step) = match word {
            "next" => Some(1),
            "last" | "previous" => Some(-1),
            "this" => Some(0),
            _ => None,
        } {
            let next_position = self.position();
            if let Some(weekday) = self.peek_weekday() {
                self.advance();
                let movement = match step {
                    1 => WeekdayMove::Next,
                    -1 => WeekdayMove::Previous,
                    _ => WeekdayMove::ThisOrNext,
                };
                return Ok(Some(DateItem::Weekday { weekday, movement }));
            }
            let unit = self.expect_unit(next_position)?;
            return Ok(Some(offset(step, unit)));
        }

        if let Some(weekday) = self.locale.weekday_from_name(word) {
            return Ok(Some(DateItem::Weekday {
                weekday,
                movement: WeekdayMove::ThisOrNext,
            }));
        }

        if let Some(month) = self.locale.month_from_name(word) {
            let day = self.take_day_of_month();
            return Ok(Some(DateItem::MonthName { month, day }));
        }

        if ordinal(word).is_some() {
            return Err(ModifyError::ExpectedOf { position });
        }

        Err(ModifyError::UnexpectedWord {
            position,
            found: word.to_string(),
        })
    }

    /// After a month name: an unsigned number that is not followed by a unit.
    fn take_day_of_month(&mut self) -> Option<u32> {
        let value = match self.current() {
            ExprToken::Number {
                value,
                signed: false,
            } => *value,
            _ => return None,
        };
        let followed_by_unit = self
            .peek_word_at(1)
            .is_some_and(|w| w.parse::<Unit>().is_ok());
        if followed_by_unit || !(1..=31).contains(&value) {
            return None;
        }
        self.advance();
        Some(value as u32)
    }

    fn expect_unit(&mut self, position: usize) -> Result<Unit, ModifyError> {
        let unit = match self.current() {
            ExprToken::Word(word) => word.parse::<Unit>().ok(),
            _ => None,
        };
        match unit {
            Some(unit) => {
                self.advance();
                Ok(unit)
            }
            None => Err(ModifyError::MissingUnit { position }),
        }
    }

    fn current(&self) -> &ExprToken {
        self.tokens
            .get(self.index)
            .map_or(&ExprToken::Eof, |t| &t.token)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.index).map_or(0, |t| t.start)
    }

    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }

    /// The word `n` tokens after the current one.
    fn peek_word_at(&self, n: usize) -> Option<&str> {
        match self.tokens.get(self.index + n).map(|t| &t.token) {
            Some(ExprToken::Word(word)) => Some(word.as_str()),
            _ => None,
        }
    }

    fn peek_word(&self) -> Option<&str> {
        self.peek_word_at(0)
    }

    fn peek_weekday(&self) -> Option<Weekday> {
        self.peek_word().and_then(|w| self.locale.weekday_from_name(w))
    }
}

fn offset(amount: i64, unit: Unit) -> DateItem {
    DateItem::Offset { amount, unit }
}
