//! Lexer for rule code templates.
//!
//! Splits a rule code into literal text and `{{...}}` groups. Groups may
//! contain further groups. The lexer never fails: a `{{` without a matching
//! `}}` is literal text.

use crate::parser::tokens::{SpannedToken, Token};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A lexer for rule code templates.
pub struct Lexer<'a> {
    /// The input string being tokenized.
    pub(crate) input: &'a str,
    /// The current position in the input.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the next token from the input.
    pub fn next_token(&mut self) -> SpannedToken<Token> {
        let start = self.position;

        if start >= self.input.len() {
            return SpannedToken {
                token: Token::Eof,
                start,
                end: start,
            };
        }

        if let Some(content) = self.braced_content() {
            let content = content.to_string();
            self.position += OPEN.len() + content.len() + CLOSE.len();
            return SpannedToken {
                token: Token::Braced(content),
                start,
                end: self.position,
            };
        }

        // A text run always consumes at least one character, so an unmatched
        // `{{` at the current position becomes text.
        let first_len = self.remaining().chars().next().map_or(0, char::len_utf8);
        let rest = &self.remaining()[first_len..];
        let len = first_len + rest.find(OPEN).unwrap_or(rest.len());
        self.position += len;

        SpannedToken {
            token: Token::Text(self.input[start..self.position].to_string()),
            start,
            end: self.position,
        }
    }

    /// Returns the remaining input as a string slice.
    fn remaining(&self) -> &str {
        &self.input[self.position..]
    }

    /// The content of a `{{...}}` group starting at the current position.
    ///
    /// Groups nest, so the content of `{{2018:{{year}}-05-01}}` is
    /// `2018:{{year}}-05-01`. A group that is never closed has no content.
    fn braced_content(&self) -> Option<&'a str> {
        let inner = self.input[self.position..].strip_prefix(OPEN)?;
        let bytes = inner.as_bytes();
        let mut depth = 1usize;
        let mut i = 0;
        while i + 1 < bytes.len() {
            match &bytes[i..i + 2] {
                b"{{" => {
                    depth += 1;
                    i += 2;
                }
                b"}}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&inner[..i]);
                    }
                    i += 2;
                }
                _ => i += 1,
            }
        }
        None
    }

    /// Returns all remaining tokens as a vector, ending with `Eof`.
    /// This consumes the lexer.
    pub fn tokenize(mut self) -> Vec<SpannedToken<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = matches!(token.token, Token::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let mut lexer = Lexer::new("");
        assert!(matches!(lexer.next_token().token, Token::Eof));
    }

    #[test]
    fn test_braced_and_text() {
        assert_eq!(
            tokens("{{easter}}-46 days"),
            vec![
                Token::Braced("easter".into()),
                Token::Text("-46 days".into()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_unclosed_is_text() {
        assert_eq!(
            tokens("{{x|{{hebrew}}"),
            vec![
                Token::Text("{{x|".into()),
                Token::Braced("hebrew".into()),
                Token::Eof
            ]
        );
        assert_eq!(tokens("a{{b"), vec![Token::Text("a".into()), Token::Text("{{b".into()), Token::Eof]);
    }

    #[test]
    fn test_nested_groups() {
        assert_eq!(
            tokens("{{2018:{{year}}-05-01,{{islamic}}}}|+1 day"),
            vec![
                Token::Braced("2018:{{year}}-05-01,{{islamic}}".into()),
                Token::Text("|+1 day".into()),
                Token::Eof
            ]
        );
        assert_eq!(
            tokens("{{?D=Sat}}{{easter}}"),
            vec![
                Token::Braced("?D=Sat".into()),
                Token::Braced("easter".into()),
                Token::Eof
            ]
        );
    }
}
