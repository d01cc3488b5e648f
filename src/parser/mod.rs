//! Parser for rule codes.
//!
//! A rule code goes through two grammars:
//! - the template grammar (`{{year}}`, `{{2018:a,b}}`, `{{hebrew}}`, text),
//!   handled by [`parse`];
//! - after substitution, the modifier chain grammar (`|`-separated segments,
//!   optionally guarded by `{{?D=Sat,Sun}}`), handled by [`parse_chain`].

pub mod lexer;
pub mod relative;
pub mod tokens;

use crate::ast::{Condition, FormatLetter, Fragment, Modifier, ModifierChain, Placeholder, RuleCode};
use crate::error::ParseError;
use lexer::Lexer;
use tokens::Token;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const CONDITION_OPEN: &str = "{{?";

/// Parse a rule code string into a template.
pub fn parse(code: &str) -> RuleCode {
    RuleCode::from_fragments(parse_fragments(code))
}

fn parse_fragments(code: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for spanned in Lexer::new(code).tokenize() {
        match spanned.token {
            Token::Eof => break,
            Token::Text(text) => push_text(&mut fragments, &text),
            Token::Braced(content) => parse_braced(&mut fragments, &content),
        }
    }

    fragments
}

/// Append text, merging it with a preceding text fragment.
fn push_text(fragments: &mut Vec<Fragment>, text: &str) {
    if let Some(Fragment::Text(last)) = fragments.last_mut() {
        last.push_str(text);
    } else {
        fragments.push(Fragment::Text(text.to_string()));
    }
}

/// Classify the content of a `{{...}}` group.
fn parse_braced(fragments: &mut Vec<Fragment>, content: &str) {
    if let Ok(placeholder) = content.parse::<Placeholder>() {
        fragments.push(Fragment::Placeholder(placeholder));
        return;
    }

    if let Some(list) = try_parse_inline_list(content) {
        fragments.push(list);
        return;
    }

    if is_extension_name(content) {
        fragments.push(Fragment::Extension(content.to_string()));
        return;
    }

    // Conditions and anything unknown belong to the modifier chain, but
    // placeholders inside them are still substituted.
    push_text(fragments, OPEN);
    for fragment in parse_fragments(content) {
        match fragment {
            Fragment::Text(text) => push_text(fragments, &text),
            fragment => fragments.push(fragment),
        }
    }
    push_text(fragments, CLOSE);
}

/// Try to parse `2018:a,b,c` as an inline year list. Each value is itself a
/// template, so `{{2018:{{year}}-05-01,{{islamic}}}}` is a list.
fn try_parse_inline_list(content: &str) -> Option<Fragment> {
    let (start, values) = content.split_once(':')?;
    if start.len() != 4 || !start.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some(Fragment::InlineList {
        start_year: start.parse().ok()?,
        values: split_values(values).into_iter().map(parse).collect(),
    })
}

/// Split on commas that are not inside a nested `{{...}}` group.
fn split_values(values: &str) -> Vec<&str> {
    let bytes = values.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"{{") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"}}") {
            depth = depth.saturating_sub(1);
            i += 2;
        } else {
            if bytes[i] == b',' && depth == 0 {
                parts.push(&values[start..i]);
                start = i + 1;
            }
            i += 1;
        }
    }
    parts.push(&values[start..]);
    parts
}

/// Extension names are lowercase ascii words.
pub fn is_extension_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_lowercase())
}

/// Parse substituted rule code text into a modifier chain.
pub fn parse_chain(text: &str) -> Result<ModifierChain, ParseError> {
    let mut modifiers = Vec::new();
    let mut offset = 0;

    for segment in text.split('|') {
        modifiers.push(parse_modifier(segment, offset)?);
        offset += segment.len() + 1;
    }

    Ok(ModifierChain { modifiers })
}

/// Parse one `|`-separated segment starting at byte `offset` of the chain.
fn parse_modifier(segment: &str, offset: usize) -> Result<Modifier, ParseError> {
    let trimmed = segment.trim();
    let position = offset + (segment.len() - segment.trim_start().len());

    let Some(rest) = trimmed.strip_prefix(CONDITION_OPEN) else {
        let expr = relative::parse(trimmed)
            .map_err(|source| ParseError::InvalidExpression { position, source })?;
        return Ok(Modifier::Plain(expr));
    };

    let body_start = position + CONDITION_OPEN.len();
    let close = rest.find(CLOSE).ok_or_else(|| ParseError::InvalidCondition {
        position,
        reason: "missing '}}'".to_string(),
    })?;

    let condition = parse_condition(&rest[..close], body_start)?;

    let then_text = rest[close + CLOSE.len()..].trim();
    let then = if then_text.is_empty() {
        None
    } else {
        let then_position = body_start + close + CLOSE.len();
        let expr = relative::parse(then_text).map_err(|source| ParseError::InvalidExpression {
            position: then_position,
            source,
        })?;
        Some(expr)
    };

    Ok(Modifier::Conditional { condition, then })
}

/// Parse `D=Sat,Sun` or `D!=Fri` starting at byte `position`.
fn parse_condition(body: &str, position: usize) -> Result<Condition, ParseError> {
    let eq = body.find('=').ok_or_else(|| ParseError::InvalidCondition {
        position,
        reason: "missing '=' or '!='".to_string(),
    })?;

    let negated = body[..eq].ends_with('!');
    let letters = if negated { &body[..eq - 1] } else { &body[..eq] };

    if letters.is_empty() {
        return Err(ParseError::InvalidCondition {
            position,
            reason: "missing format letters".to_string(),
        });
    }

    let mut format = Vec::with_capacity(letters.len());
    for (i, ch) in letters.char_indices() {
        let letter = FormatLetter::from_char(ch).ok_or(ParseError::UnknownFormatLetter {
            position: position + i,
            found: ch,
        })?;
        format.push(letter);
    }

    let values: Vec<String> = body[eq + 1..]
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();

    if values.is_empty() {
        return Err(ParseError::InvalidCondition {
            position,
            reason: "missing values".to_string(),
        });
    }

    Ok(Condition {
        format,
        negated,
        values,
    })
}
