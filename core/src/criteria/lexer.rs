//! Lexer primitives for the criteria grammar
//!
//! Small byte-oriented matchers the recursive-descent parser is built from.
//! Each matcher takes the unconsumed input and returns the matched token
//! together with the remaining input, or `None` when it does not apply.

use super::ast::Kind;
use super::error::CriteriaError;

/// Comparison operators, longest first so `<=` wins over `<`
pub(crate) const COMPARISON_OPERATORS: [&str; 7] = ["<=", ">=", "!=", "<>", "=", "<", ">"];

/// Skip leading ASCII whitespace
pub(crate) fn skip_ws(input: &str) -> &str {
    input.trim_start()
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Match a balanced `(...)` block at the start of `input`
///
/// Returns the inner content (parentheses stripped) and the input following
/// the closing parenthesis. Nested blocks are honored.
pub(crate) fn match_block(input: &str) -> Result<(&str, &str), CriteriaError> {
    debug_assert!(input.starts_with('('));

    let mut depth = 0usize;
    for (i, b) in input.bytes().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[1..i], &input[i + 1..]));
                }
            }
            _ => {}
        }
    }
    Err(CriteriaError::UnmatchedParenthesis)
}

/// Match an identifier (`[A-Za-z_][A-Za-z0-9_]*`)
pub(crate) fn match_identifier(input: &str) -> Option<(&str, &str)> {
    let bytes = input.as_bytes();
    let first = *bytes.first()?;
    if !first.is_ascii_alphabetic() && first != b'_' {
        return None;
    }
    let end = bytes
        .iter()
        .position(|&b| !is_ident_byte(b))
        .unwrap_or(bytes.len());
    Some((&input[..end], &input[end..]))
}

/// Match a case-sensitive keyword followed by a word boundary
pub(crate) fn match_keyword<'a>(input: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = input.strip_prefix(keyword)?;
    match rest.as_bytes().first() {
        Some(&b) if is_ident_byte(b) => None,
        _ => Some(rest),
    }
}

/// Match a binary comparison operator
pub(crate) fn match_comparison(input: &str) -> Option<(&'static str, &str)> {
    COMPARISON_OPERATORS
        .iter()
        .find(|op| input.starts_with(**op))
        .map(|op| (*op, &input[op.len()..]))
}

/// Match a literal: quoted string, integer, boolean or `NULL`
///
/// Returns the literal's textual value (quotes stripped for strings), its
/// kind and the remaining input. Errors on an unterminated string.
pub(crate) fn match_literal(input: &str) -> Result<Option<(String, Kind, &str)>, CriteriaError> {
    if let Some(rest) = input.strip_prefix('\'') {
        let Some(end) = rest.find('\'') else {
            return Err(CriteriaError::MissingToken { expected: vec!["'"] });
        };
        return Ok(Some((rest[..end].to_string(), Kind::String, &rest[end + 1..])));
    }

    if let Some((value, rest)) = match_integer(input) {
        return Ok(Some((value.to_string(), Kind::Int, rest)));
    }

    if let Some((word, rest)) = match_identifier(input) {
        if word == "NULL" {
            return Ok(Some((word.to_string(), Kind::Null, rest)));
        }
        if word.eq_ignore_ascii_case("true") || word.eq_ignore_ascii_case("false") {
            return Ok(Some((word.to_string(), Kind::Bool, rest)));
        }
    }

    Ok(None)
}

fn match_integer(input: &str) -> Option<(&str, &str)> {
    let digits_start = usize::from(input.starts_with('-'));
    let bytes = input.as_bytes();
    if !matches!(bytes.get(digits_start), Some(b) if b.is_ascii_digit()) {
        return None;
    }
    let end = bytes[digits_start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map(|i| digits_start + i)
        .unwrap_or(bytes.len());
    Some((&input[..end], &input[end..]))
}
