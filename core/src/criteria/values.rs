//! Parameter value decoding
//!
//! Decodes one raw query-string value into an ordered sequence of
//! sub-values. A sub-value wrapped in `(...)` is yielded as one raw block
//! with the parentheses stripped and nesting honored; everything else is
//! split on the separator as-is. Two adjacent separators yield an empty
//! sub-value between them, which callers use for positional "skip"
//! semantics.

use crate::core::constants::DEFAULT_VALUE_SEPARATOR;

use super::error::CriteriaError;

/// One decoded sub-value of a raw query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub value: String,
}

/// Single-owner cursor over one raw parameter string
///
/// Cheap to construct per request; not shareable across threads while
/// iterating.
pub struct ParamValues<'a> {
    input: &'a str,
    separator: char,
    /// Cursor into `input`; one past the end marks exhaustion
    pos: usize,
}

impl<'a> ParamValues<'a> {
    /// Iterate `input` with the default `,` separator
    pub fn new(input: &'a str) -> Self {
        Self::with_separator(input, DEFAULT_VALUE_SEPARATOR)
    }

    /// Iterate `input` with a caller-chosen separator
    pub fn with_separator(input: &'a str, separator: char) -> Self {
        // empty input yields zero sub-values, not one empty one
        let pos = if input.is_empty() { 1 } else { 0 };
        Self {
            input,
            separator,
            pos,
        }
    }

    /// Whether another sub-value is available
    pub fn has(&self) -> bool {
        self.pos <= self.input.len()
    }

    /// Find the index of the close parenthesis matching the opening one at
    /// the start of `rest`, honoring nesting
    fn matching_close(rest: &str) -> Option<usize> {
        let mut depth = 0usize;
        for (i, b) in rest.bytes().enumerate() {
            match b {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

impl Iterator for ParamValues<'_> {
    type Item = Result<Param, CriteriaError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has() {
            return None;
        }
        let rest = &self.input[self.pos..];

        if rest.starts_with('(') {
            let Some(close) = Self::matching_close(rest) else {
                self.pos = self.input.len() + 1;
                return Some(Err(CriteriaError::UnclosedExpression));
            };
            let value = rest[1..close].to_string();
            let after = &rest[close + 1..];
            // advance past the separator following the block; stray bytes
            // between the block and the separator are skipped so later
            // values are still yielded
            match after.find(self.separator) {
                Some(i) => self.pos += close + 1 + i + self.separator.len_utf8(),
                None => self.pos = self.input.len() + 1,
            }
            return Some(Ok(Param { value }));
        }

        match rest.find(self.separator) {
            Some(i) => {
                let value = rest[..i].to_string();
                self.pos += i + self.separator.len_utf8();
                Some(Ok(Param { value }))
            }
            None => {
                self.pos = self.input.len() + 1;
                Some(Ok(Param {
                    value: rest.to_string(),
                }))
            }
        }
    }
}
