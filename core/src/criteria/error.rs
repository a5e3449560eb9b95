//! Criteria error types
//!
//! Syntax and semantic faults are both caller-input errors: they must be
//! surfaced as client-visible validation failures before any SQL reaches a
//! database driver.

use thiserror::Error;

use super::ast::Kind;

#[derive(Error, Debug)]
pub enum CriteriaError {
    /// A primary expression was required but the input ended
    #[error("unexpected EOF")]
    UnexpectedEof,

    /// An opening parenthesis without a matching close
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,

    /// A required token was absent; lists the tokens that were legal
    #[error("missing expected token, legal tokens: {}", .expected.join(", "))]
    MissingToken { expected: Vec<&'static str> },

    /// An `IN` dataset mixed literal kinds other than `NULL`
    #[error("inconsistent value type")]
    InconsistentValueType,

    /// A parameter value opened a `(` block that never closes
    #[error("contains unclosed expressions")]
    UnclosedExpression,

    /// Criteria string exceeds the configured maximum size
    #[error("criteria exceeds maximum size of {limit} bytes")]
    TooLarge { limit: usize },

    /// Column is not in the view's allow-list
    #[error("cannot filter by column: {0}")]
    UnknownColumn(String),

    /// Literal kind does not match the column's declared kind
    #[error("type mismatch on column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: Kind,
        actual: Kind,
    },

    /// Constant-to-constant comparison, rejected to block tautologies
    #[error("literal compared to literal abuses criteria")]
    LiteralComparison,

    /// Operand shape the validator does not support
    #[error("unsupported operand")]
    UnsupportedOperand,

    /// Literal carrying a comment marker or raw line break
    #[error("literal value contains a comment marker or line break")]
    ForbiddenLiteral,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_display() {
        let err = CriteriaError::MissingToken {
            expected: vec!["AND", "OR"],
        };
        assert_eq!(
            err.to_string(),
            "missing expected token, legal tokens: AND, OR"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = CriteriaError::TypeMismatch {
            column: "ID".to_string(),
            expected: Kind::Int,
            actual: Kind::String,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch on column ID: expected int, got string"
        );
    }

    #[test]
    fn test_unknown_column_display() {
        let err = CriteriaError::UnknownColumn("SECRET".to_string());
        assert_eq!(err.to_string(), "cannot filter by column: SECRET");
    }
}
