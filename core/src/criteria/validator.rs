//! Criteria validation against a view's column allow-list
//!
//! Walks a parsed AST and rejects disallowed columns, kind mismatches,
//! constant comparisons and literals carrying SQL comment markers. An empty
//! allow-list means "no restriction" and the walk is skipped entirely.

use std::collections::HashMap;

use super::ast::{Kind, Node};
use super::error::CriteriaError;

/// Validate a criteria AST against a column allow-list
///
/// `allowed` maps permitted column names to their expected literal kind.
/// A `NULL` literal is compatible with any column kind.
pub fn validate(node: &Node, allowed: &HashMap<String, Kind>) -> Result<(), CriteriaError> {
    if allowed.is_empty() {
        return Ok(());
    }
    check(node, allowed)
}

fn check(node: &Node, allowed: &HashMap<String, Kind>) -> Result<(), CriteriaError> {
    match node {
        Node::Parentheses(inner) => check(inner, allowed),
        Node::Unary { x, .. } => check(x, allowed),
        Node::Selector { name } => require_column(name, allowed).map(|_| ()),
        Node::Literal { value, .. } => require_safe_literal(value),
        Node::Dataset { members, .. } => require_safe_members(members),
        Node::Binary { x, y, .. } => match &**x {
            // composite left operand: recurse; the outer comparison is not
            // separately checked
            Node::Binary { .. } | Node::Parentheses(_) | Node::Unary { .. } => {
                check(x, allowed)?;
                check_continuation(y, allowed)
            }
            Node::Selector { name } => {
                let expected = require_column(name, allowed)?;
                match &**y {
                    Node::Literal { value, kind } => {
                        require_safe_literal(value)?;
                        require_kind(name, expected, *kind)
                    }
                    Node::Dataset { members, kind } => {
                        require_safe_members(members)?;
                        require_kind(name, expected, *kind)
                    }
                    // selector-to-selector comparison only re-checks the
                    // left name; the right name is intentionally not
                    // verified here (see DESIGN.md)
                    Node::Selector { .. } => require_column(name, allowed).map(|_| ()),
                    _ => check_continuation(y, allowed),
                }
            }
            Node::Literal { value, .. } => {
                require_safe_literal(value)?;
                match &**y {
                    Node::Literal { .. } | Node::Dataset { .. } => {
                        Err(CriteriaError::LiteralComparison)
                    }
                    Node::Selector { name } => require_column(name, allowed).map(|_| ()),
                    _ => check_continuation(y, allowed),
                }
            }
            // a dataset never parses as a left operand
            Node::Dataset { .. } => Err(CriteriaError::UnsupportedOperand),
        },
    }
}

/// Recurse into the right operand of a chain; anything but a composite
/// node there is an unsupported operand shape
fn check_continuation(y: &Node, allowed: &HashMap<String, Kind>) -> Result<(), CriteriaError> {
    match y {
        Node::Binary { .. } | Node::Parentheses(_) | Node::Unary { .. } => check(y, allowed),
        _ => Err(CriteriaError::UnsupportedOperand),
    }
}

/// Check a literal kind against the column's declared kind; `NULL` is
/// compatible with every column kind
fn require_kind(column: &str, expected: Kind, actual: Kind) -> Result<(), CriteriaError> {
    if actual != Kind::Null && actual != expected {
        return Err(CriteriaError::TypeMismatch {
            column: column.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

fn require_column(name: &str, allowed: &HashMap<String, Kind>) -> Result<Kind, CriteriaError> {
    allowed
        .get(name)
        .copied()
        .ok_or_else(|| CriteriaError::UnknownColumn(name.to_string()))
}

/// Reject literals that could smuggle a SQL comment or break out of a
/// single-line statement
fn require_safe_literal(value: &str) -> Result<(), CriteriaError> {
    if value.contains('\n') || value.contains('\r') || value.contains("--") || value.contains('#')
    {
        return Err(CriteriaError::ForbiddenLiteral);
    }
    Ok(())
}

fn require_safe_members(members: &[String]) -> Result<(), CriteriaError> {
    members.iter().try_for_each(|m| require_safe_literal(m))
}
