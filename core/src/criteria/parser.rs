//! Recursive-descent parser for criteria expressions
//!
//! The grammar is deliberately small: chains of `AND`/`OR` are parsed
//! right-recursively and carry no relative precedence, so `a AND b OR c`
//! groups as `a AND (b OR c)`. Callers needing different grouping must
//! write explicit parentheses.

use crate::core::constants::MAX_CRITERIA_SIZE;

use super::ast::{Kind, Node};
use super::error::CriteriaError;
use super::lexer::{
    match_block, match_comparison, match_identifier, match_keyword, match_literal, skip_ws,
};

/// Parse a criteria string into an AST
///
/// Syntax errors are returned as [`CriteriaError`]; the tree is not checked
/// against any allow-list here, see [`super::validator::validate`].
pub fn parse(input: &str) -> Result<Node, CriteriaError> {
    if input.len() > MAX_CRITERIA_SIZE {
        return Err(CriteriaError::TooLarge {
            limit: MAX_CRITERIA_SIZE,
        });
    }
    parse_expression(input)
}

fn parse_expression(input: &str) -> Result<Node, CriteriaError> {
    let rest = skip_ws(input);
    if rest.is_empty() {
        return Err(CriteriaError::UnexpectedEof);
    }

    if rest.starts_with('(') {
        let (inner, after) = match_block(rest)?;
        let x = Node::Parentheses(Box::new(parse_expression(inner)?));
        return parse_trailing(x, after, false);
    }

    let (x, after) = parse_operand(rest)?;
    let (x, after, null_checked) = match_null_check(x, after)?;
    parse_trailing(x, after, null_checked)
}

/// Expect a literal or a selector as the next primary expression
fn parse_operand(input: &str) -> Result<(Node, &str), CriteriaError> {
    if let Some((value, kind, rest)) = match_literal(input)? {
        return Ok((Node::Literal { value, kind }, rest));
    }
    if let Some((name, rest)) = match_identifier(input) {
        return Ok((Node::selector(name), rest));
    }
    if input.is_empty() {
        Err(CriteriaError::UnexpectedEof)
    } else {
        Err(CriteriaError::MissingToken {
            expected: vec!["literal", "selector"],
        })
    }
}

/// Match an optional `IS [NOT] NULL` suffix, wrapping the operand in a
/// unary node when present
fn match_null_check(x: Node, input: &str) -> Result<(Node, &str, bool), CriteriaError> {
    let rest = skip_ws(input);
    let Some(after_is) = match_keyword(rest, "IS") else {
        return Ok((x, input, false));
    };

    let after_is = skip_ws(after_is);
    if let Some(after_not) = match_keyword(after_is, "NOT") {
        let Some(rest) = match_keyword(skip_ws(after_not), "NULL") else {
            return Err(CriteriaError::MissingToken {
                expected: vec!["NULL"],
            });
        };
        return Ok((Node::unary(x, "IS NOT NULL"), rest, true));
    }

    let Some(rest) = match_keyword(after_is, "NULL") else {
        return Err(CriteriaError::MissingToken {
            expected: vec!["NOT", "NULL"],
        });
    };
    Ok((Node::unary(x, "IS NULL"), rest, true))
}

/// Parse the operator (if any) trailing an already-parsed left operand
///
/// Absence of an operator terminates the expression successfully. After an
/// `IS [NOT] NULL` suffix only logical operators and `IN` are legal.
fn parse_trailing(x: Node, input: &str, null_checked: bool) -> Result<Node, CriteriaError> {
    let rest = skip_ws(input);
    if rest.is_empty() {
        return Ok(x);
    }

    for kw in ["AND", "OR"] {
        if let Some(after) = match_keyword(rest, kw) {
            let y = parse_expression(after)?;
            return Ok(Node::binary(x, kw, y));
        }
    }

    if let Some(after) = match_keyword(rest, "NOT") {
        let Some(after_in) = match_keyword(skip_ws(after), "IN") else {
            return Err(CriteriaError::MissingToken { expected: vec!["IN"] });
        };
        return parse_in(x, "NOT IN", after_in);
    }
    if let Some(after) = match_keyword(rest, "IN") {
        return parse_in(x, "IN", after);
    }

    if !null_checked && let Some((op, after)) = match_comparison(rest) {
        let y = parse_expression(after)?;
        return Ok(Node::binary(x, op, y));
    }

    Ok(x)
}

/// Parse the dataset operand of `IN` / `NOT IN` and any trailing logical
/// continuation of the chain
fn parse_in(x: Node, op: &'static str, input: &str) -> Result<Node, CriteriaError> {
    let rest = skip_ws(input);
    if !rest.starts_with('(') {
        return Err(CriteriaError::MissingToken { expected: vec!["("] });
    }
    let (inner, after) = match_block(rest)?;
    let dataset = parse_dataset(inner)?;
    let node = Node::binary(x, op, dataset);

    let after = skip_ws(after);
    for kw in ["AND", "OR"] {
        if let Some(rest) = match_keyword(after, kw) {
            let y = parse_expression(rest)?;
            return Ok(Node::binary(node, kw, y));
        }
    }
    Ok(node)
}

/// Parse a comma-separated list of homogeneously-kinded literals
///
/// `NULL` members are compatible with any kind. Members are kept separate
/// in the resulting dataset node so values containing the separator
/// character stay whole.
fn parse_dataset(input: &str) -> Result<Node, CriteriaError> {
    let mut rest = skip_ws(input);
    if rest.is_empty() {
        return Err(CriteriaError::UnexpectedEof);
    }

    let mut kind: Option<Kind> = None;
    let mut members: Vec<String> = Vec::new();
    loop {
        let Some((value, member_kind, after)) = match_literal(rest)? else {
            return Err(CriteriaError::MissingToken {
                expected: vec!["literal"],
            });
        };
        match (kind, member_kind) {
            (_, Kind::Null) => {}
            (None, k) => kind = Some(k),
            (Some(existing), k) if existing == k => {}
            _ => return Err(CriteriaError::InconsistentValueType),
        }
        members.push(value);

        rest = skip_ws(after);
        if rest.is_empty() {
            break;
        }
        let Some(after_sep) = rest.strip_prefix(',') else {
            return Err(CriteriaError::MissingToken { expected: vec![","] });
        };
        rest = skip_ws(after_sep);
    }

    Ok(Node::Dataset {
        members,
        kind: kind.unwrap_or(Kind::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_single_comparison() {
        let node = parse("ID = 5").unwrap();
        assert_eq!(
            node,
            Node::binary(Node::selector("ID"), "=", Node::literal("5", Kind::Int))
        );
    }

    #[test]
    fn parse_string_comparison() {
        let node = parse("NAME != 'bob'").unwrap();
        assert_eq!(
            node,
            Node::binary(
                Node::selector("NAME"),
                "!=",
                Node::literal("bob", Kind::String)
            )
        );
    }

    #[test]
    fn parse_bare_selector() {
        assert_eq!(parse("ACTIVE").unwrap(), Node::selector("ACTIVE"));
    }

    #[test]
    fn parse_empty_is_eof() {
        assert!(matches!(parse("   "), Err(CriteriaError::UnexpectedEof)));
    }

    #[test]
    fn parse_chain_is_right_leaning() {
        // A = 1 AND B = 2 parses with the whole remainder as the right
        // operand of `=`
        let node = parse("A = 1 AND B = 2").unwrap();
        assert_eq!(
            node,
            Node::binary(
                Node::selector("A"),
                "=",
                Node::binary(
                    Node::literal("1", Kind::Int),
                    "AND",
                    Node::binary(Node::selector("B"), "=", Node::literal("2", Kind::Int))
                )
            )
        );
    }

    #[test]
    fn parse_parentheses_round_trip() {
        // ((expr)) is the same tree as expr wrapped in two grouping nodes
        let inner = parse("ID = 5").unwrap();
        let wrapped = parse("((ID = 5))").unwrap();
        assert_eq!(
            wrapped,
            Node::Parentheses(Box::new(Node::Parentheses(Box::new(inner))))
        );
    }

    #[test]
    fn parse_grouped_chain() {
        let node = parse("(A = 1) AND (B = 2)").unwrap();
        match node {
            Node::Binary { x, op, y } => {
                assert_eq!(op, "AND");
                assert!(matches!(*x, Node::Parentheses(_)));
                assert!(matches!(*y, Node::Parentheses(_)));
            }
            _ => panic!("expected binary node"),
        }
    }

    #[test]
    fn parse_unmatched_parenthesis() {
        assert!(matches!(
            parse("(A = 1"),
            Err(CriteriaError::UnmatchedParenthesis)
        ));
    }

    #[test]
    fn parse_is_null() {
        let node = parse("PARENT_ID IS NULL").unwrap();
        assert_eq!(node, Node::unary(Node::selector("PARENT_ID"), "IS NULL"));
    }

    #[test]
    fn parse_is_not_null_chained() {
        let node = parse("PARENT_ID IS NOT NULL AND ID = 1").unwrap();
        match node {
            Node::Binary { x, op, .. } => {
                assert_eq!(op, "AND");
                assert_eq!(*x, Node::unary(Node::selector("PARENT_ID"), "IS NOT NULL"));
            }
            _ => panic!("expected binary node"),
        }
    }

    #[test]
    fn parse_is_without_null_is_missing_token() {
        assert!(matches!(
            parse("ID IS 5"),
            Err(CriteriaError::MissingToken { .. })
        ));
    }

    #[test]
    fn parse_no_comparison_after_null_check() {
        // IS NULL cannot be followed by another comparison; the dangling
        // operator terminates the expression without error
        let node = parse("ID IS NULL = 5").unwrap();
        assert_eq!(node, Node::unary(Node::selector("ID"), "IS NULL"));
    }

    #[test]
    fn parse_in_dataset() {
        let node = parse("ID IN (1, 2, 3)").unwrap();
        assert_eq!(
            node,
            Node::binary(
                Node::selector("ID"),
                "IN",
                Node::dataset(["1", "2", "3"], Kind::Int)
            )
        );
    }

    #[test]
    fn parse_not_in_dataset() {
        let node = parse("STATE NOT IN ('a', 'b')").unwrap();
        assert_eq!(
            node,
            Node::binary(
                Node::selector("STATE"),
                "NOT IN",
                Node::dataset(["a", "b"], Kind::String)
            )
        );
    }

    #[test]
    fn parse_in_member_with_separator_stays_whole() {
        let node = parse("NAME IN ('a,b', 'c')").unwrap();
        assert_eq!(
            node,
            Node::binary(
                Node::selector("NAME"),
                "IN",
                Node::dataset(["a,b", "c"], Kind::String)
            )
        );
    }

    #[test]
    fn parse_in_then_logical_chain() {
        let node = parse("ID IN (1, 2) AND NAME = 'x'").unwrap();
        match node {
            Node::Binary { x, op, .. } => {
                assert_eq!(op, "AND");
                assert_eq!(
                    *x,
                    Node::binary(
                        Node::selector("ID"),
                        "IN",
                        Node::dataset(["1", "2"], Kind::Int)
                    )
                );
            }
            _ => panic!("expected binary node"),
        }
    }

    #[test]
    fn parse_in_mixed_kinds_rejected() {
        assert!(matches!(
            parse("col IN (1, 'a')"),
            Err(CriteriaError::InconsistentValueType)
        ));
    }

    #[test]
    fn parse_in_null_members_are_compatible() {
        let node = parse("ID IN (1, NULL, 3)").unwrap();
        assert_eq!(
            node,
            Node::binary(
                Node::selector("ID"),
                "IN",
                Node::dataset(["1", "NULL", "3"], Kind::Int)
            )
        );
    }

    #[test]
    fn parse_in_without_parens_is_missing_token() {
        assert!(matches!(
            parse("ID IN 1"),
            Err(CriteriaError::MissingToken { .. })
        ));
    }

    #[test]
    fn parse_in_empty_dataset_is_eof() {
        assert!(matches!(
            parse("ID IN ()"),
            Err(CriteriaError::UnexpectedEof)
        ));
    }

    #[test]
    fn parse_oversized_criteria_rejected() {
        let big = "A".repeat(MAX_CRITERIA_SIZE + 1);
        assert!(matches!(parse(&big), Err(CriteriaError::TooLarge { .. })));
    }
}
