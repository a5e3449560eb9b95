//! Criteria AST node and value-kind definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Value kind of a criteria literal
///
/// Also used in view configuration to declare the expected kind of each
/// filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Bool,
    Int,
    String,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => write!(f, "null"),
            Kind::Bool => write!(f, "bool"),
            Kind::Int => write!(f, "int"),
            Kind::String => write!(f, "string"),
        }
    }
}

/// A node of a parsed criteria expression
///
/// The parser produces right-leaning trees: in `A = 1 AND B = 2` the right
/// operand of the `=` node is itself the parsed remainder `1 AND B = 2`.
/// Operator precedence between `AND` and `OR` is deliberately not encoded
/// in the grammar; callers group explicitly with parentheses.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Two-operand expression (logical, comparison or membership)
    Binary {
        x: Box<Node>,
        op: String,
        y: Box<Node>,
    },
    /// Single-operand suffix expression (`IS NULL` / `IS NOT NULL`)
    Unary { x: Box<Node>, op: String },
    /// Literal value with its textual representation preserved verbatim
    ///
    /// For string literals the surrounding quotes are stripped.
    Literal { value: String, kind: Kind },
    /// `IN` / `NOT IN` member list; `kind` is the common member kind
    ///
    /// Members stay separate so a string member containing the textual
    /// separator survives rendering intact.
    Dataset { members: Vec<String>, kind: Kind },
    /// Column/field reference
    Selector { name: String },
    /// Explicit grouping
    Parentheses(Box<Node>),
}

impl Node {
    pub fn binary(x: Node, op: impl Into<String>, y: Node) -> Self {
        Node::Binary {
            x: Box::new(x),
            op: op.into(),
            y: Box::new(y),
        }
    }

    pub fn unary(x: Node, op: impl Into<String>) -> Self {
        Node::Unary {
            x: Box::new(x),
            op: op.into(),
        }
    }

    pub fn literal(value: impl Into<String>, kind: Kind) -> Self {
        Node::Literal {
            value: value.into(),
            kind,
        }
    }

    pub fn dataset<I, S>(members: I, kind: Kind) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::Dataset {
            members: members.into_iter().map(Into::into).collect(),
            kind,
        }
    }

    pub fn selector(name: impl Into<String>) -> Self {
        Node::Selector { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Null.to_string(), "null");
        assert_eq!(Kind::Bool.to_string(), "bool");
        assert_eq!(Kind::Int.to_string(), "int");
        assert_eq!(Kind::String.to_string(), "string");
    }

    #[test]
    fn test_kind_deserialize_lowercase() {
        let kind: Kind = serde_json::from_str("\"int\"").unwrap();
        assert_eq!(kind, Kind::Int);
    }

    #[test]
    fn test_node_constructors() {
        let node = Node::binary(
            Node::selector("ID"),
            "=",
            Node::literal("5", Kind::Int),
        );
        match node {
            Node::Binary { x, op, y } => {
                assert_eq!(*x, Node::selector("ID"));
                assert_eq!(op, "=");
                assert_eq!(*y, Node::literal("5", Kind::Int));
            }
            _ => panic!("expected binary node"),
        }
    }
}
