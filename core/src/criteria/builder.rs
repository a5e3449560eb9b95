//! SQL fragment rendering for validated criteria ASTs
//!
//! Renders a tree into a parametrized WHERE fragment. Int and string
//! literals become `?` placeholders with their values collected in order;
//! booleans and `NULL` are rendered inline; a dataset expands into one
//! placeholder per member, so member values containing commas bind as a
//! single parameter.

use super::ast::{Kind, Node};

/// Collects SQL parameters during query building (maintains insertion order)
#[derive(Debug, Default)]
pub struct SqlParams {
    pub values: Vec<String>,
}

impl Node {
    /// Render this node as a SQL fragment with `?` placeholders,
    /// appending bound values to `params`
    pub fn to_sql(&self, params: &mut SqlParams) -> String {
        match self {
            Node::Selector { name } => name.clone(),
            Node::Literal { value, kind } => match kind {
                Kind::Null => "NULL".to_string(),
                Kind::Bool => value.clone(),
                Kind::Int | Kind::String => {
                    params.values.push(value.clone());
                    "?".to_string()
                }
            },
            Node::Dataset { members, .. } => {
                let placeholders = vec!["?"; members.len()].join(", ");
                params.values.extend(members.iter().cloned());
                format!("({placeholders})")
            }
            Node::Parentheses(inner) => format!("({})", inner.to_sql(params)),
            Node::Unary { x, op } => format!("{} {}", x.to_sql(params), op),
            Node::Binary { x, op, y } => {
                let lhs = x.to_sql(params);
                let rhs = y.to_sql(params);
                format!("{} {} {}", lhs, op, rhs)
            }
        }
    }
}
