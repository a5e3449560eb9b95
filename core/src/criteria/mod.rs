//! Criteria filter language
//!
//! Turns an untrusted textual boolean filter expression into a validated,
//! parametrized SQL fragment:
//!
//! 1. [`parse`] builds an AST with a recursive-descent parser,
//! 2. [`validate`] checks it against the view's column allow-list,
//! 3. [`Node::to_sql`] renders a `?`-placeholder fragment with the bound
//!    values collected in order.
//!
//! [`compile`] runs all three steps. Raw multi-value query parameters are
//! decoded separately by [`ParamValues`].

mod ast;
mod builder;
mod error;
mod lexer;
mod parser;
mod validator;
mod values;

use std::collections::HashMap;

pub use ast::{Kind, Node};
pub use builder::SqlParams;
pub use error::CriteriaError;
pub use parser::parse;
pub use validator::validate;
pub use values::{Param, ParamValues};

/// A parsed, validated and rendered criteria expression
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCriteria {
    /// WHERE-clause fragment with `?` placeholders
    pub sql: String,
    /// Bound values in placeholder order
    pub params: Vec<String>,
}

/// Parse, validate and render a criteria string in one step
pub fn compile(
    input: &str,
    allowed: &HashMap<String, Kind>,
) -> Result<CompiledCriteria, CriteriaError> {
    let node = parse(input)?;
    validate(&node, allowed)?;
    let mut params = SqlParams::default();
    let sql = node.to_sql(&mut params);
    Ok(CompiledCriteria {
        sql,
        params: params.values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowed() -> HashMap<String, Kind> {
        HashMap::from([
            ("ID".to_string(), Kind::Int),
            ("NAME".to_string(), Kind::String),
        ])
    }

    #[test]
    fn compile_valid_criteria() {
        let compiled = compile("ID = 5 AND NAME = 'bob'", &allowed()).unwrap();
        assert_eq!(compiled.sql, "ID = ? AND NAME = ?");
        assert_eq!(compiled.params, vec!["5", "bob"]);
    }

    #[test]
    fn compile_rejects_bad_syntax() {
        assert!(matches!(
            compile("(ID = 5", &allowed()),
            Err(CriteriaError::UnmatchedParenthesis)
        ));
    }

    #[test]
    fn compile_rejects_disallowed_column() {
        assert!(matches!(
            compile("SECRET = 5", &allowed()),
            Err(CriteriaError::UnknownColumn(_))
        ));
    }
}
