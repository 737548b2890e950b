use crate::ast::AstNode;
use crate::error::ValueError;
use crate::lexer::TokenKind;
use serde::Serialize;

/// Plain data view of a parsed document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Null,
    Array(Vec<Value>),
}

/// Converts an AST into data. An empty document becomes `Null`.
pub(crate) fn to_value(node: &AstNode) -> Result<Value, ValueError> {
    match node {
        AstNode::Empty => Ok(Value::Null),
        AstNode::List(list) => list
            .items()
            .iter()
            .map(to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AstNode::Value(value) => {
            let token = value.token();
            match token.kind {
                TokenKind::Int => token.value.parse::<i64>().map(Value::Int).map_err(|_| {
                    ValueError::IntegerOutOfRange {
                        literal: token.value.clone(),
                        span: token.span(),
                    }
                }),
                // Scanned floats are always `digits.digits`, which f64 accepts.
                TokenKind::Float => Ok(Value::Float(token.value.parse().unwrap_or(f64::INFINITY))),
                TokenKind::String => Ok(Value::String(token.value.clone())),
                _ => Ok(Value::Null),
            }
        }
    }
}
