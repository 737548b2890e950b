use crate::ast::AstNode;
use crate::error::NpcJsonError;
use crate::lexer::{Scanner, Token};
use crate::parser::Parser;
use crate::serialization::{to_value, Value};
use log::debug;
use serde::{Serialize, Serializer};

/// The result of a successful scan and parse of an npc-json document.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Every scanned token, ending with `EndOfInput`.
    pub tokens: Vec<Token>,
    pub root: AstNode,
}

impl Serialize for Analysis {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let value = self.to_value().map_err(serde::ser::Error::custom)?;
        value.serialize(serializer)
    }
}

impl Analysis {
    /// Converts the document into a plain, serializable `Value`.
    ///
    /// # Errors
    /// Returns a `NpcJsonError::Value` if an integer does not fit in an `i64`.
    pub fn to_value(&self) -> Result<Value, NpcJsonError> {
        Ok(to_value(&self.root)?)
    }

    /// Serializes the document into a pretty-printed JSON string.
    ///
    /// # Errors
    /// Returns a `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self)
    }

    /// Serializes the document into a YAML string.
    ///
    /// # Errors
    /// Returns a `serde_yaml::Error` if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self)
    }
}

/// Scans and parses an npc-json source string.
///
/// This is the primary entry point. The two stages can also be driven
/// separately through [`crate::scan`] and [`crate::parse`].
///
/// # Arguments
///
/// * `source` - The npc-json source text.
/// * `file_name` - The name of the source, only used in log output.
///
/// # Errors
///
/// Returns a `NpcJsonError` if scanning or parsing fails. Use
/// [`NpcJsonError::into_report`] to render it against the source.
pub fn analyze(source: &str, file_name: &str) -> Result<Analysis, NpcJsonError> {
    debug!("analyzing {file_name} ({} bytes)", source.len());
    let tokens = Scanner::new(source).scan()?;
    let root = Parser::new(tokens.clone()).parse()?;
    Ok(Analysis { tokens, root })
}
