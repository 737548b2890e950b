pub mod api;
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod utils;
mod serialization;

pub use api::{analyze, Analysis};
pub use ast::{AstKind, AstNode, ListNode, ValueNode};
pub use error::{NpcJsonError, ParserError, ScannerError, ValueError};
pub use lexer::{scan, Scanner, Token, TokenKind};
pub use parser::{parse, Parser};
pub use serialization::Value;
