use crate::lexer::TokenKind;
use crate::utils::get_line_and_column;
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum NpcJsonError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Scanner(#[from] ScannerError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Value(#[from] ValueError),
}

impl NpcJsonError {
    /// Byte span of the offending input.
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            NpcJsonError::Scanner(err) => err.span(),
            NpcJsonError::Parser(err) => err.span(),
            NpcJsonError::Value(err) => err.span(),
        }
    }

    /// 1-based line and column of the error inside `source`.
    #[must_use]
    pub fn line_and_column(&self, source: &str) -> (usize, usize) {
        get_line_and_column(source, self.span().offset())
    }

    /// Attaches the source text so the error renders with a labelled snippet.
    #[must_use]
    pub fn into_report(self, name: &str, source: &str) -> Report {
        Report::new(self).with_source_code(NamedSource::new(name, source.to_string()))
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ScannerError {
    #[error("Invalid character '{found}'")]
    #[diagnostic(
        code(scanner::invalid_character),
        help("Only numbers, null, double-quoted names, comments and the punctuation [ ] {{ }} : , are allowed.")
    )]
    InvalidCharacter {
        found: char,
        #[label("this character starts no token")]
        span: SourceSpan,
    },

    #[error("Invalid float literal")]
    #[diagnostic(
        code(scanner::invalid_float),
        help("A '.' in a number must be followed by at least one digit, e.g. `2.0`.")
    )]
    InvalidFloat {
        #[label("expected a digit after the '.'")]
        span: SourceSpan,
    },

    #[error("Invalid string '{lexeme}'")]
    #[diagnostic(
        code(scanner::invalid_string),
        help("Strings start with a letter or '_' and contain only letters, digits and '_'. The only bare word is `null`.")
    )]
    InvalidString {
        lexeme: String,
        #[label("not a valid string")]
        span: SourceSpan,
    },

    #[error("Unclosed quote")]
    #[diagnostic(
        code(scanner::unclosed_quote),
        help("Close the string with '\"' before the end of the line.")
    )]
    UnClosedQuote {
        #[label("string starts here and is never closed")]
        span: SourceSpan,
    },
}

impl ScannerError {
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            ScannerError::InvalidCharacter { span, .. }
            | ScannerError::InvalidFloat { span }
            | ScannerError::InvalidString { span, .. }
            | ScannerError::UnClosedQuote { span } => *span,
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ParserError {
    #[error("Expected {expected}, but got {found}")]
    #[diagnostic(
        code(parser::unexpected_token),
        help("The parser found a token it did not expect in this position.")
    )]
    EatUnexpectedTokenType {
        expected: String,
        found: TokenKind,
        #[label("expected {expected} here")]
        span: SourceSpan,
    },

    /// Reserved for document types the grammar does not know yet.
    #[error("Unknown npc-json type")]
    #[diagnostic(code(parser::unknown_type))]
    UnknownJsonType {
        #[label("unknown type")]
        span: SourceSpan,
    },
}

impl ParserError {
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            ParserError::EatUnexpectedTokenType { span, .. }
            | ParserError::UnknownJsonType { span } => *span,
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq)]
pub enum ValueError {
    #[error("Integer {literal} does not fit in 64 bits")]
    #[diagnostic(
        code(value::integer_out_of_range),
        help("Integers must not exceed 9223372036854775807; write a float for larger numbers.")
    )]
    IntegerOutOfRange {
        literal: String,
        #[label("too large")]
        span: SourceSpan,
    },
}

impl ValueError {
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            ValueError::IntegerOutOfRange { span, .. } => *span,
        }
    }
}
