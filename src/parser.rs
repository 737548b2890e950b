use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenKind};
use log::{debug, trace};

/// Parses a token sequence into a document root.
///
/// # Errors
/// Returns the first `ParserError` met.
pub fn parse(tokens: Vec<Token>) -> Result<AstNode, ParserError> {
    Parser::new(tokens).parse()
}

/// A recursive descent parser for npc-json.
///
/// ```text
/// npc-json   ::= list | value | empty
/// list       ::= "[" "]"
///              | "[" npc-json { "," npc-json } [ "," ] "]"
/// value      ::= int | float | string | null
/// ```
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Appends an `EndOfInput` sentinel if `tokens` does not already end with one.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfInput) {
            let end = tokens.last().map_or(0, |t| t.pos_end);
            tokens.push(Token::spanned(TokenKind::EndOfInput, "", end, end));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    // === Main Parsing Methods ===

    /// Document ::= ( List | Value | Empty ) EndOfInput
    ///
    /// The whole sequence must be consumed: tokens left after the root raise
    /// `EatUnexpectedTokenType` instead of being silently ignored.
    pub fn parse(&mut self) -> Result<AstNode, ParserError> {
        let root = if self.check(TokenKind::EndOfInput) {
            AstNode::Empty
        } else {
            self.parse_element()?
        };
        self.eat(TokenKind::EndOfInput)?;
        debug!("parsed {:?} root from {} tokens", root.kind(), self.tokens.len());
        Ok(root)
    }

    /// Element ::= List | Value
    fn parse_element(&mut self) -> Result<AstNode, ParserError> {
        let kind = self.current_token().kind;
        trace!("element at token {} ({kind:?})", self.position);
        match kind {
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Null => {
                self.parse_value().map(AstNode::Value)
            }
            TokenKind::LeftSquare => self.parse_list().map(AstNode::List),
            _ => self.err_unexpected("a value or '['"),
        }
    }

    /// Value ::= Int | Float | String | Null
    fn parse_value(&mut self) -> Result<ValueNode, ParserError> {
        let token = self.current_token().clone();
        self.eat(token.kind)?;
        match ValueNode::new(token) {
            Some(value) => Ok(value),
            None => self.err_unexpected("a value"),
        }
    }

    /// List ::= "[" [ Element { "," Element } [ "," ] ] "]"
    fn parse_list(&mut self) -> Result<ListNode, ParserError> {
        self.eat(TokenKind::LeftSquare)?;

        if self.check(TokenKind::RightSquare) {
            self.eat(TokenKind::RightSquare)?;
            return Ok(ListNode::default());
        }

        let mut items = vec![self.parse_element()?];

        // A comma directly before ']' is the trailing one, not a separator.
        while self.check(TokenKind::Comma) && !self.peek_is(TokenKind::RightSquare) {
            self.eat(TokenKind::Comma)?;
            items.push(self.parse_element()?);
        }

        if self.check(TokenKind::Comma) {
            self.eat(TokenKind::Comma)?;
        }

        self.eat(TokenKind::RightSquare)?;
        trace!("closed list of {} items", items.len());
        match ListNode::new(items) {
            Some(list) => Ok(list),
            None => self.err_unexpected("a list element"),
        }
    }

    // === Token Helper Methods ===

    fn current_token(&self) -> &Token {
        // `new` guarantees a trailing sentinel and `advance` never moves past it.
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.current_token().kind != TokenKind::EndOfInput {
            self.position += 1;
        }
    }

    fn eat(&mut self, expected: TokenKind) -> Result<(), ParserError> {
        if self.check(expected) {
            self.advance();
            Ok(())
        } else {
            self.err_unexpected(&expected.to_string())
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token().kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.tokens
            .get(self.position + 1)
            .is_some_and(|token| token.kind == kind)
    }

    fn err_unexpected<T>(&self, expected: &str) -> Result<T, ParserError> {
        let token = self.current_token();
        Err(ParserError::EatUnexpectedTokenType {
            expected: expected.to_string(),
            found: token.kind,
            span: token.span(),
        })
    }
}
