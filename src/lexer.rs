use crate::error::ScannerError;
use log::{debug, trace};
use miette::SourceSpan;
use std::fmt;

/// Represents the different kinds of tokens that the scanner can produce.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // == Scalars ==
    /// An integer literal such as `42`.
    Int,
    /// A float literal such as `3.14`. There is always at least one digit on both sides of the dot.
    Float,
    /// A double-quoted name such as `"bob"`. The token value excludes the quotes.
    String,
    /// The `null` literal, the only bare word of the language.
    Null,

    // == Punctuation ==
    /// Left Curly: `{`
    LeftCurly,
    /// Right Curly: `}`
    RightCurly,
    /// Left Square: `[`
    LeftSquare,
    /// Right Square: `]`
    RightSquare,
    /// Comma: `,`
    Comma,
    /// Colon: `:`
    Colon,
    /// Slash: `/`. Only ever seen while detecting a `//` comment, never emitted.
    Slash,

    // == Special ==
    /// Always the last token of a scan, with an empty value.
    EndOfInput,
}

impl TokenKind {
    /// The single-character punctuation kinds the scanner emits.
    #[must_use]
    pub fn punctuation(c: char) -> Option<Self> {
        match c {
            '{' => Some(TokenKind::LeftCurly),
            '}' => Some(TokenKind::RightCurly),
            '[' => Some(TokenKind::LeftSquare),
            ']' => Some(TokenKind::RightSquare),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            _ => None,
        }
    }

    /// True for the kinds a `ValueNode` may wrap.
    #[must_use]
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::String | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int => write!(f, "an integer"),
            TokenKind::Float => write!(f, "a float"),
            TokenKind::String => write!(f, "a string"),
            TokenKind::Null => write!(f, "null"),
            TokenKind::LeftCurly => write!(f, "'{{'"),
            TokenKind::RightCurly => write!(f, "'}}'"),
            TokenKind::LeftSquare => write!(f, "'['"),
            TokenKind::RightSquare => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A token with its lexeme, kind and byte position.
///
/// Equality only looks at `value` and `kind`, so a token built by hand
/// compares equal to the same token produced by the scanner.
#[derive(Debug, Clone, Eq)]
pub struct Token {
    pub value: String,
    pub kind: TokenKind,
    pub pos_start: usize,
    pub pos_end: usize,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Token {
        Token::spanned(kind, value, 0, 0)
    }

    pub fn spanned(kind: TokenKind, value: impl Into<String>, pos_start: usize, pos_end: usize) -> Token {
        Token {
            value: value.into(),
            kind,
            pos_start,
            pos_end,
        }
    }

    pub fn int(value: impl Into<String>) -> Token {
        Token::new(TokenKind::Int, value)
    }

    pub fn float(value: impl Into<String>) -> Token {
        Token::new(TokenKind::Float, value)
    }

    pub fn string(value: impl Into<String>) -> Token {
        Token::new(TokenKind::String, value)
    }

    pub fn null() -> Token {
        Token::new(TokenKind::Null, "null")
    }

    /// Builds a punctuation token, or `None` if `c` is not punctuation.
    pub fn punctuation(c: char) -> Option<Token> {
        TokenKind::punctuation(c).map(|kind| Token::new(kind, c))
    }

    pub fn end_of_input() -> Token {
        Token::new(TokenKind::EndOfInput, "")
    }

    #[must_use]
    pub fn span(&self) -> SourceSpan {
        (self.pos_start, self.pos_end.saturating_sub(self.pos_start)).into()
    }
}

/// Scans a whole buffer in one pass.
///
/// # Errors
/// Returns the first `ScannerError` met; no tokens are returned alongside it.
pub fn scan(text: &str) -> Result<Vec<Token>, ScannerError> {
    Scanner::new(text).scan()
}

pub struct Scanner<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    position: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    /// Produces every token of the input, ending with exactly one `EndOfInput`.
    ///
    /// # Errors
    /// Fails on the first character that matches no lexical rule.
    pub fn scan(&mut self) -> Result<Vec<Token>, ScannerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            trace!("scanned {:?} {:?} at {}", token.kind, token.value, token.pos_start);
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                break;
            }
        }
        debug!("scanned {} tokens from {} bytes", tokens.len(), self.input.len());
        Ok(tokens)
    }

    /// Returns the next token. Once the input is exhausted every call yields `EndOfInput`.
    ///
    /// # Errors
    /// See [`Scanner::scan`].
    pub fn next_token(&mut self) -> Result<Token, ScannerError> {
        self.skip_whitespace_and_comments();
        let start_pos = self.position;

        let Some(c) = self.advance() else {
            return Ok(Token::spanned(TokenKind::EndOfInput, "", start_pos, start_pos));
        };

        match c {
            '"' => self.read_string(start_pos),
            'n' => self.read_null(start_pos),
            c if c.is_ascii_digit() => self.read_number(start_pos),
            c => match TokenKind::punctuation(c) {
                Some(kind) => Ok(Token::spanned(kind, c, start_pos, self.position)),
                None => Err(ScannerError::InvalidCharacter {
                    found: c,
                    span: (start_pos, c.len_utf8()).into(),
                }),
            },
        }
    }

    fn advance(&mut self) -> Option<char> {
        let char = self.chars.next();
        if let Some(c) = char {
            self.position += c.len_utf8();
        }
        char
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    fn advance_while(&mut self, accept: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !accept(c) {
                break;
            }
            self.advance();
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\n' | '\t') => {
                    self.advance();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    // The comment stops before the newline, which is skipped as whitespace.
                    self.advance_while(|c| c != '\n');
                }
                _ => break,
            }
        }
    }

    fn read_number(&mut self, start_pos: usize) -> Result<Token, ScannerError> {
        self.advance_while(|c| c.is_ascii_digit());

        let kind = if self.peek() == Some('.') {
            if !self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
                return Err(ScannerError::InvalidFloat {
                    span: (start_pos, self.position + 1 - start_pos).into(),
                });
            }
            self.advance(); // Consume the '.'
            self.advance_while(|c| c.is_ascii_digit());
            TokenKind::Float
        } else {
            TokenKind::Int
        };

        Ok(self.token_from(kind, start_pos))
    }

    fn read_null(&mut self, start_pos: usize) -> Result<Token, ScannerError> {
        self.advance_while(is_name_char);
        let word = &self.input[start_pos..self.position];
        if word == "null" {
            Ok(self.token_from(TokenKind::Null, start_pos))
        } else {
            Err(ScannerError::InvalidString {
                lexeme: word.to_string(),
                span: (start_pos, self.position - start_pos).into(),
            })
        }
    }

    fn read_string(&mut self, start_pos: usize) -> Result<Token, ScannerError> {
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                self.advance();
            }
            None => return Err(self.unclosed_quote(start_pos)),
            Some(_) => {
                self.advance_while(is_name_char);
                return Err(self.invalid_string(start_pos));
            }
        }

        self.advance_while(is_name_char);

        match self.peek() {
            Some('"') => {
                self.advance(); // Consume the closing quote
                Ok(Token::spanned(
                    TokenKind::String,
                    &self.input[start_pos + 1..self.position - 1],
                    start_pos,
                    self.position,
                ))
            }
            // Anything but a name character or '"' ends the body without closing it.
            _ => Err(self.unclosed_quote(start_pos)),
        }
    }

    fn unclosed_quote(&self, start_pos: usize) -> ScannerError {
        ScannerError::UnClosedQuote {
            span: (start_pos, self.position - start_pos).into(),
        }
    }

    fn invalid_string(&self, start_pos: usize) -> ScannerError {
        ScannerError::InvalidString {
            lexeme: self.input[start_pos..self.position].to_string(),
            span: (start_pos, self.position - start_pos).into(),
        }
    }

    fn token_from(&self, kind: TokenKind, start_pos: usize) -> Token {
        Token::spanned(kind, &self.input[start_pos..self.position], start_pos, self.position)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_tokens(input: &str, expected: Vec<Token>) {
        let tokens = scan(input).unwrap();
        assert_eq!(tokens, expected);
    }

    fn scan_err(input: &str) -> ScannerError {
        scan(input).expect_err("scan should fail")
    }

    fn punct(c: char) -> Token {
        Token::punctuation(c).unwrap()
    }

    #[test]
    fn test_empty_content() {
        assert_tokens("", vec![Token::end_of_input()]);
    }

    #[test]
    fn test_whitespace_only() {
        assert_tokens("     \n  \t", vec![Token::end_of_input()]);
    }

    #[test]
    fn test_comment_only() {
        assert_tokens("\n        // this is a comment\n    ", vec![Token::end_of_input()]);
        assert_tokens("// no trailing newline", vec![Token::end_of_input()]);
    }

    #[test]
    fn test_comment_between_tokens() {
        assert_tokens(
            "[1, // first\n 2]",
            vec![
                punct('['),
                Token::int("1"),
                punct(','),
                Token::int("2"),
                punct(']'),
                Token::end_of_input(),
            ],
        );
    }

    #[test]
    fn test_punctuation() {
        assert_tokens(
            "\n        []{}:,\n    ",
            vec![
                punct('['),
                punct(']'),
                punct('{'),
                punct('}'),
                punct(':'),
                punct(','),
                Token::end_of_input(),
            ],
        );
    }

    #[test]
    fn test_invalid_character() {
        let err = scan_err("?!@#");
        assert_eq!(
            err,
            ScannerError::InvalidCharacter {
                found: '?',
                span: (0, 1).into()
            }
        );
    }

    #[test]
    fn test_single_slash_is_invalid() {
        assert!(matches!(
            scan_err("[1] / 2"),
            ScannerError::InvalidCharacter { found: '/', .. }
        ));
    }

    #[test]
    fn test_carriage_return_is_invalid() {
        assert!(matches!(
            scan_err("[1]\r\n"),
            ScannerError::InvalidCharacter { found: '\r', .. }
        ));
    }

    #[test]
    fn test_ints() {
        assert_tokens(
            "[12, 99]",
            vec![
                punct('['),
                Token::int("12"),
                punct(','),
                Token::int("99"),
                punct(']'),
                Token::end_of_input(),
            ],
        );
    }

    #[test]
    fn test_floats() {
        assert_tokens(
            "[1.2, 33, 3.1415]",
            vec![
                punct('['),
                Token::float("1.2"),
                punct(','),
                Token::int("33"),
                punct(','),
                Token::float("3.1415"),
                punct(']'),
                Token::end_of_input(),
            ],
        );
    }

    #[test]
    fn test_invalid_float() {
        assert!(matches!(
            scan_err("\n        [1, 2., 33]\n    "),
            ScannerError::InvalidFloat { .. }
        ));
        assert!(matches!(scan_err("2."), ScannerError::InvalidFloat { .. }));
    }

    #[test]
    fn test_null() {
        assert_tokens(
            "{1: null, [null]}",
            vec![
                punct('{'),
                Token::int("1"),
                punct(':'),
                Token::null(),
                punct(','),
                punct('['),
                Token::null(),
                punct(']'),
                punct('}'),
                Token::end_of_input(),
            ],
        );
    }

    #[test]
    fn test_bare_word_other_than_null() {
        assert_eq!(
            scan_err("\n        nulla\n    "),
            ScannerError::InvalidString {
                lexeme: "nulla".to_string(),
                span: (9, 5).into()
            }
        );
        assert!(matches!(scan_err("nope"), ScannerError::InvalidString { .. }));
        // Only `n` starts a bare word, anything else is a stray character.
        assert!(matches!(
            scan_err("true"),
            ScannerError::InvalidCharacter { found: 't', .. }
        ));
    }

    #[test]
    fn test_strings() {
        assert_tokens(
            r#"{"name": "bob", "age": 18, "balance": 23.3}"#,
            vec![
                punct('{'),
                Token::string("name"),
                punct(':'),
                Token::string("bob"),
                punct(','),
                Token::string("age"),
                punct(':'),
                Token::int("18"),
                punct(','),
                Token::string("balance"),
                punct(':'),
                Token::float("23.3"),
                punct('}'),
                Token::end_of_input(),
            ],
        );
    }

    #[test]
    fn test_string_with_underscore_and_digits() {
        assert_tokens(
            r#""_user_42""#,
            vec![Token::string("_user_42"), Token::end_of_input()],
        );
    }

    #[test]
    fn test_unclosed_quote() {
        assert!(matches!(scan_err("\"abc"), ScannerError::UnClosedQuote { .. }));
        assert!(matches!(
            scan_err("\n        \"abc\n    "),
            ScannerError::UnClosedQuote { .. }
        ));
    }

    #[test]
    fn test_string_starting_with_digit() {
        assert_eq!(
            scan_err("\"1agc"),
            ScannerError::InvalidString {
                lexeme: "\"1agc".to_string(),
                span: (0, 5).into()
            }
        );
    }

    #[test]
    fn test_empty_string_is_invalid() {
        assert!(matches!(scan_err(r#""""#), ScannerError::InvalidString { .. }));
    }

    #[test]
    fn test_non_name_character_leaves_string_unclosed() {
        for source in [r#""abc def""#, r#""ab-c""#, r#"["ab c]"#, "\"abc\n"] {
            assert!(
                matches!(scan_err(source), ScannerError::UnClosedQuote { .. }),
                "{source:?} should be an unclosed quote"
            );
        }
        assert_eq!(
            scan_err(r#"["ab c]"#),
            ScannerError::UnClosedQuote {
                span: (1, 3).into()
            }
        );
    }

    #[test]
    fn test_lone_quote_is_unclosed() {
        assert_eq!(
            scan_err("\""),
            ScannerError::UnClosedQuote {
                span: (0, 1).into()
            }
        );
        assert!(matches!(scan_err("[1, \""), ScannerError::UnClosedQuote { .. }));
    }

    #[test]
    fn test_span_of_reversed_positions_is_empty() {
        let token = Token::spanned(TokenKind::Int, "7", 5, 2);
        assert_eq!(token.span(), (5, 0).into());
    }

    #[test]
    fn test_token_positions() {
        let tokens = scan("[ \"ab\", 10 ]").unwrap();
        let spans: Vec<(usize, usize)> = tokens.iter().map(|t| (t.pos_start, t.pos_end)).collect();
        assert_eq!(spans, vec![(0, 1), (2, 6), (6, 7), (8, 10), (11, 12), (12, 12)]);
    }

    #[test]
    fn test_end_of_input_repeats() {
        let mut scanner = Scanner::new("1");
        assert_eq!(scanner.next_token().unwrap(), Token::int("1"));
        assert_eq!(scanner.next_token().unwrap(), Token::end_of_input());
        assert_eq!(scanner.next_token().unwrap(), Token::end_of_input());
    }

    #[test]
    fn test_scan_is_repeatable() {
        let input = "[null, \"bob\", [1, 3.5],]";
        assert_eq!(scan(input).unwrap(), scan(input).unwrap());
    }
}
