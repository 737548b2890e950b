use crate::lexer::{Token, TokenKind};

/// The shape of an [`AstNode`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum AstKind {
    Empty,
    Value,
    List,
}

/// A parsed npc-json document or one of its elements.
#[derive(Debug, PartialEq, Clone)]
pub enum AstNode {
    /// A document with no tokens before the end of input. Never appears inside a list.
    Empty,
    Value(ValueNode),
    List(ListNode),
}

/// A single scalar: an int, float, string or null token.
#[derive(Debug, PartialEq, Clone)]
pub struct ValueNode {
    token: Token,
}

impl ValueNode {
    /// Wraps a scalar token. Returns `None` for punctuation and `EndOfInput`.
    #[must_use]
    pub fn new(token: Token) -> Option<Self> {
        token.kind.is_scalar().then_some(ValueNode { token })
    }

    #[must_use]
    pub fn token(&self) -> &Token {
        &self.token
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    #[must_use]
    pub fn into_token(self) -> Token {
        self.token
    }
}

/// An ordered, possibly empty, list of elements.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ListNode {
    items: Vec<AstNode>,
}

impl ListNode {
    /// Builds a list. Returns `None` if any item is [`AstNode::Empty`].
    #[must_use]
    pub fn new(items: Vec<AstNode>) -> Option<Self> {
        (!items.iter().any(AstNode::is_empty)).then_some(ListNode { items })
    }

    #[must_use]
    pub fn items(&self) -> &[AstNode] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl AstNode {
    /// Shorthand for a value node; `None` if the token is not a scalar.
    #[must_use]
    pub fn value(token: Token) -> Option<Self> {
        ValueNode::new(token).map(AstNode::Value)
    }

    /// Shorthand for a list node; `None` if an item is [`AstNode::Empty`].
    #[must_use]
    pub fn list(items: Vec<AstNode>) -> Option<Self> {
        ListNode::new(items).map(AstNode::List)
    }

    #[must_use]
    pub fn kind(&self) -> AstKind {
        match self {
            AstNode::Empty => AstKind::Empty,
            AstNode::Value(_) => AstKind::Value,
            AstNode::List(_) => AstKind::List,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, AstNode::Empty)
    }

    #[must_use]
    pub fn is_value(&self) -> bool {
        matches!(self, AstNode::Value(_))
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, AstNode::List(_))
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&ValueNode> {
        match self {
            AstNode::Value(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            AstNode::List(list) => Some(list),
            _ => None,
        }
    }
}
