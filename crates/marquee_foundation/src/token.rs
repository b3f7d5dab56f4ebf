//! Token types consumed by the parser.
//!
//! Tokens are produced by an external lexer. The parser only inspects a
//! token's value to copy it into emitted literals or handler-table keys.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Span;
use crate::terminal::Terminal;

/// A packed reference to a built-in property accessor.
///
/// `entity` selects the object family (the movie, a sprite, a cast member)
/// and `field` the property of that family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntityRef {
    /// Entity id.
    pub entity: u32,
    /// Field id within the entity.
    pub field: u32,
}

impl EntityRef {
    /// Creates a new entity reference.
    #[must_use]
    pub const fn new(entity: u32, field: u32) -> Self {
        Self { entity, field }
    }
}

/// The semantic value a lexer attaches to a token.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenValue {
    /// Keywords and punctuation carry nothing.
    #[default]
    None,
    /// Integer literal.
    Int(i32),
    /// Floating-point literal.
    Float(f64),
    /// Identifier text, string or symbol literal, built-in name or the
    /// word following `end`.
    Str(String),
    /// Built-in property reference.
    Entity(EntityRef),
    /// Argument count attached by the lexer.
    ArgCount(u32),
}

impl TokenValue {
    /// Returns the text payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the entity payload, if any.
    #[must_use]
    pub const fn as_entity(&self) -> Option<EntityRef> {
        match self {
            Self::Entity(e) => Some(*e),
            _ => None,
        }
    }
}

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The terminal symbol.
    pub kind: Terminal,
    /// The attached semantic value.
    pub value: TokenValue,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: Terminal, value: TokenValue, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// Creates a token that carries no value.
    #[must_use]
    pub const fn keyword(kind: Terminal, span: Span) -> Self {
        Self::new(kind, TokenValue::None, span)
    }

    /// Creates an identifier token.
    #[must_use]
    pub fn id(name: impl Into<String>, span: Span) -> Self {
        Self::new(Terminal::Id, TokenValue::Str(name.into()), span)
    }

    /// Creates an integer literal token.
    #[must_use]
    pub const fn int(value: i32, span: Span) -> Self {
        Self::new(Terminal::Int, TokenValue::Int(value), span)
    }

    /// Creates a float literal token.
    #[must_use]
    pub const fn float(value: f64, span: Span) -> Self {
        Self::new(Terminal::Float, TokenValue::Float(value), span)
    }

    /// Creates a string literal token.
    #[must_use]
    pub fn string(text: impl Into<String>, span: Span) -> Self {
        Self::new(Terminal::String, TokenValue::Str(text.into()), span)
    }

    /// Creates a token whose value is a piece of text, such as a symbol,
    /// a built-in name or an end clause.
    #[must_use]
    pub fn text(kind: Terminal, text: impl Into<String>, span: Span) -> Self {
        Self::new(kind, TokenValue::Str(text.into()), span)
    }

    /// Creates an entity reference token.
    #[must_use]
    pub const fn entity(kind: Terminal, entity: EntityRef, span: Span) -> Self {
        Self::new(kind, TokenValue::Entity(entity), span)
    }

    /// Creates the end-of-input token.
    #[must_use]
    pub const fn eof(span: Span) -> Self {
        Self::keyword(Terminal::Eof, span)
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, Terminal::Eof)
    }
}
