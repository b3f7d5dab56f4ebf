//! Semantic values carried on the parser stack.

use marquee_bytecode::CodeOffset;
use marquee_foundation::{EntityRef, TokenValue};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The construct a [`Fixup`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FixupKind {
    /// `IfCode then else end skip_end`
    Conditional,
    /// `RepeatWhileCode body end`
    WhileLoop,
    /// `RepeatWithCode init limit body step end var`
    CountedLoop,
    /// `WhenCode end event`
    When,
}

impl FixupKind {
    /// Returns the number of words reserved after the opcode.
    #[must_use]
    pub const fn slots(self) -> u32 {
        match self {
            Self::Conditional => 3,
            Self::WhileLoop => 2,
            Self::CountedLoop => 5,
            Self::When => 1,
        }
    }

    /// Returns the keyword that opens the construct.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Conditional => "if",
            Self::WhileLoop | Self::CountedLoop => "repeat",
            Self::When => "when",
        }
    }
}

/// Placeholder slots reserved at the opening of a structured construct.
///
/// `at` is the offset of the opcode word; slot `n` lives at `at + n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fixup {
    /// What kind of construct reserved the slots.
    pub kind: FixupKind,
    /// Offset of the construct's opcode.
    pub at: CodeOffset,
}

impl Fixup {
    /// Creates a fixup.
    #[must_use]
    pub const fn new(kind: FixupKind, at: CodeOffset) -> Self {
        Self { kind, at }
    }

    /// Returns the offset of slot `n` (1-based).
    #[must_use]
    pub const fn slot(self, n: u32) -> CodeOffset {
        self.at + n
    }
}

/// The value a grammar symbol carries on the parser stack.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SemanticValue {
    /// Nothing.
    #[default]
    None,
    /// Integer literal.
    Int(i32),
    /// Float literal.
    Float(f64),
    /// Identifier or literal text.
    Str(String),
    /// Built-in property reference.
    Entity(EntityRef),
    /// A code offset: where a construct's code begins, or the offset just
    /// after an `end` marker.
    Code(CodeOffset),
    /// A count (declared arguments).
    Count(u32),
    /// An argument list.
    Args {
        /// Number of arguments.
        count: u32,
        /// Offset of the first argument's code.
        start: CodeOffset,
    },
    /// An open structured construct.
    Fixup(Fixup),
    /// Open `else if` links, first to last.
    Chain(Vec<Fixup>),
}

impl From<TokenValue> for SemanticValue {
    fn from(value: TokenValue) -> Self {
        match value {
            TokenValue::None => Self::None,
            TokenValue::Int(n) => Self::Int(n),
            TokenValue::Float(x) => Self::Float(x),
            TokenValue::Str(s) => Self::Str(s),
            TokenValue::Entity(e) => Self::Entity(e),
            TokenValue::ArgCount(n) => Self::Count(n),
        }
    }
}

impl SemanticValue {
    /// Returns a short name of the variant for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::None => "nothing",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "text",
            Self::Entity(_) => "entity",
            Self::Code(_) => "code offset",
            Self::Count(_) => "count",
            Self::Args { .. } => "argument list",
            Self::Fixup(_) => "fixup",
            Self::Chain(_) => "else-if chain",
        }
    }
}
