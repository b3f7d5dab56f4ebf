//! Operator precedence and associativity.
//!
//! Levels are ordered lowest first. A production takes the precedence of its
//! explicit override, otherwise that of the last terminal on its right-hand
//! side.

use marquee_foundation::Terminal;

/// Operator associativity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    /// `a op b op c` groups as `(a op b) op c`.
    Left,
    /// `a op b op c` groups as `a op (b op c)`.
    Right,
    /// `a op b op c` is a syntax error.
    NonAssoc,
}

/// A precedence level with its associativity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Precedence {
    /// Binding strength; higher binds tighter.
    pub level: u8,
    /// Associativity at this level.
    pub assoc: Assoc,
}

impl Precedence {
    /// Creates a precedence level.
    #[must_use]
    pub const fn new(level: u8, assoc: Assoc) -> Self {
        Self { level, assoc }
    }
}

/// Assignment forms whose right-hand side is a trailing expression.
pub const ASSIGNMENT: Precedence = Precedence::new(1, Assoc::Right);
/// `or`
pub const OR: Precedence = Precedence::new(2, Assoc::Left);
/// `and`
pub const AND: Precedence = Precedence::new(3, Assoc::Left);
/// Comparisons and text tests.
pub const COMPARISON: Precedence = Precedence::new(4, Assoc::Left);
/// Concatenation.
pub const CONCATENATION: Precedence = Precedence::new(5, Assoc::Left);
/// `+` and `-`.
pub const ADDITIVE: Precedence = Precedence::new(6, Assoc::Left);
/// `*`, `/` and `mod`.
pub const MULTIPLICATIVE: Precedence = Precedence::new(7, Assoc::Left);
/// Prefix operators and prefix-introduced forms.
pub const UNARY: Precedence = Precedence::new(8, Assoc::Right);

/// Returns the declared precedence of a terminal.
#[must_use]
pub const fn terminal_precedence(terminal: Terminal) -> Option<Precedence> {
    match terminal {
        Terminal::Or => Some(OR),
        Terminal::And => Some(AND),
        Terminal::Equals
        | Terminal::Neq
        | Terminal::Lt
        | Terminal::Gt
        | Terminal::Le
        | Terminal::Ge
        | Terminal::Contains
        | Terminal::Starts => Some(COMPARISON),
        Terminal::Ampersand | Terminal::Concat | Terminal::After => Some(CONCATENATION),
        Terminal::Plus | Terminal::Minus => Some(ADDITIVE),
        Terminal::Star | Terminal::Slash | Terminal::Mod => Some(MULTIPLICATIVE),
        Terminal::Not => Some(UNARY),
        _ => None,
    }
}
