//! A grammar ready for table construction.

use marquee_foundation::Terminal;

use crate::precedence::{Precedence, terminal_precedence};
use crate::script::{PRODUCTIONS, Production};
use crate::symbol::Symbol;

/// A production list plus the terminal precedence table.
///
/// Production 0 must be the augmented start production; the parser accepts
/// when it is complete and the lookahead is `Eof`.
#[derive(Clone, Debug)]
pub struct Grammar {
    productions: Vec<Production>,
    precedence: [Option<Precedence>; Terminal::COUNT],
}

impl Grammar {
    /// Creates a grammar using the default terminal precedence table.
    #[must_use]
    pub fn new(productions: Vec<Production>) -> Self {
        let mut precedence = [None; Terminal::COUNT];
        for terminal in Terminal::ALL {
            precedence[terminal.index()] = terminal_precedence(terminal);
        }
        Self {
            productions,
            precedence,
        }
    }

    /// Returns the scripting-language grammar.
    #[must_use]
    pub fn script() -> Self {
        Self::new(PRODUCTIONS.to_vec())
    }

    /// Overrides the precedence of a terminal.
    #[must_use]
    pub fn with_precedence(mut self, terminal: Terminal, precedence: Option<Precedence>) -> Self {
        self.precedence[terminal.index()] = precedence;
        self
    }

    /// Returns the productions in priority order.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns the declared precedence of a terminal.
    #[must_use]
    pub fn terminal_precedence(&self, terminal: Terminal) -> Option<Precedence> {
        self.precedence[terminal.index()]
    }

    /// Returns the precedence of a production: its override, otherwise that
    /// of the last terminal on its right-hand side.
    #[must_use]
    pub fn production_precedence(&self, index: usize) -> Option<Precedence> {
        let production = self.productions.get(index)?;
        production.prec.or_else(|| {
            production
                .rhs
                .iter()
                .rev()
                .find_map(|symbol| match symbol {
                    Symbol::T(t) => Some(*t),
                    Symbol::N(_) => None,
                })
                .and_then(|t| self.terminal_precedence(t))
        })
    }
}
