//! Parse tables.
//!
//! Flat action (`states × terminals`) and goto (`states × nonterminals`)
//! arrays, plus the per-state default reduction and consistency flag the
//! driver uses to decide whether it needs a lookahead at all.

use std::fmt;
use std::sync::OnceLock;

use marquee_foundation::Terminal;

use crate::grammar::Grammar;
use crate::lalr;
use crate::script::Production;
use crate::symbol::NonTerminal;

/// A parser state number.
pub type StateId = usize;

/// An index into the production list.
pub type ProductionId = usize;

/// A parse table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Push the lookahead and move to a state.
    Shift(StateId),
    /// Reduce by a production.
    Reduce(ProductionId),
    /// The input is a complete program.
    Accept,
    /// Explicit error from a non-associative operator.
    Error,
}

/// Counts gathered while building tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    /// Number of states.
    pub states: usize,
    /// Number of productions, the augmented start included.
    pub productions: usize,
    /// Shift/reduce conflicts settled by precedence.
    pub resolved: usize,
    /// Shift/reduce conflicts defaulted to shift.
    pub shift_reduce: usize,
    /// Reduce/reduce conflicts defaulted to the earlier production.
    pub reduce_reduce: usize,
    /// Non-empty action entries.
    pub action_entries: usize,
    /// Non-empty goto entries.
    pub goto_entries: usize,
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} states, {} productions, {} action entries, {} goto entries; \
             conflicts: {} by precedence, {} shift/reduce, {} reduce/reduce",
            self.states,
            self.productions,
            self.action_entries,
            self.goto_entries,
            self.resolved,
            self.shift_reduce,
            self.reduce_reduce
        )
    }
}

/// LALR(1) parse tables for a grammar.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseTables {
    pub(crate) productions: Vec<Production>,
    pub(crate) actions: Vec<Option<Action>>,
    pub(crate) gotos: Vec<Option<StateId>>,
    pub(crate) defaults: Vec<Option<ProductionId>>,
    pub(crate) consistent: Vec<bool>,
    pub(crate) stats: TableStats,
}

impl ParseTables {
    /// Builds tables for a grammar.
    #[must_use]
    pub fn build(grammar: &Grammar) -> Self {
        lalr::build(grammar)
    }

    /// Returns the shared tables of the scripting grammar, built on first use.
    pub fn script() -> &'static Self {
        static TABLES: OnceLock<ParseTables> = OnceLock::new();
        TABLES.get_or_init(|| Self::build(&Grammar::script()))
    }

    /// The state the parser starts in.
    pub const START: StateId = 0;

    /// Returns the number of states.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.consistent.len()
    }

    /// Returns the action entry for a state and lookahead.
    #[must_use]
    pub fn action(&self, state: StateId, terminal: Terminal) -> Option<Action> {
        self.actions
            .get(state * Terminal::COUNT + terminal.index())
            .copied()
            .flatten()
    }

    /// Returns the state to enter after reducing to `nonterminal` on top of
    /// `state`.
    #[must_use]
    pub fn goto(&self, state: StateId, nonterminal: NonTerminal) -> Option<StateId> {
        self.gotos
            .get(state * NonTerminal::COUNT + nonterminal.index())
            .copied()
            .flatten()
    }

    /// Returns the most frequent reduction of a state.
    #[must_use]
    pub fn default_reduction(&self, state: StateId) -> Option<ProductionId> {
        self.defaults.get(state).copied().flatten()
    }

    /// Returns true when a state's only possible action is one reduction,
    /// so the driver can reduce without reading a lookahead.
    #[must_use]
    pub fn is_consistent(&self, state: StateId) -> bool {
        self.consistent.get(state).copied().unwrap_or(false)
    }

    /// Returns a production by index.
    #[must_use]
    pub fn production(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(id)
    }

    /// Returns every production.
    #[must_use]
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns the terminals a state has an explicit entry for.
    pub fn expected(&self, state: StateId) -> impl Iterator<Item = Terminal> + '_ {
        Terminal::ALL.into_iter().filter(move |t| {
            !t.is_reserved()
                && matches!(
                    self.action(state, *t),
                    Some(Action::Shift(_) | Action::Reduce(_) | Action::Accept)
                )
        })
    }

    /// Returns construction statistics.
    #[must_use]
    pub fn stats(&self) -> TableStats {
        self.stats
    }
}
