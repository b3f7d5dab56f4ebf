//! LALR(1) table construction.
//!
//! Builds the canonical LR(0) collection, computes LALR(1) lookaheads by
//! spontaneous generation and propagation, then fills the action table and
//! settles conflicts with the usual yacc rules.

use std::collections::{BTreeMap, HashMap};

use marquee_foundation::Terminal;
use tracing::debug;

use crate::grammar::Grammar;
use crate::precedence::Assoc;
use crate::symbol::{NonTerminal, Symbol};
use crate::tables::{Action, ParseTables, ProductionId, StateId, TableStats};

/// A set of terminals, one bit per [`Terminal::index`].
type TermSet = u128;

/// Placeholder lookahead used to detect propagation.
const MARKER: TermSet = 1 << 127;

const fn bit(terminal: Terminal) -> TermSet {
    1 << terminal.index()
}

/// A production with a position in its right-hand side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Item {
    production: ProductionId,
    dot: usize,
}

impl Item {
    const fn advance(self) -> Self {
        Self {
            production: self.production,
            dot: self.dot + 1,
        }
    }
}

/// An LR(0) state: its sorted kernel and outgoing transitions.
struct State {
    kernel: Vec<Item>,
    transitions: BTreeMap<Symbol, StateId>,
}

struct Builder<'g> {
    grammar: &'g Grammar,
    by_lhs: Vec<Vec<ProductionId>>,
    nullable: Vec<bool>,
    first: Vec<TermSet>,
}

impl<'g> Builder<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        let mut by_lhs = vec![Vec::new(); NonTerminal::COUNT];
        for (id, production) in grammar.productions().iter().enumerate() {
            by_lhs[production.lhs.index()].push(id);
        }
        let mut builder = Self {
            grammar,
            by_lhs,
            nullable: vec![false; NonTerminal::COUNT],
            first: vec![0; NonTerminal::COUNT],
        };
        builder.compute_nullable();
        builder.compute_first();
        builder
    }

    fn compute_nullable(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for production in self.grammar.productions() {
                let lhs = production.lhs.index();
                if self.nullable[lhs] {
                    continue;
                }
                let empty = production.rhs.iter().all(|symbol| match symbol {
                    Symbol::T(_) => false,
                    Symbol::N(n) => self.nullable[n.index()],
                });
                if empty {
                    self.nullable[lhs] = true;
                    changed = true;
                }
            }
        }
    }

    fn compute_first(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            for production in self.grammar.productions() {
                let lhs = production.lhs.index();
                let (set, _) = self.first_of(production.rhs);
                let merged = self.first[lhs] | set;
                if merged != self.first[lhs] {
                    self.first[lhs] = merged;
                    changed = true;
                }
            }
        }
    }

    /// FIRST of a symbol string, and whether the whole string is nullable.
    fn first_of(&self, symbols: &[Symbol]) -> (TermSet, bool) {
        let mut set = 0;
        for symbol in symbols {
            match symbol {
                Symbol::T(t) => return (set | bit(*t), false),
                Symbol::N(n) => {
                    set |= self.first[n.index()];
                    if !self.nullable[n.index()] {
                        return (set, false);
                    }
                }
            }
        }
        (set, true)
    }

    fn rhs(&self, item: Item) -> &'static [Symbol] {
        self.grammar.productions()[item.production].rhs
    }

    fn next_symbol(&self, item: Item) -> Option<Symbol> {
        self.rhs(item).get(item.dot).copied()
    }

    fn closure0(&self, kernel: &[Item]) -> Vec<Item> {
        let mut items = kernel.to_vec();
        let mut expanded = [false; NonTerminal::COUNT];
        let mut i = 0;
        while i < items.len() {
            if let Some(Symbol::N(n)) = self.next_symbol(items[i]) {
                if !expanded[n.index()] {
                    expanded[n.index()] = true;
                    items.extend(self.by_lhs[n.index()].iter().map(|&production| Item {
                        production,
                        dot: 0,
                    }));
                }
            }
            i += 1;
        }
        items
    }

    /// LR(1) closure where each item carries a lookahead set.
    fn closure1(&self, seeds: &[(Item, TermSet)]) -> Vec<(Item, TermSet)> {
        let mut items = seeds.to_vec();
        let mut position: HashMap<Item, usize> =
            items.iter().enumerate().map(|(i, (item, _))| (*item, i)).collect();
        let mut work: Vec<usize> = (0..items.len()).collect();

        while let Some(i) = work.pop() {
            let (item, lookahead) = items[i];
            let rhs = self.rhs(item);
            let Some(Symbol::N(n)) = rhs.get(item.dot) else {
                continue;
            };
            let (mut follow, nullable) = self.first_of(&rhs[item.dot + 1..]);
            if nullable {
                follow |= lookahead;
            }
            for &production in &self.by_lhs[n.index()] {
                let new = Item { production, dot: 0 };
                if let Some(&j) = position.get(&new) {
                    let merged = items[j].1 | follow;
                    if merged != items[j].1 {
                        items[j].1 = merged;
                        work.push(j);
                    }
                } else {
                    position.insert(new, items.len());
                    work.push(items.len());
                    items.push((new, follow));
                }
            }
        }
        items
    }

    fn lr0_states(&self) -> Vec<State> {
        let start = vec![Item {
            production: 0,
            dot: 0,
        }];
        let mut lookup: HashMap<Vec<Item>, StateId> = HashMap::new();
        lookup.insert(start.clone(), 0);
        let mut states = vec![State {
            kernel: start,
            transitions: BTreeMap::new(),
        }];

        let mut current = 0;
        while current < states.len() {
            let mut moves: BTreeMap<Symbol, Vec<Item>> = BTreeMap::new();
            for item in self.closure0(&states[current].kernel) {
                if let Some(symbol) = self.next_symbol(item) {
                    moves.entry(symbol).or_default().push(item.advance());
                }
            }
            for (symbol, mut kernel) in moves {
                kernel.sort_unstable();
                kernel.dedup();
                let target = if let Some(&existing) = lookup.get(&kernel) {
                    existing
                } else {
                    let id = states.len();
                    lookup.insert(kernel.clone(), id);
                    states.push(State {
                        kernel,
                        transitions: BTreeMap::new(),
                    });
                    id
                };
                states[current].transitions.insert(symbol, target);
            }
            current += 1;
        }
        states
    }

    /// Lookahead sets for every kernel item of every state.
    fn lookaheads(&self, states: &[State]) -> Vec<Vec<TermSet>> {
        let mut sets: Vec<Vec<TermSet>> =
            states.iter().map(|s| vec![0; s.kernel.len()]).collect();
        sets[0][0] = bit(Terminal::Eof);

        let mut edges = Vec::new();
        for (from, state) in states.iter().enumerate() {
            for (k, &kernel_item) in state.kernel.iter().enumerate() {
                for (item, set) in self.closure1(&[(kernel_item, MARKER)]) {
                    let Some(symbol) = self.next_symbol(item) else {
                        continue;
                    };
                    let Some(&to) = state.transitions.get(&symbol) else {
                        continue;
                    };
                    let Ok(p) = states[to].kernel.binary_search(&item.advance()) else {
                        continue;
                    };
                    sets[to][p] |= set & !MARKER;
                    if set & MARKER != 0 {
                        edges.push(((from, k), (to, p)));
                    }
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for &((from, k), (to, p)) in &edges {
                let merged = sets[to][p] | sets[from][k];
                if merged != sets[to][p] {
                    sets[to][p] = merged;
                    changed = true;
                }
            }
        }
        sets
    }

    /// Settles a reduction against the entry already in the table.
    fn resolve(
        &self,
        current: Option<Action>,
        production: ProductionId,
        terminal: Terminal,
        state: StateId,
        stats: &mut TableStats,
    ) -> Option<Action> {
        match current {
            None => Some(Action::Reduce(production)),
            Some(Action::Shift(target)) => {
                let rule = self.grammar.production_precedence(production);
                let token = self.grammar.terminal_precedence(terminal);
                match (rule, token) {
                    (Some(rule), Some(token)) => {
                        stats.resolved += 1;
                        let action = if rule.level > token.level {
                            Action::Reduce(production)
                        } else if rule.level < token.level {
                            Action::Shift(target)
                        } else {
                            match token.assoc {
                                Assoc::Left => Action::Reduce(production),
                                Assoc::Right => Action::Shift(target),
                                Assoc::NonAssoc => Action::Error,
                            }
                        };
                        Some(action)
                    }
                    _ => {
                        stats.shift_reduce += 1;
                        debug!(
                            state,
                            %terminal,
                            production = %self.grammar.productions()[production],
                            "shift/reduce conflict, shifting"
                        );
                        Some(Action::Shift(target))
                    }
                }
            }
            Some(Action::Reduce(earlier)) => {
                stats.reduce_reduce += 1;
                debug!(
                    state,
                    %terminal,
                    kept = %self.grammar.productions()[earlier],
                    dropped = %self.grammar.productions()[production],
                    "reduce/reduce conflict"
                );
                Some(Action::Reduce(earlier.min(production)))
            }
            other => other,
        }
    }

    fn build(&self) -> ParseTables {
        let states = self.lr0_states();
        let lookaheads = self.lookaheads(&states);
        let count = states.len();

        let mut stats = TableStats {
            states: count,
            productions: self.grammar.productions().len(),
            ..TableStats::default()
        };
        let mut actions = vec![None; count * Terminal::COUNT];
        let mut gotos = vec![None; count * NonTerminal::COUNT];
        let mut defaults = vec![None; count];
        let mut consistent = vec![false; count];

        for (id, state) in states.iter().enumerate() {
            let row = &mut actions[id * Terminal::COUNT..(id + 1) * Terminal::COUNT];
            for (&symbol, &target) in &state.transitions {
                match symbol {
                    Symbol::T(t) => row[t.index()] = Some(Action::Shift(target)),
                    Symbol::N(n) => gotos[id * NonTerminal::COUNT + n.index()] = Some(target),
                }
            }

            let seeds: Vec<(Item, TermSet)> = state
                .kernel
                .iter()
                .copied()
                .zip(lookaheads[id].iter().copied())
                .collect();
            let mut complete: Vec<(ProductionId, TermSet)> = self
                .closure1(&seeds)
                .into_iter()
                .filter(|(item, _)| item.dot == self.rhs(*item).len())
                .map(|(item, set)| (item.production, set))
                .collect();
            complete.sort_unstable_by_key(|(production, _)| *production);

            for (production, set) in complete {
                for terminal in Terminal::ALL {
                    if set & bit(terminal) == 0 {
                        continue;
                    }
                    let slot = &mut row[terminal.index()];
                    *slot = if production == 0 {
                        Some(Action::Accept)
                    } else {
                        self.resolve(*slot, production, terminal, id, &mut stats)
                    };
                }
            }

            let mut counts: BTreeMap<ProductionId, usize> = BTreeMap::new();
            let mut others = 0;
            for entry in row.iter().flatten() {
                match entry {
                    Action::Reduce(p) => *counts.entry(*p).or_default() += 1,
                    _ => others += 1,
                }
            }
            let mut best: Option<(ProductionId, usize)> = None;
            for (&production, &n) in &counts {
                if best.is_none_or(|(_, most)| n > most) {
                    best = Some((production, n));
                }
            }
            defaults[id] = best.map(|(production, _)| production);
            consistent[id] = others == 0 && counts.len() == 1;
        }

        stats.action_entries = actions.iter().filter(|a| a.is_some()).count();
        stats.goto_entries = gotos.iter().filter(|g| g.is_some()).count();
        debug!(%stats, "built parse tables");

        ParseTables {
            productions: self.grammar.productions().to_vec(),
            actions,
            gotos,
            defaults,
            consistent,
            stats,
        }
    }
}

/// Builds LALR(1) tables for a grammar.
pub(crate) fn build(grammar: &Grammar) -> ParseTables {
    Builder::new(grammar).build()
}
