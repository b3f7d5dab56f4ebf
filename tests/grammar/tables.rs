//! Structural properties of the generated tables.

use marquee_foundation::Terminal;
use marquee_grammar::{Action, Grammar, PRODUCTIONS, ParseTables, Rule};

fn tables() -> &'static ParseTables {
    ParseTables::script()
}

#[test]
fn tables_cover_every_production() {
    let tables = tables();
    assert_eq!(tables.productions().len(), PRODUCTIONS.len());
    assert_eq!(tables.stats().productions, PRODUCTIONS.len());
    assert_eq!(tables.stats().states, tables.state_count());
}

#[test]
fn rebuilding_gives_identical_tables() {
    let rebuilt = ParseTables::build(&Grammar::script());
    assert_eq!(&rebuilt, tables());
}

#[test]
fn every_entry_points_inside_the_tables() {
    let tables = tables();
    let states = tables.state_count();
    let productions = tables.productions().len();

    for state in 0..states {
        for terminal in Terminal::ALL {
            match tables.action(state, terminal) {
                Some(Action::Shift(next)) => assert!(next < states),
                Some(Action::Reduce(p)) => assert!(p > 0 && p < productions),
                Some(Action::Accept) => assert_eq!(terminal, Terminal::Eof),
                Some(Action::Error) | None => {}
            }
        }
        for production in PRODUCTIONS {
            if let Some(next) = tables.goto(state, production.lhs) {
                assert!(next < states);
            }
        }
        if let Some(p) = tables.default_reduction(state) {
            assert!(p < productions);
        }
    }
}

#[test]
fn consistent_states_have_a_default_reduction() {
    let tables = tables();
    for state in 0..tables.state_count() {
        if tables.is_consistent(state) {
            let p = tables.default_reduction(state);
            assert!(p.is_some(), "state {state}");
            for terminal in Terminal::ALL {
                assert!(
                    !matches!(tables.action(state, terminal), Some(Action::Shift(_))),
                    "consistent state {state} shifts {terminal}"
                );
            }
        }
    }
}

#[test]
fn exactly_one_state_accepts() {
    let tables = tables();
    let accepting = (0..tables.state_count())
        .filter(|&s| tables.action(s, Terminal::Eof) == Some(Action::Accept))
        .count();
    assert_eq!(accepting, 1);
}

#[test]
fn expected_terminals_are_never_reserved() {
    let tables = tables();
    for state in 0..tables.state_count() {
        for terminal in tables.expected(state) {
            assert!(!terminal.is_reserved(), "state {state} expects {terminal}");
        }
    }
}

#[test]
fn binary_productions_take_operator_precedence() {
    let grammar = Grammar::script();
    let position = |rule: Rule| PRODUCTIONS.iter().position(|p| p.rule == rule).unwrap();
    let add = grammar.production_precedence(position(Rule::ExprAdd)).unwrap();
    let mul = grammar.production_precedence(position(Rule::ExprMul)).unwrap();
    let and = grammar.production_precedence(position(Rule::ExprAnd)).unwrap();
    assert!(mul.level > add.level);
    assert!(add.level > and.level);
}
