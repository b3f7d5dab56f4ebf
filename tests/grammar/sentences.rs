//! Terminal strings walked through the tables without semantic actions.

use marquee_foundation::Terminal::{self, *};
use marquee_grammar::{Action, ParseTables, Rule};

/// Returns the reductions made while accepting `input`, or `None` if the
/// tables reject it.
fn recognize(input: &[Terminal]) -> Option<Vec<Rule>> {
    let tables = ParseTables::script();
    let mut stack = vec![ParseTables::START];
    let mut input = input.iter().copied().chain(std::iter::once(Eof));
    let mut lookahead = None;
    let mut reductions = Vec::new();

    loop {
        let state = *stack.last()?;
        let action = if tables.is_consistent(state) {
            Action::Reduce(tables.default_reduction(state)?)
        } else {
            let terminal = *lookahead.get_or_insert_with(|| input.next().unwrap_or(Eof));
            tables
                .action(state, terminal)
                .or_else(|| tables.default_reduction(state).map(Action::Reduce))?
        };
        match action {
            Action::Shift(next) => {
                stack.push(next);
                lookahead = None;
            }
            Action::Reduce(p) => {
                let production = tables.production(p)?;
                stack.truncate(stack.len() - production.len());
                reductions.push(production.rule);
                stack.push(tables.goto(*stack.last()?, production.lhs)?);
            }
            Action::Accept => return Some(reductions),
            Action::Error => return None,
        }
    }
}

fn accepts(input: &[Terminal]) -> bool {
    recognize(input).is_some()
}

// =============================================================================
// Accepted Sentences
// =============================================================================

#[test]
fn empty_program() {
    assert!(accepts(&[]));
    assert!(accepts(&[Newline, Newline]));
}

#[test]
fn statements() {
    assert!(accepts(&[Put, Int, Plus, Int, Star, Int, Into, Id, Newline]));
    assert!(accepts(&[Global, Id, Comma, Id, Newline]));
    assert!(accepts(&[Set, TheEntity, To, Int, Newline]));
    assert!(accepts(&[Go, Loop, Newline]));
    assert!(accepts(&[Put, Char, Int, To, Int, Of, Id, Newline]));
    assert!(accepts(&[Id, Int, Comma, Int, Newline]));
}

#[test]
fn control_flow() {
    assert!(accepts(&[If, Int, Equals, Int, Then, Exit, Repeat]));
    assert!(accepts(&[
        If, Id, Then, Newline, Put, Int, Newline, NlElse, Newline, Put, Int, Newline,
        EndClause, Newline
    ]));
    assert!(accepts(&[
        If, Id, Then, Newline, Put, Int, Newline, NlElsIf, Id, Then, Newline, Put, Int,
        Newline, EndClause, Newline
    ]));
    assert!(accepts(&[
        Repeat, While, Id, Lt, Int, Newline, Put, Id, Newline, EndClause, Newline
    ]));
    assert!(accepts(&[
        Repeat, With, Id, Equals, Int, Down, To, Int, Newline, Put, Id, Newline, EndClause,
        Newline
    ]));
    assert!(accepts(&[When, Id, Then, Id, Newline]));
}

#[test]
fn definitions() {
    assert!(accepts(&[
        On, Id, Id, Comma, Id, Newline, Put, Id, Newline, EndClause, Newline
    ]));
    assert!(accepts(&[Macro, Id, Id, Newline, Put, Id, Newline]));
    assert!(accepts(&[
        Factory, Id, Newline, Method, Id, Id, Newline, Put, Id, Newline
    ]));
}

// =============================================================================
// Rejected Sentences
// =============================================================================

#[test]
fn rejects_without_recovery() {
    assert!(!accepts(&[RParen]));
    assert!(!accepts(&[Put, RParen, Into, Id]));
    assert!(!accepts(&[If, Int]));
    assert!(!accepts(&[Int, Int]));
}

// =============================================================================
// Reduction Order
// =============================================================================

fn position(reductions: &[Rule], rule: Rule) -> usize {
    reductions
        .iter()
        .position(|r| *r == rule)
        .unwrap_or_else(|| panic!("{rule:?} not reduced"))
}

#[test]
fn multiplication_reduces_before_addition() {
    let reductions = recognize(&[Int, Plus, Int, Star, Int]).unwrap();
    assert!(position(&reductions, Rule::ExprMul) < position(&reductions, Rule::ExprAdd));
}

#[test]
fn subtraction_groups_left() {
    // (1 - 2) - 3: the first Sub is reduced before the third literal is read
    let reductions = recognize(&[Int, Minus, Int, Minus, Int]).unwrap();
    let ints: Vec<usize> = reductions
        .iter()
        .enumerate()
        .filter(|(_, r)| **r == Rule::ExprInt)
        .map(|(i, _)| i)
        .collect();
    let first_sub = position(&reductions, Rule::ExprSub);
    assert!(first_sub < ints[2]);
}

#[test]
fn bare_identifier_line_is_a_macro_call() {
    let reductions = recognize(&[Id, Newline]).unwrap();
    assert!(reductions.contains(&Rule::MacroCall));
    assert!(!reductions.contains(&Rule::ExprVar));
}

#[test]
fn identifier_inside_expression_is_a_variable() {
    let reductions = recognize(&[Put, Id, Newline]).unwrap();
    assert!(reductions.contains(&Rule::ExprVar));
    assert!(!reductions.contains(&Rule::MacroCall));
}
