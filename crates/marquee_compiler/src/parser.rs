//! The table-driven parser driver.
//!
//! Pulls tokens only when the current state needs a lookahead, runs the
//! semantic action of every reduction, and recovers from syntax errors by
//! popping back to a state that can shift the `error` terminal.

use marquee_foundation::{Error, ErrorKind, Result, Span, Terminal, Token, TokenSource};
use marquee_grammar::{Action, ParseTables, StateId};
use tracing::trace;

use crate::actions::{Compiler, Rhs};
use crate::diagnostics::{Diagnostic, Severity};
use crate::value::SemanticValue;

/// Number of tokens that must be shifted after an error before the next
/// error is reported.
const RECOVERY_SHIFTS: u8 = 3;

/// Expected terminals are listed in a syntax error only up to this many.
const MAX_EXPECTED: usize = 4;

/// One entry of the parser stack.
#[derive(Clone, Debug)]
pub(crate) struct Frame {
    pub(crate) state: StateId,
    pub(crate) value: SemanticValue,
    pub(crate) span: Span,
}

struct Stack {
    frames: Vec<Frame>,
    limit: usize,
}

impl Stack {
    fn new(capacity: usize, limit: usize) -> Result<Self> {
        let mut frames = Vec::new();
        frames
            .try_reserve(capacity.min(limit))
            .map_err(|_| Error::new(ErrorKind::StackExhausted { depth: 0 }))?;
        Ok(Self { frames, limit })
    }

    fn push(&mut self, frame: Frame) -> Result<()> {
        let depth = self.frames.len();
        if depth >= self.limit {
            return Err(Error::new(ErrorKind::StackExhausted { depth }));
        }
        if depth == self.frames.capacity() {
            self.frames
                .try_reserve(depth.max(1))
                .map_err(|_| Error::new(ErrorKind::StackExhausted { depth }))?;
        }
        self.frames.push(frame);
        Ok(())
    }

    fn top(&self) -> Result<&Frame> {
        self.frames
            .last()
            .ok_or_else(|| Error::internal("parser stack is empty"))
    }
}

/// Parses one unit from `source`, running semantic actions on `compiler`.
pub(crate) fn parse(compiler: &mut Compiler<'_>, mut source: impl TokenSource) -> Result<()> {
    let tables = ParseTables::script();
    let tracing = compiler.options().trace_reductions;
    let mut stack = Stack::new(
        compiler.options().initial_stack_capacity,
        compiler.options().max_stack_depth,
    )?;
    stack.push(Frame {
        state: ParseTables::START,
        value: SemanticValue::None,
        span: Span::at_start(),
    })?;

    let mut lookahead: Option<Token> = None;
    let mut errstatus: u8 = 0;

    loop {
        let state = stack.top()?.state;

        let action = if tables.is_consistent(state) {
            let production = tables.default_reduction(state).ok_or_else(|| {
                Error::internal(format!("consistent state {state} has no reduction"))
            })?;
            Some(Action::Reduce(production))
        } else {
            let token = lookahead.get_or_insert_with(|| pull(compiler, &mut source));
            match tables.action(state, token.kind) {
                Some(action) => Some(action),
                None => tables.default_reduction(state).map(Action::Reduce),
            }
        };

        match action {
            Some(Action::Shift(next)) => {
                let token = lookahead
                    .take()
                    .ok_or_else(|| Error::internal("shift without a lookahead"))?;
                if tracing {
                    trace!(state, next, token = %token.kind, "shift");
                }
                stack.push(Frame {
                    state: next,
                    value: token.value.into(),
                    span: token.span,
                })?;
                errstatus = errstatus.saturating_sub(1);
            }
            Some(Action::Reduce(id)) => {
                let production = tables
                    .production(id)
                    .ok_or_else(|| Error::internal(format!("no production {id}")))?;
                let count = production.len();
                let split = stack
                    .frames
                    .len()
                    .checked_sub(count)
                    .filter(|&n| n > 0)
                    .ok_or_else(|| {
                        Error::internal(format!("stack too shallow to reduce {production}"))
                    })?;
                let frames = stack.frames.split_off(split);
                let span = match (frames.first(), frames.last()) {
                    (Some(first), Some(last)) => first.span.to(last.span),
                    _ => stack.top()?.span.empty_after(),
                };
                if tracing {
                    trace!(state, production = %production, "reduce");
                }
                let rhs = Rhs::new(production.rule, frames);
                let value = compiler.reduce(production.rule, rhs, span)?;
                let below = stack.top()?.state;
                let next = tables.goto(below, production.lhs).ok_or_else(|| {
                    Error::internal(format!("no goto from state {below} on {}", production.lhs))
                })?;
                stack.push(Frame {
                    state: next,
                    value,
                    span,
                })?;
            }
            Some(Action::Accept) => {
                if tracing {
                    trace!(state, "accept");
                }
                return Ok(());
            }
            Some(Action::Error) | None => {
                let token = lookahead
                    .as_ref()
                    .ok_or_else(|| Error::internal("error without a lookahead"))?;
                if errstatus == 0 {
                    let message = syntax_message(tables, state, token.kind);
                    compiler.report(Diagnostic::new(Severity::Error, message, token.span));
                } else if errstatus == RECOVERY_SHIFTS {
                    // The script grammar can end after any recovered line, so
                    // this only fires for tables without that property.
                    if token.is_eof() {
                        return Err(Error::new(ErrorKind::ParseAborted {
                            errors: compiler.error_count(),
                        }));
                    }
                    if tracing {
                        trace!(state, token = %token.kind, "discard");
                    }
                    lookahead = None;
                }
                errstatus = RECOVERY_SHIFTS;
                recover(tables, &mut stack, compiler.error_count())?;
            }
        }
    }
}

/// Reads the next token, mapping kinds a lexer must not produce to
/// `Undefined`.
fn pull(compiler: &mut Compiler<'_>, source: &mut impl TokenSource) -> Token {
    let mut token = source.next_token();
    if token.kind.is_reserved() {
        token.kind = Terminal::Undefined;
    }
    compiler.saw(token.span);
    token
}

/// Pops frames until a state can shift `error`, then shifts it.
fn recover(tables: &ParseTables, stack: &mut Stack, errors: usize) -> Result<()> {
    loop {
        let top = stack.top()?;
        if let Some(Action::Shift(next)) = tables.action(top.state, Terminal::Error) {
            let span = top.span.empty_after();
            return stack.push(Frame {
                state: next,
                value: SemanticValue::None,
                span,
            });
        }
        stack.frames.pop();
        // Unreachable with the script tables: the start state shifts `error`.
        if stack.frames.is_empty() {
            return Err(Error::new(ErrorKind::ParseAborted { errors }));
        }
    }
}

fn syntax_message(tables: &ParseTables, state: StateId, unexpected: Terminal) -> String {
    let mut message = format!("syntax error, unexpected {}", unexpected.name());
    let expected: Vec<Terminal> = tables.expected(state).take(MAX_EXPECTED + 1).collect();
    if !expected.is_empty() && expected.len() <= MAX_EXPECTED {
        for (i, terminal) in expected.iter().enumerate() {
            message.push_str(if i == 0 { ", expecting " } else { " or " });
            message.push_str(terminal.name());
        }
    }
    message
}
