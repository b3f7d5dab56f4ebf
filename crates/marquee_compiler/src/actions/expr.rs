//! Expressions lower to postfix code.
//!
//! Operands are already emitted when an operator reduces, so each action
//! appends at most the operator itself. The value of every expression is
//! the offset of its first word.

use marquee_bytecode::Opcode;
use marquee_foundation::{Result, Span};
use marquee_grammar::Rule;

use super::{Compiler, Rhs, unhandled};
use crate::value::SemanticValue;

/// The opcode of a binary or slicing operator.
fn operator(rule: Rule) -> Option<Opcode> {
    Some(match rule {
        Rule::ExprAdd => Opcode::Add,
        Rule::ExprSub => Opcode::Sub,
        Rule::ExprMul => Opcode::Mul,
        Rule::ExprDiv => Opcode::Div,
        Rule::ExprMod => Opcode::Mod,
        Rule::ExprGt => Opcode::Gt,
        Rule::ExprLt => Opcode::Lt,
        Rule::ExprEq => Opcode::Eq,
        Rule::ExprNeq => Opcode::Neq,
        Rule::ExprGe => Opcode::Ge,
        Rule::ExprLe => Opcode::Le,
        Rule::ExprAnd => Opcode::And,
        Rule::ExprOr => Opcode::Or,
        Rule::ExprAmpersand => Opcode::Ampersand,
        Rule::ExprAfter => Opcode::After,
        Rule::ExprConcat => Opcode::Concat,
        Rule::ExprContains => Opcode::Contains,
        Rule::ExprStarts => Opcode::Starts,
        Rule::ExprIntersects => Opcode::Intersects,
        Rule::ExprWithin => Opcode::Within,
        Rule::ExprCharOf => Opcode::CharOf,
        Rule::ExprCharToOf => Opcode::CharToOf,
        Rule::ExprItemOf => Opcode::ItemOf,
        Rule::ExprItemToOf => Opcode::ItemToOf,
        Rule::ExprLineOf => Opcode::LineOf,
        Rule::ExprLineToOf => Opcode::LineToOf,
        Rule::ExprWordOf => Opcode::WordOf,
        Rule::ExprWordToOf => Opcode::WordToOf,
        _ => return None,
    })
}

/// Rules introduced by a prefix keyword, whose code starts at symbol 1.
fn is_prefixed(rule: Rule) -> bool {
    matches!(
        rule,
        Rule::ExprIntersects
            | Rule::ExprWithin
            | Rule::ExprCharOf
            | Rule::ExprCharToOf
            | Rule::ExprItemOf
            | Rule::ExprItemToOf
            | Rule::ExprLineOf
            | Rule::ExprLineToOf
            | Rule::ExprWordOf
            | Rule::ExprWordToOf
    )
}

impl Compiler<'_> {
    pub(super) fn expression(
        &mut self,
        rule: Rule,
        mut rhs: Rhs,
        span: Span,
    ) -> Result<SemanticValue> {
        if let Some(op) = operator(rule) {
            let start = rhs.code(usize::from(is_prefixed(rule)))?;
            self.emit(op);
            return Ok(SemanticValue::Code(start));
        }

        let start = match rule {
            Rule::ExprInt => {
                let value = rhs.int(0)?;
                self.script.emit_const(value)
            }
            Rule::ExprFloat => {
                let value = rhs.float(0)?;
                self.script.emit_float(value)
            }
            Rule::ExprSymbol => {
                let symbol = rhs.text(0)?;
                self.script.emit_symbol(&symbol)
            }
            Rule::ExprString => {
                let text = rhs.text(0)?;
                self.script.emit_string(&text)
            }
            Rule::ExprBuiltinNoArgs => {
                let name = rhs.text(0)?;
                self.emit_builtin(&name, 0)
            }
            Rule::ExprCall => {
                let name = rhs.text(0)?;
                let (count, start) = rhs.args(2)?;
                let span = rhs.span(0);
                let callee = self.callee(name, span);
                self.emit_call(callee, count, span);
                start
            }
            Rule::ExprVar => {
                let name = rhs.text(0)?;
                self.script.emit_named(Opcode::Eval, &name)
            }
            Rule::ExprTheEntity => {
                let entity = rhs.entity(0)?;
                let start = self.script.emit_const(0);
                self.emit(Opcode::TheEntityPush);
                self.script.emit_entity(entity);
                start
            }
            Rule::ExprTheEntityWithId => {
                let entity = rhs.entity(0)?;
                let start = rhs.code(1)?;
                self.emit(Opcode::TheEntityPush);
                self.script.emit_entity(entity);
                start
            }
            Rule::ExprAsgn => rhs.code(0)?,
            Rule::ExprNot => {
                let start = rhs.code(1)?;
                self.emit(Opcode::Not);
                start
            }
            Rule::ExprNegate => {
                let start = rhs.code(1)?;
                self.emit(Opcode::Negate);
                start
            }
            Rule::ExprPlus | Rule::ExprParen => rhs.code(1)?,

            Rule::ArgListEmpty => {
                return Ok(SemanticValue::Args {
                    count: 0,
                    start: self.here(),
                });
            }
            Rule::ArgListFirst => {
                let start = rhs.code(0)?;
                return Ok(SemanticValue::Args { count: 1, start });
            }
            Rule::ArgListNext => {
                let (count, start) = rhs.args(0)?;
                return Ok(SemanticValue::Args {
                    count: count + 1,
                    start,
                });
            }
            Rule::MacroCall => {
                let name = rhs.text(0)?;
                let start = rhs.code(1)?;
                let (count, _) = rhs.args(2)?;
                // a command line names its callee as written
                self.emit_call(name, count, span);
                start
            }
            _ => return Err(unhandled(rule)),
        };
        Ok(SemanticValue::Code(start))
    }
}
