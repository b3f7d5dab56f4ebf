//! Macro, handler, factory and method definitions.

use marquee_bytecode::Opcode;
use marquee_foundation::{Result, Span};
use marquee_grammar::Rule;
use tracing::debug;

use super::{Compiler, Rhs, unhandled};
use crate::registry::{HandlerEntry, Scope};
use crate::value::SemanticValue;

/// Implicit receiver argument of a factory method.
const RECEIVER: &str = "me";

impl Compiler<'_> {
    pub(super) fn definition(
        &mut self,
        rule: Rule,
        mut rhs: Rhs,
        span: Span,
    ) -> Result<SemanticValue> {
        match rule {
            Rule::MacroStart | Rule::HandlerStart => {
                self.open_definition(span);
                self.context.factory = None;
            }
            Rule::MethodStart => {
                self.open_definition(span);
                if self.context.factory.is_some() {
                    self.context.pending_args.push(RECEIVER.to_string());
                }
            }
            Rule::ArgDefEmpty => return Ok(SemanticValue::Count(0)),
            Rule::ArgDefFirst => {
                let name = rhs.text(0)?;
                self.context.pending_args.push(name);
                return Ok(SemanticValue::Count(1));
            }
            Rule::ArgDefNext | Rule::ArgDefNextLine => {
                let count = rhs.count(0)?;
                let name = rhs.text(if rule == Rule::ArgDefNext { 2 } else { 3 })?;
                self.context.pending_args.push(name);
                return Ok(SemanticValue::Count(count + 1));
            }
            Rule::ArgStore => {
                let names = std::mem::take(&mut self.context.pending_args);
                for name in names.iter().rev() {
                    self.script.emit_named(Opcode::VarPush, name);
                    self.emit(Opcode::Assign);
                }
            }

            Rule::DefineMacro => {
                let name = rhs.text(1)?;
                let entry = rhs.code(3)?;
                let count = rhs.count(4)?;
                self.close_definition(Scope::Global, name, entry, count);
            }
            Rule::DefineHandler => {
                let name = rhs.text(1)?;
                let entry = rhs.code(3)?;
                let count = rhs.count(4)?;
                let closer = rhs.end_word(8)?;
                if !closer.is_empty() {
                    self.check_end(&closer, &name, rhs.span(8))?;
                }
                self.close_definition(Scope::Global, name, entry, count);
            }
            Rule::DefineMethod => {
                let name = rhs.text(1)?;
                let entry = rhs.code(3)?;
                let count = rhs.count(4)?;
                match self.context.factory.clone() {
                    Some(factory) => {
                        self.close_definition(Scope::Factory(&factory), name, entry, count + 1);
                    }
                    None => {
                        self.warning(
                            format!("method '{name}' defined outside a factory"),
                            span,
                        );
                        self.close_definition(Scope::Global, name, entry, count);
                    }
                }
            }
            Rule::DefineFactory => {
                let name = rhs.text(1)?;
                self.script.emit_named(Opcode::Factory, &name);
                self.registry.define_factory(&name, self.unit);
                debug!(unit = %self.unit, factory = %name, "factory defined");
                self.context.factory = Some(name);
            }
            _ => return Err(unhandled(rule)),
        }
        Ok(SemanticValue::None)
    }

    fn open_definition(&mut self, span: Span) {
        if let Some(start) = self.context.open_definition.replace(span) {
            self.report_dropped_definition(start);
        }
    }

    /// Warns about a definition that error recovery discarded before its close.
    pub(super) fn report_dropped_definition(&mut self, start: Span) {
        let message = format!(
            "definition starting on line {} was dropped after a syntax error",
            start.line
        );
        self.warning(message, start);
    }

    /// Emits the return epilogue, then registers the definition.
    fn close_definition(&mut self, scope: Scope<'_>, name: String, entry: u32, arg_count: u32) {
        self.script.emit_const(0);
        self.emit(Opcode::ProcRet);
        debug!(unit = %self.unit, handler = %name, entry, arg_count, "handler defined");
        self.registry.define(
            scope,
            HandlerEntry {
                name,
                unit: self.unit,
                entry,
                arg_count,
            },
        );
        self.context.open_definition = None;
    }
}
