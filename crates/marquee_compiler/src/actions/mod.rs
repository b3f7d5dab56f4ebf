//! Semantic actions.
//!
//! The parser calls [`Compiler::reduce`] once per reduction with the values
//! of the right-hand side. Actions emit code into the unit's script, patch
//! placeholder slots, and register definitions. Each action returns the
//! value of its left-hand side.
//!
//! - [`expr`] - expressions, argument lists and calls
//! - [`stmt`] - assignments, commands and structured statements
//! - [`defn`] - macro, handler, factory and method definitions

mod defn;
mod expr;
mod stmt;

use std::mem;

use marquee_bytecode::{CodeOffset, Inst, Opcode, Script};
use marquee_foundation::{EntityRef, Error, Result, Span};
use marquee_grammar::Rule;

use crate::config::{CompileOptions, EndMismatchPolicy};
use crate::diagnostics::{Diagnostic, ErrorSink, Severity};
use crate::parser::Frame;
use crate::registry::Registry;
use crate::session::{CallSite, CompilationUnit, Context, UnitId, UnitStatus};
use crate::value::{Fixup, FixupKind, SemanticValue};

/// Right-hand-side values of a reduction, indexed from 0.
pub(crate) struct Rhs {
    rule: Rule,
    frames: Vec<Frame>,
}

impl Rhs {
    pub(crate) fn new(rule: Rule, frames: Vec<Frame>) -> Self {
        Self { rule, frames }
    }

    fn take(&mut self, index: usize) -> Result<SemanticValue> {
        self.frames
            .get_mut(index)
            .map(|frame| mem::take(&mut frame.value))
            .ok_or_else(|| {
                Error::internal(format!("{:?} has no symbol {index}", self.rule))
            })
    }

    fn mismatch(&self, index: usize, wanted: &str, found: &SemanticValue) -> Error {
        Error::internal(format!(
            "{:?} symbol {index}: expected {wanted}, found {}",
            self.rule,
            found.kind()
        ))
    }

    fn span(&self, index: usize) -> Span {
        self.frames
            .get(index)
            .map_or_else(Span::at_start, |frame| frame.span)
    }

    fn code(&mut self, index: usize) -> Result<CodeOffset> {
        match self.take(index)? {
            SemanticValue::Code(offset) => Ok(offset),
            other => Err(self.mismatch(index, "code offset", &other)),
        }
    }

    /// A code offset, or `None` for an absent optional part.
    fn optional_code(&mut self, index: usize) -> Result<Option<CodeOffset>> {
        match self.take(index)? {
            SemanticValue::Code(offset) => Ok(Some(offset)),
            SemanticValue::None => Ok(None),
            other => Err(self.mismatch(index, "code offset", &other)),
        }
    }

    fn text(&mut self, index: usize) -> Result<String> {
        match self.take(index)? {
            SemanticValue::Str(text) => Ok(text),
            other => Err(self.mismatch(index, "text", &other)),
        }
    }

    /// The word after `end`, empty when the closer was bare.
    fn end_word(&mut self, index: usize) -> Result<String> {
        match self.take(index)? {
            SemanticValue::Str(text) => Ok(text),
            SemanticValue::None => Ok(String::new()),
            other => Err(self.mismatch(index, "text", &other)),
        }
    }

    fn int(&mut self, index: usize) -> Result<i32> {
        match self.take(index)? {
            SemanticValue::Int(n) => Ok(n),
            other => Err(self.mismatch(index, "integer", &other)),
        }
    }

    fn float(&mut self, index: usize) -> Result<f64> {
        match self.take(index)? {
            SemanticValue::Float(x) => Ok(x),
            SemanticValue::Int(n) => Ok(f64::from(n)),
            other => Err(self.mismatch(index, "float", &other)),
        }
    }

    fn entity(&mut self, index: usize) -> Result<EntityRef> {
        match self.take(index)? {
            SemanticValue::Entity(entity) => Ok(entity),
            other => Err(self.mismatch(index, "entity", &other)),
        }
    }

    fn count(&mut self, index: usize) -> Result<u32> {
        match self.take(index)? {
            SemanticValue::Count(n) => Ok(n),
            other => Err(self.mismatch(index, "count", &other)),
        }
    }

    fn args(&mut self, index: usize) -> Result<(u32, CodeOffset)> {
        match self.take(index)? {
            SemanticValue::Args { count, start } => Ok((count, start)),
            other => Err(self.mismatch(index, "argument list", &other)),
        }
    }

    fn fixup(&mut self, index: usize) -> Result<Fixup> {
        match self.take(index)? {
            SemanticValue::Fixup(fixup) => Ok(fixup),
            other => Err(self.mismatch(index, "fixup", &other)),
        }
    }

    fn chain(&mut self, index: usize) -> Result<Vec<Fixup>> {
        match self.take(index)? {
            SemanticValue::Chain(links) => Ok(links),
            other => Err(self.mismatch(index, "else-if chain", &other)),
        }
    }
}

/// Per-unit compilation state handed to every semantic action.
pub(crate) struct Compiler<'a> {
    unit: UnitId,
    script: Script,
    options: &'a CompileOptions,
    registry: &'a mut Registry,
    context: &'a mut Context,
    sink: &'a mut dyn ErrorSink,
    diagnostics: Vec<Diagnostic>,
    calls: Vec<CallSite>,
    open: Vec<Fixup>,
    errors: usize,
    last_span: Span,
}

impl<'a> Compiler<'a> {
    pub(crate) fn new(
        unit: UnitId,
        options: &'a CompileOptions,
        registry: &'a mut Registry,
        context: &'a mut Context,
        sink: &'a mut dyn ErrorSink,
    ) -> Self {
        Self {
            unit,
            script: Script::new(),
            options,
            registry,
            context,
            sink,
            diagnostics: Vec::new(),
            calls: Vec::new(),
            open: Vec::new(),
            errors: 0,
            last_span: Span::at_start(),
        }
    }

    pub(crate) fn options(&self) -> &CompileOptions {
        self.options
    }

    pub(crate) fn error_count(&self) -> usize {
        self.errors
    }

    /// Records the position of the latest token read.
    pub(crate) fn saw(&mut self, span: Span) {
        self.last_span = span;
    }

    /// Line and column of the latest token read.
    pub(crate) fn position(&self) -> (u32, u32) {
        (self.last_span.line, self.last_span.column)
    }

    /// Records a diagnostic on the unit and hands it to the sink.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors += 1;
        }
        self.sink.report(&diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn warning(&mut self, message: impl Into<String>, span: Span) {
        self.report(Diagnostic::new(Severity::Warning, message, span));
    }

    /// Closes the unit after acceptance.
    pub(crate) fn finish(mut self, name: Option<String>) -> CompilationUnit {
        if let Some(start) = self.context.open_definition.take() {
            self.report_dropped_definition(start);
        }
        let dangling = mem::take(&mut self.open);
        for fixup in &dangling {
            let message = format!(
                "'{}' at offset {} was never closed",
                fixup.kind.keyword(),
                fixup.at
            );
            let span = self.last_span;
            self.warning(message, span);
        }
        let status = if self.errors == 0 {
            UnitStatus::Clean
        } else {
            UnitStatus::Flagged {
                errors: self.errors,
            }
        };
        CompilationUnit {
            id: self.unit,
            name,
            script: self.script,
            status,
            diagnostics: self.diagnostics,
            calls: self.calls,
            unresolved_fixups: dangling,
        }
    }

    /// Runs the action of `rule`.
    pub(crate) fn reduce(&mut self, rule: Rule, rhs: Rhs, span: Span) -> Result<SemanticValue> {
        use Rule as R;
        match rule {
            R::ExprInt
            | R::ExprFloat
            | R::ExprSymbol
            | R::ExprString
            | R::ExprBuiltinNoArgs
            | R::ExprCall
            | R::ExprVar
            | R::ExprTheEntity
            | R::ExprTheEntityWithId
            | R::ExprAsgn
            | R::ExprAdd
            | R::ExprSub
            | R::ExprMul
            | R::ExprDiv
            | R::ExprMod
            | R::ExprGt
            | R::ExprLt
            | R::ExprEq
            | R::ExprNeq
            | R::ExprGe
            | R::ExprLe
            | R::ExprAnd
            | R::ExprOr
            | R::ExprNot
            | R::ExprAmpersand
            | R::ExprAfter
            | R::ExprConcat
            | R::ExprContains
            | R::ExprStarts
            | R::ExprPlus
            | R::ExprNegate
            | R::ExprParen
            | R::ExprIntersects
            | R::ExprWithin
            | R::ExprCharOf
            | R::ExprCharToOf
            | R::ExprItemOf
            | R::ExprItemToOf
            | R::ExprLineOf
            | R::ExprLineToOf
            | R::ExprWordOf
            | R::ExprWordToOf
            | R::ArgListEmpty
            | R::ArgListFirst
            | R::ArgListNext
            | R::MacroCall => self.expression(rule, rhs, span),

            R::DefineMacro
            | R::DefineFactory
            | R::DefineMethod
            | R::DefineHandler
            | R::MacroStart
            | R::MethodStart
            | R::HandlerStart
            | R::ArgDefEmpty
            | R::ArgDefFirst
            | R::ArgDefNext
            | R::ArgDefNextLine
            | R::ArgStore => self.definition(rule, rhs, span),

            R::Accept
            | R::ProgramLines
            | R::ProgramFirstLine
            | R::Newline
            | R::LineEmpty
            | R::LineDefn
            | R::LineFunc
            | R::LineMacro
            | R::LineStmt
            | R::LineError => Ok(SemanticValue::None),

            _ => self.statement(rule, rhs),
        }
    }

    // === Emission helpers ===

    fn here(&self) -> CodeOffset {
        self.script.len()
    }

    fn emit(&mut self, op: Opcode) -> CodeOffset {
        self.script.emit_op(op)
    }

    /// Emits `op` followed by `slots` placeholders and tracks the fixup.
    fn open_fixup(&mut self, kind: FixupKind, op: Opcode) -> Fixup {
        let at = self.emit(op);
        self.script.reserve(kind.slots() as usize);
        let fixup = Fixup::new(kind, at);
        self.open.push(fixup);
        fixup
    }

    fn patch(&mut self, fixup: Fixup, slot: u32, word: Inst) -> Result<()> {
        self.script.patch(fixup.slot(slot), word)
    }

    fn close_fixup(&mut self, fixup: Fixup) {
        if let Some(index) = self.open.iter().rposition(|open| *open == fixup) {
            self.open.remove(index);
        }
    }

    /// Maps the receiver `me` to the current factory.
    fn callee(&mut self, name: String, span: Span) -> String {
        if !name.eq_ignore_ascii_case("me") {
            return name;
        }
        match self.context.factory.clone() {
            Some(factory) => factory,
            None => {
                self.warning("'me' called outside a factory", span);
                name
            }
        }
    }

    /// Emits `Call name argc` and records the call site.
    fn emit_call(&mut self, name: String, arg_count: u32, span: Span) -> CodeOffset {
        let offset = self.script.emit_named(Opcode::Call, &name);
        self.script.emit_word(arg_count);
        self.calls.push(CallSite {
            name,
            offset,
            arg_count,
            line: span.line,
            column: span.column,
        });
        offset
    }

    /// Emits `CallBuiltin name argc`.
    fn emit_builtin(&mut self, name: &str, arg_count: u32) -> CodeOffset {
        let offset = self.script.emit_named(Opcode::CallBuiltin, name);
        self.script.emit_word(arg_count);
        offset
    }

    /// Compares the word after `end` with the construct being closed.
    ///
    /// # Errors
    ///
    /// Under [`EndMismatchPolicy::Reject`] a mismatch aborts the unit.
    fn check_end(&mut self, found: &str, expected: &str, span: Span) -> Result<()> {
        if found.eq_ignore_ascii_case(expected) {
            return Ok(());
        }
        match self.options.end_mismatch {
            EndMismatchPolicy::Recover => {
                let message =
                    format!("end mismatch: expected 'end {expected}' but got 'end {found}'");
                self.report(Diagnostic::new(Severity::Error, message, span));
                Ok(())
            }
            EndMismatchPolicy::Reject => Err(Error::end_mismatch(
                expected,
                found,
                span.line,
                span.column,
            )),
        }
    }
}

fn unhandled(rule: Rule) -> Error {
    Error::internal(format!("no action for {rule:?}"))
}
