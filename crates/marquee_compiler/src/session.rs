//! The compilation session.
//!
//! A [`Session`] owns everything that outlives a single compilation unit:
//! options, the handler registry, the factory context and the error sink.
//! Each call to [`Session::compile`] produces one [`CompilationUnit`] with
//! its own script buffer.

use std::fmt;

use marquee_bytecode::{CodeOffset, Script};
use marquee_foundation::{ErrorContext, Result, Span, Token, TokenSource, TokenStream};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::actions::Compiler;
use crate::chunk::split_definitions;
use crate::config::CompileOptions;
use crate::diagnostics::{Diagnostic, ErrorSink, LogSink, Severity};
use crate::parser;
use crate::registry::Registry;
use crate::value::Fixup;

/// Identifies a compilation unit within its session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unit {}", self.0)
    }
}

/// Whether a unit compiled cleanly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnitStatus {
    /// No errors were recorded.
    Clean,
    /// The unit was accepted after recovering from errors.
    Flagged {
        /// Number of errors recorded.
        errors: usize,
    },
}

/// A `Call` instruction emitted into a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CallSite {
    /// Callee name after `me` substitution.
    pub name: String,
    /// Offset of the `Call` opcode.
    pub offset: CodeOffset,
    /// Arguments passed.
    pub arg_count: u32,
    /// 1-based line of the call.
    pub line: u32,
    /// 1-based column of the call.
    pub column: u32,
}

/// The result of compiling one unit to acceptance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompilationUnit {
    /// Unit number within the session.
    pub id: UnitId,
    /// Name from [`CompileOptions::unit_name`].
    pub name: Option<String>,
    /// Emitted bytecode.
    pub script: Script,
    /// Clean or flagged.
    pub status: UnitStatus,
    /// Every diagnostic recorded for the unit.
    pub diagnostics: Vec<Diagnostic>,
    /// Every `Call` emitted, in emission order.
    pub calls: Vec<CallSite>,
    /// Constructs whose slots were never patched.
    pub unresolved_fixups: Vec<Fixup>,
}

impl CompilationUnit {
    /// Returns true if no errors were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.status == UnitStatus::Clean
    }

    /// Returns the number of errors recorded.
    #[must_use]
    pub fn error_count(&self) -> usize {
        match self.status {
            UnitStatus::Clean => 0,
            UnitStatus::Flagged { errors } => errors,
        }
    }
}

/// Definition state shared between the semantic actions of a session.
#[derive(Clone, Debug, Default)]
pub(crate) struct Context {
    /// Factory whose methods are being defined.
    pub(crate) factory: Option<String>,
    /// Where the `macro`, `method` or `on` body being compiled starts.
    pub(crate) open_definition: Option<Span>,
    /// Argument names declared for the definition being compiled.
    pub(crate) pending_args: Vec<String>,
}

impl Context {
    fn start_unit(&mut self) {
        self.open_definition = None;
        self.pending_args.clear();
    }
}

/// A compilation session.
pub struct Session {
    options: CompileOptions,
    registry: Registry,
    context: Context,
    next_unit: u32,
    sink: Box<dyn ErrorSink>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CompileOptions::default())
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("options", &self.options)
            .field("registry", &self.registry)
            .field("context", &self.context)
            .field("next_unit", &self.next_unit)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session that reports diagnostics through `tracing`.
    #[must_use]
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            registry: Registry::new(),
            context: Context::default(),
            next_unit: 0,
            sink: Box::new(LogSink),
        }
    }

    /// Replaces the error sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Returns the options.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Returns the handler registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the factory whose methods are currently being defined.
    #[must_use]
    pub fn factory(&self) -> Option<&str> {
        self.context.factory.as_deref()
    }

    /// Forgets every definition and restarts unit numbering.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.context = Context::default();
        self.next_unit = 0;
    }

    /// Compiles one unit.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit was aborted: error recovery failed, the
    /// parser stack was exhausted, or a closing keyword was rejected under
    /// [`EndMismatchPolicy::Reject`](crate::EndMismatchPolicy::Reject).
    /// Definitions completed before the abort stay registered.
    pub fn compile(&mut self, source: impl TokenSource) -> Result<CompilationUnit> {
        let id = UnitId(self.next_unit);
        self.next_unit += 1;
        self.context.start_unit();

        let mut compiler = Compiler::new(
            id,
            &self.options,
            &mut self.registry,
            &mut self.context,
            self.sink.as_mut(),
        );
        if let Err(err) = parser::parse(&mut compiler, source) {
            let (line, column) = compiler.position();
            error!(%id, line, column, %err, "compilation aborted");
            compiler.report(Diagnostic {
                severity: Severity::Fatal,
                message: err.to_string(),
                line,
                column,
            });
            let mut context = ErrorContext::new().with_position(line, column);
            if let Some(name) = &self.options.unit_name {
                context = context.with_unit(name.clone());
            }
            return Err(err.with_context(context));
        }

        let unit = compiler.finish(self.options.unit_name.clone());
        debug!(
            %id,
            words = unit.script.len(),
            errors = unit.error_count(),
            "unit compiled"
        );
        Ok(unit)
    }

    /// Compiles a token vector holding any number of definitions, one unit
    /// per definition chunk.
    pub fn compile_script(&mut self, tokens: Vec<Token>) -> Vec<Result<CompilationUnit>> {
        split_definitions(tokens)
            .into_iter()
            .map(|chunk| self.compile(TokenStream::from(chunk)))
            .collect()
    }

    /// Returns every call site in `units` whose callee is neither a global
    /// handler nor a factory.
    #[must_use]
    pub fn unresolved_calls<'u>(&self, units: &'u [CompilationUnit]) -> Vec<&'u CallSite> {
        units
            .iter()
            .flat_map(|unit| &unit.calls)
            .filter(|call| !self.registry.resolves(&call.name))
            .collect()
    }
}
