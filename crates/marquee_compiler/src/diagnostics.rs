//! Diagnostics and the error-reporting sink.
//!
//! Every recoverable or fatal problem found while compiling a unit becomes a
//! [`Diagnostic`]. Diagnostics are kept on the unit and also handed to the
//! session's [`ErrorSink`]; what the caller does with them (print, collect,
//! exit) is up to the caller.

use std::fmt;

use marquee_foundation::Span;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// How serious a diagnostic is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Severity {
    /// Compilation is unaffected.
    Warning,
    /// Recoverable; the unit is flagged.
    Error,
    /// The unit was aborted.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        })
    }
}

/// A message tied to a source position.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl Diagnostic {
    /// Creates a diagnostic at a span's start.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, span: Span) -> Self {
        Self {
            severity,
            message: message.into(),
            line: span.line,
            column: span.column,
        }
    }

    /// Returns true for errors and fatal diagnostics.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {}: {}",
            self.line, self.column, self.severity, self.message
        )
    }
}

/// Receives every diagnostic as it is produced.
pub trait ErrorSink {
    /// Reports one diagnostic.
    fn report(&mut self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Warning => warn!(
                line = diagnostic.line,
                column = diagnostic.column,
                "{}",
                diagnostic.message
            ),
            Severity::Error | Severity::Fatal => error!(
                line = diagnostic.line,
                column = diagnostic.column,
                severity = %diagnostic.severity,
                "{}",
                diagnostic.message
            ),
        }
    }
}

/// Stores diagnostics for later inspection.
#[derive(Clone, Debug, Default)]
pub struct CollectSink {
    diagnostics: std::rc::Rc<std::cell::RefCell<Vec<Diagnostic>>>,
}

impl CollectSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    #[must_use]
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Returns how many diagnostics were reported.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Returns true if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl ErrorSink for CollectSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }
}
