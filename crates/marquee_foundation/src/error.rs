//! Error types for the Marquee compiler.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// Result type alias using the Marquee [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Marquee operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an end-keyword mismatch error.
    #[must_use]
    pub fn end_mismatch(
        expected: impl Into<String>,
        found: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::new(ErrorKind::EndMismatch {
            expected: expected.into(),
            found: found.into(),
            line,
            column,
        })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true if this error ends the compilation unit.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::ParseAborted { .. }
                | ErrorKind::StackExhausted { .. }
                | ErrorKind::Internal(_)
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A closing `end` keyword named a different construct.
    #[error("end mismatch at {line}:{column}: expected {expected} but got {found}")]
    EndMismatch {
        /// The keyword the open construct requires.
        expected: String,
        /// The keyword that was found.
        found: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
    },

    /// Error recovery could not resynchronize the parser.
    #[error("parse aborted after {errors} error(s)")]
    ParseAborted {
        /// Number of errors recorded before the abort.
        errors: usize,
    },

    /// The parser stacks could not grow any further.
    #[error("parser stack exhausted at depth {depth}")]
    StackExhausted {
        /// Stack depth at the time of the failure.
        depth: usize,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An I/O operation failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the compilation unit.
    pub unit: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Column number in source.
    pub column: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compilation unit name.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: u32, column: u32) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(unit) = &self.unit {
            write!(f, "in {unit}")?;
        }
        if let (Some(line), Some(col)) = (self.line, self.column) {
            if self.unit.is_some() {
                write!(f, " ")?;
            }
            write!(f, "at {line}:{col}")?;
        }
        Ok(())
    }
}
