//! Table-driven compiler for Marquee scripts.
//!
//! This crate provides:
//! - [`Session`] - Compilation context owning the handler registry
//! - [`CompilationUnit`] - One compiled script with its diagnostics
//! - [`Registry`] - Global handlers and factory method tables
//! - [`CompileOptions`] - Configuration
//! - [`ErrorSink`] - Where diagnostics go as they are produced
//!
//! # Example
//!
//! ```
//! use marquee_compiler::{Session, CompileOptions};
//! use marquee_foundation::{Span, Token, TokenStream};
//!
//! let mut session = Session::new(CompileOptions::default());
//! let tokens = vec![Token::int(42, Span::new(0, 2, 1, 1))];
//! let unit = session.compile(TokenStream::from(tokens)).unwrap();
//! assert!(unit.is_clean());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod actions;
pub mod chunk;
pub mod config;
pub mod diagnostics;
mod parser;
pub mod registry;
pub mod session;
pub mod value;


pub use chunk::split_definitions;
pub use config::{CompileOptions, EndMismatchPolicy};
pub use diagnostics::{CollectSink, Diagnostic, ErrorSink, LogSink, Severity};
pub use registry::{FactoryEntry, HandlerEntry, Registry, Scope};
pub use session::{CallSite, CompilationUnit, Session, UnitId, UnitStatus};
pub use value::{Fixup, FixupKind, SemanticValue};
