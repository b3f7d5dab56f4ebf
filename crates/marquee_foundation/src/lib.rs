//! Core error types, terminals, and the token pull protocol for Marquee.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`Terminal`] - The terminal symbols of the scripting grammar
//! - [`Token`] - A terminal plus its semantic value and source position
//! - [`TokenSource`] - The pull interface an external lexer implements

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod source;
pub mod span;
pub mod terminal;
pub mod token;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use source::{TokenSource, TokenStream};
pub use span::Span;
pub use terminal::Terminal;
pub use token::{EntityRef, Token, TokenValue};
