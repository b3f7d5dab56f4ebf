//! Grammar and parse tables for the Marquee scripting language.
//!
//! This crate provides:
//! - [`PRODUCTIONS`] - The grammar, one [`Rule`] tag per production
//! - [`Grammar`] - Productions plus operator precedence
//! - [`ParseTables`] - LALR(1) action/goto tables built from a grammar
//!
//! Tables are regenerated from the production list rather than transcribed,
//! and [`ParseTables::script`] caches the scripting grammar's tables for the
//! life of the process.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod grammar;
mod lalr;
pub mod precedence;
pub mod script;
pub mod symbol;
pub mod tables;

pub use grammar::Grammar;
pub use precedence::{Assoc, Precedence};
pub use script::{PRODUCTIONS, Production, Rule};
pub use symbol::{NonTerminal, Symbol};
pub use tables::{Action, ParseTables, ProductionId, StateId, TableStats};
