//! Word-addressed bytecode for Marquee scripts.
//!
//! This crate provides:
//! - [`Opcode`] - The instruction set and its operand layouts
//! - [`Script`] - The append-only code emitter ("current script")
//! - [`disassemble`] - A listing of an emitted script
//!
//! A script is a flat sequence of [`Inst`] words. Each word is either an
//! opcode or an operand; multi-word payloads (names, floats) are packed
//! big-endian so the byte layout matches what the execution engine expects.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod disasm;
pub mod encoding;
pub mod opcode;
pub mod script;

pub use disasm::{Instruction, OperandValue, disassemble};
pub use opcode::{Operand, Opcode};
pub use script::Script;

/// One instruction word: an opcode or an operand.
pub type Inst = u32;

/// A word index into a [`Script`].
pub type CodeOffset = u32;
