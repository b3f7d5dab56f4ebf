//! Marquee - grammar-driven compiler core for a multimedia scripting language
//!
//! This crate re-exports all layers of the Marquee system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: marquee_runtime    — CLI, MessagePack token and output files
//! Layer 3: marquee_compiler   — Parser driver, semantic actions, handler registry
//! Layer 2: marquee_grammar    — Productions and LALR(1) tables
//! Layer 1: marquee_bytecode   — Opcodes, code buffer, back-patching, disassembly
//! Layer 0: marquee_foundation — Terminals, tokens, errors
//! ```

pub use marquee_bytecode as bytecode;
pub use marquee_compiler as compiler;
pub use marquee_foundation as foundation;
pub use marquee_grammar as grammar;
pub use marquee_runtime as runtime;
