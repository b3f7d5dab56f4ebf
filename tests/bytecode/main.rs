//! Integration tests for the bytecode layer
//!
//! Tests for hand-assembled scripts, back-patching, and disassembly of
//! compiler output.

mod assembly;
mod listing;
