//! Integration tests for the compiler
//!
//! Tests drive whole token streams through a session and check the emitted
//! words, the handler registry and the diagnostics.

mod control_flow;
mod definitions;
mod recovery;
mod support;
