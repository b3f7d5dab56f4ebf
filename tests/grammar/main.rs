//! Integration tests for the grammar and its parse tables
//!
//! Structural checks on the generated tables, plus a bare recognizer that
//! walks terminal strings through them.

mod sentences;
mod tables;
