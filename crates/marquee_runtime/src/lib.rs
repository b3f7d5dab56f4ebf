//! Command-line driver and serialization for Marquee.
//!
//! This crate provides:
//! - [`io`] - `MessagePack` token streams in, compiled units out
//! - [`CompiledOutput`] - Units plus the exported handler table
//! - The `marquee` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod io;

pub use io::{
    CompiledOutput, FactoryExport, output_from_bytes, output_to_bytes, read_tokens,
    tokens_from_bytes, tokens_to_bytes, write_tokens, write_units,
};
