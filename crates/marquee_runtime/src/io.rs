//! Token and bytecode files using `MessagePack`.
//!
//! Token streams produced by an external lexer are read as a `MessagePack`
//! array of tokens; compiled units are written together with the handler
//! table a linker needs to resolve calls across units.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use marquee_compiler::{CompilationUnit, HandlerEntry, Registry};
use marquee_foundation::{Error, ErrorKind, Result, Token};
use serde::{Deserialize, Serialize};

/// A factory and its methods, as exported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryExport {
    /// Factory name.
    pub name: String,
    /// Methods in name order.
    pub methods: Vec<HandlerEntry>,
}

/// Everything a compilation run produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompiledOutput {
    /// Compiled units in compilation order.
    pub units: Vec<CompilationUnit>,
    /// Global handlers in name order.
    pub handlers: Vec<HandlerEntry>,
    /// Factories in name order.
    pub factories: Vec<FactoryExport>,
}

impl CompiledOutput {
    /// Bundles units with a snapshot of the registry.
    #[must_use]
    pub fn new(units: Vec<CompilationUnit>, registry: &Registry) -> Self {
        Self {
            units,
            handlers: registry.handlers().cloned().collect(),
            factories: registry
                .factories()
                .map(|factory| FactoryExport {
                    name: factory.name.clone(),
                    methods: factory.methods().cloned().collect(),
                })
                .collect(),
        }
    }
}

fn serialization(e: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::Serialization(e.to_string()))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::Io(format!(
        "failed to {action} '{}': {e}",
        path.display()
    )))
}

/// Serializes tokens to `MessagePack`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn tokens_to_bytes(tokens: &[Token]) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(tokens).map_err(serialization)
}

/// Deserializes tokens from `MessagePack`.
///
/// # Errors
///
/// Returns an error if the bytes are not a token array.
pub fn tokens_from_bytes(bytes: &[u8]) -> Result<Vec<Token>> {
    rmp_serde::from_slice(bytes).map_err(serialization)
}

/// Serializes compiled output to `MessagePack`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn output_to_bytes(output: &CompiledOutput) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(output).map_err(serialization)
}

/// Deserializes compiled output from `MessagePack`.
///
/// # Errors
///
/// Returns an error if the bytes are not compiled output.
pub fn output_from_bytes(bytes: &[u8]) -> Result<CompiledOutput> {
    rmp_serde::from_slice(bytes).map_err(serialization)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    Ok(bytes)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))
}

/// Reads a token stream file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_tokens<P: AsRef<Path>>(path: P) -> Result<Vec<Token>> {
    tokens_from_bytes(&read_file(path.as_ref())?)
}

/// Writes a token stream file, replacing any existing one.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_tokens<P: AsRef<Path>>(tokens: &[Token], path: P) -> Result<()> {
    write_file(path.as_ref(), &tokens_to_bytes(tokens)?)
}

/// Writes compiled output, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_units<P: AsRef<Path>>(output: &CompiledOutput, path: P) -> Result<()> {
    write_file(path.as_ref(), &output_to_bytes(output)?)
}
