//! The code emitter.
//!
//! A [`Script`] is the append-only word buffer of one compilation unit.
//! Every emission returns the offset of its first word; offsets stay valid
//! for the life of the script, so they can be handed out as back-patch
//! targets.

use marquee_foundation::{EntityRef, Error, ErrorKind, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::encoding;
use crate::opcode::Opcode;
use crate::{CodeOffset, Inst};

/// An append-only sequence of instruction words.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Script {
    code: Vec<Inst>,
}

impl Script {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self { code: Vec::new() }
    }

    /// Returns the offset the next emitted word will occupy.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn len(&self) -> CodeOffset {
        self.code.len() as CodeOffset
    }

    /// Returns true if nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Returns the emitted words.
    #[must_use]
    pub fn words(&self) -> &[Inst] {
        &self.code
    }

    /// Returns the word at `offset`.
    #[must_use]
    pub fn get(&self, offset: CodeOffset) -> Option<Inst> {
        self.code.get(offset as usize).copied()
    }

    /// Appends one raw word and returns its offset.
    pub fn emit_word(&mut self, word: Inst) -> CodeOffset {
        let at = self.len();
        self.code.push(word);
        at
    }

    /// Appends one opcode word and returns its offset.
    pub fn emit_op(&mut self, op: Opcode) -> CodeOffset {
        self.emit_word(op.word())
    }

    /// Appends operand words contiguously and returns the offset of the first.
    pub fn emit_operands(&mut self, words: &[Inst]) -> CodeOffset {
        let at = self.len();
        self.code.extend_from_slice(words);
        at
    }

    /// Appends `count` placeholder slots and returns the offset of the first.
    ///
    /// Placeholders hold `Stop` until patched.
    pub fn reserve(&mut self, count: usize) -> CodeOffset {
        let at = self.len();
        self.code
            .resize(self.code.len() + count, Opcode::Stop.word());
        at
    }

    /// Appends a packed name payload and returns its offset.
    pub fn emit_name(&mut self, name: &str) -> CodeOffset {
        let at = self.len();
        encoding::encode_name(name, &mut self.code);
        at
    }

    /// Appends an entity reference payload (entity word, then field word).
    pub fn emit_entity(&mut self, entity: EntityRef) -> CodeOffset {
        self.emit_operands(&[entity.entity, entity.field])
    }

    /// Emits `ConstPush n`.
    pub fn emit_const(&mut self, value: i32) -> CodeOffset {
        let at = self.emit_op(Opcode::ConstPush);
        self.emit_word(encoding::encode_int(value));
        at
    }

    /// Emits `FConstPush f`.
    pub fn emit_float(&mut self, value: f64) -> CodeOffset {
        let at = self.emit_op(Opcode::FConstPush);
        self.emit_operands(&encoding::encode_float(value));
        at
    }

    /// Emits `StringPush s`.
    pub fn emit_string(&mut self, text: &str) -> CodeOffset {
        let at = self.emit_op(Opcode::StringPush);
        self.emit_name(text);
        at
    }

    /// Emits `SymbolPush s`.
    pub fn emit_symbol(&mut self, symbol: &str) -> CodeOffset {
        let at = self.emit_op(Opcode::SymbolPush);
        self.emit_name(symbol);
        at
    }

    /// Emits an opcode followed by a name operand.
    pub fn emit_named(&mut self, op: Opcode, name: &str) -> CodeOffset {
        let at = self.emit_op(op);
        self.emit_name(name);
        at
    }

    /// Overwrites a previously emitted word.
    ///
    /// # Errors
    ///
    /// Returns an `Internal` error if `offset` was never emitted.
    pub fn patch(&mut self, offset: CodeOffset, word: Inst) -> Result<()> {
        let len = self.len();
        match self.code.get_mut(offset as usize) {
            Some(slot) => {
                *slot = word;
                Ok(())
            }
            None => Err(Error::internal(format!(
                "patch at {offset} past end of script ({len} words)"
            ))),
        }
    }

    /// Serializes every word big-endian.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        encoding::words_to_bytes(&self.code)
    }

    /// Rebuilds a script from [`Script::to_bytes`] output.
    ///
    /// # Errors
    ///
    /// Returns a `Serialization` error if the length is not a whole number
    /// of words.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        encoding::bytes_to_words(bytes)
            .map(|code| Self { code })
            .ok_or_else(|| {
                Error::new(ErrorKind::Serialization(format!(
                    "script of {} bytes is not word aligned",
                    bytes.len()
                )))
            })
    }
}

impl From<Vec<Inst>> for Script {
    fn from(code: Vec<Inst>) -> Self {
        Self { code }
    }
}
