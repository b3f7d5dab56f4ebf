//! Disassembly of emitted scripts.

use std::fmt;

use crate::encoding;
use crate::opcode::{Operand, Opcode};
use crate::script::Script;
use crate::{CodeOffset, Inst};

/// A decoded operand.
#[derive(Clone, Debug, PartialEq)]
pub enum OperandValue {
    /// Integer operand.
    Int(i32),
    /// Float operand.
    Float(f64),
    /// Name operand.
    Name(String),
    /// Code offset operand.
    Offset(CodeOffset),
    /// Raw word operand.
    Word(Inst),
}

impl fmt::Display for OperandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Name(s) => write!(f, "{s:?}"),
            Self::Offset(o) | Self::Word(o) => write!(f, "{o}"),
        }
    }
}

/// One line of a disassembly listing.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// A recognized opcode and its decoded operands.
    Op {
        /// Offset of the opcode word.
        offset: CodeOffset,
        /// The opcode.
        opcode: Opcode,
        /// Decoded operands, in layout order.
        operands: Vec<OperandValue>,
    },
    /// A word that does not start a well-formed instruction.
    Data {
        /// Offset of the word.
        offset: CodeOffset,
        /// The raw word.
        word: Inst,
    },
}

impl Instruction {
    /// Returns the offset of the first word of this line.
    #[must_use]
    pub const fn offset(&self) -> CodeOffset {
        match self {
            Self::Op { offset, .. } | Self::Data { offset, .. } => *offset,
        }
    }

    /// Returns the opcode, unless this is a data line.
    #[must_use]
    pub const fn opcode(&self) -> Option<Opcode> {
        match self {
            Self::Op { opcode, .. } => Some(*opcode),
            Self::Data { .. } => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op {
                offset,
                opcode,
                operands,
            } => {
                write!(f, "{offset:04}  {opcode}")?;
                for (label, value) in opcode.operand_labels().iter().zip(operands) {
                    if label.is_empty() {
                        write!(f, " {value}")?;
                    } else {
                        write!(f, " {label}={value}")?;
                    }
                }
                Ok(())
            }
            Self::Data { offset, word } => write!(f, "{offset:04}  .word {word:#010x}"),
        }
    }
}

/// Decodes the operands of `opcode` starting at `words[0]`.
///
/// Returns the operands and the number of words consumed.
fn decode_operands(opcode: Opcode, words: &[Inst]) -> Option<(Vec<OperandValue>, usize)> {
    let mut operands = Vec::with_capacity(opcode.operands().len());
    let mut at = 0;
    for kind in opcode.operands() {
        let rest = words.get(at..)?;
        let (value, used) = match kind {
            Operand::Int => (OperandValue::Int(encoding::decode_int(*rest.first()?)), 1),
            Operand::Float => {
                let (high, low) = (*rest.first()?, *rest.get(1)?);
                (OperandValue::Float(encoding::decode_float(high, low)), 2)
            }
            Operand::Name => {
                let (name, used) = encoding::decode_name(rest)?;
                (OperandValue::Name(name), used)
            }
            Operand::Offset => (OperandValue::Offset(*rest.first()?), 1),
            Operand::Word => (OperandValue::Word(*rest.first()?), 1),
        };
        operands.push(value);
        at += used;
    }
    Some((operands, at))
}

/// Walks a script using the operand layouts of its opcodes.
///
/// Words that are not a known opcode, or whose payload runs past the end,
/// come back as [`Instruction::Data`] lines; the walk resumes at the next
/// word.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn disassemble(script: &Script) -> Vec<Instruction> {
    let words = script.words();
    let mut listing = Vec::new();
    let mut pc = 0usize;
    while pc < words.len() {
        let offset = pc as CodeOffset;
        let word = words[pc];
        let decoded = Opcode::from_word(word)
            .and_then(|op| decode_operands(op, &words[pc + 1..]).map(|d| (op, d)));
        match decoded {
            Some((opcode, (operands, used))) => {
                listing.push(Instruction::Op {
                    offset,
                    opcode,
                    operands,
                });
                pc += 1 + used;
            }
            None => {
                listing.push(Instruction::Data { offset, word });
                pc += 1;
            }
        }
    }
    listing
}
