//! Packing of multi-word operands.
//!
//! Names are stored as UTF-8 bytes followed by a NUL terminator, four bytes
//! per word in big-endian order, with the final word zero padded. Floats are
//! stored as their IEEE-754 bits, high word first. Integers are a single
//! two's-complement word.

use crate::Inst;

const WORD_BYTES: usize = std::mem::size_of::<Inst>();

/// Returns the number of words a name of `len` bytes occupies.
///
/// The terminator always fits, so an empty name takes one word.
#[must_use]
pub const fn name_words(len: usize) -> usize {
    len / WORD_BYTES + 1
}

/// Appends the packed form of `name` to `out`.
///
/// A name containing an interior NUL reads back truncated at that byte.
pub fn encode_name(name: &str, out: &mut Vec<Inst>) {
    let bytes = name.as_bytes();
    out.reserve(name_words(bytes.len()));
    for chunk in bytes.chunks(WORD_BYTES) {
        let mut word = [0u8; WORD_BYTES];
        word[..chunk.len()].copy_from_slice(chunk);
        out.push(Inst::from_be_bytes(word));
    }
    if bytes.len() % WORD_BYTES == 0 {
        out.push(0);
    }
}

/// Decodes a packed name from the start of `words`.
///
/// Returns the name and the number of words consumed, or `None` when the
/// terminator is missing.
#[must_use]
pub fn decode_name(words: &[Inst]) -> Option<(String, usize)> {
    let mut bytes = Vec::new();
    for (i, word) in words.iter().enumerate() {
        for byte in word.to_be_bytes() {
            if byte == 0 {
                return Some((String::from_utf8_lossy(&bytes).into_owned(), i + 1));
            }
            bytes.push(byte);
        }
    }
    None
}

/// Splits a float into its two words.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn encode_float(value: f64) -> [Inst; 2] {
    let bits = value.to_bits();
    [(bits >> 32) as Inst, bits as Inst]
}

/// Joins two words back into a float.
#[must_use]
pub fn decode_float(high: Inst, low: Inst) -> f64 {
    f64::from_bits((u64::from(high) << 32) | u64::from(low))
}

/// Encodes an integer operand.
#[must_use]
pub const fn encode_int(value: i32) -> Inst {
    Inst::from_ne_bytes(value.to_ne_bytes())
}

/// Decodes an integer operand.
#[must_use]
pub const fn decode_int(word: Inst) -> i32 {
    i32::from_ne_bytes(word.to_ne_bytes())
}

/// Serializes words as big-endian bytes.
#[must_use]
pub fn words_to_bytes(words: &[Inst]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

/// Reassembles big-endian bytes into words.
///
/// Returns `None` when the length is not a whole number of words.
#[must_use]
pub fn bytes_to_words(bytes: &[u8]) -> Option<Vec<Inst>> {
    if bytes.len() % WORD_BYTES != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(WORD_BYTES)
            .map(|c| Inst::from_be_bytes([c[0], c[1], c[2], c[3]]))
            .collect(),
    )
}
