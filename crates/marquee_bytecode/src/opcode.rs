//! The Marquee instruction set.
//!
//! The VM is stack-based. Opcodes occupy one word and are followed by the
//! inline operands listed in [`Opcode::operands`].

#![allow(clippy::doc_markdown)]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Inst;

/// The kind of an inline operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// One word, a two's-complement `i32`.
    Int,
    /// Two words holding IEEE-754 bits, high word first.
    Float,
    /// A NUL-terminated name packed four bytes per word, big-endian.
    Name,
    /// An absolute word index into the same script.
    Offset,
    /// A raw word: entity and field ids, argument counts, flags.
    Word,
}

/// A bytecode opcode.
///
/// Discriminants are fixed and dense; `Stop` is zero so that a reserved,
/// unpatched slot reads as `Stop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u32)]
pub enum Opcode {
    // === Control ===
    /// End of a code block; also the placeholder value of reserved slots.
    Stop = 0,

    // === Stack ===
    /// Pop and discard the top of stack.
    XPop = 1,
    /// Push an integer constant: `[] -> [n]`
    ConstPush = 2,
    /// Push a float constant: `[] -> [f]`
    FConstPush = 3,
    /// Push a string constant: `[] -> [s]`
    StringPush = 4,
    /// Push a symbol constant: `[] -> [#s]`
    SymbolPush = 5,
    /// Push the void value: `[] -> [void]`
    VoidPush = 6,

    // === Variables ===
    /// Push a variable reference for a following `Assign`.
    VarPush = 7,
    /// Push the value of a variable.
    Eval = 8,
    /// Store a value into a variable reference: `[value, ref] -> []`
    Assign = 9,
    /// Declare a global variable.
    Global = 10,
    /// Declare an instance variable of the current factory.
    Instance = 11,

    // === Entities ===
    /// Push a built-in property: `[id] -> [value]`
    TheEntityPush = 12,
    /// Assign a built-in property: `[value, id] -> []`
    TheEntityAssign = 13,
    /// Swap the two topmost values.
    Swap = 14,

    // === Arithmetic ===
    /// Add: `[a, b] -> [a + b]`
    Add = 15,
    /// Subtract: `[a, b] -> [a - b]`
    Sub = 16,
    /// Multiply: `[a, b] -> [a * b]`
    Mul = 17,
    /// Divide: `[a, b] -> [a / b]`
    Div = 18,
    /// Modulo: `[a, b] -> [a mod b]`
    Mod = 19,
    /// Negate: `[a] -> [-a]`
    Negate = 20,

    // === Comparison ===
    /// Greater than: `[a, b] -> [a > b]`
    Gt = 21,
    /// Less than: `[a, b] -> [a < b]`
    Lt = 22,
    /// Equal: `[a, b] -> [a = b]`
    Eq = 23,
    /// Not equal: `[a, b] -> [a <> b]`
    Neq = 24,
    /// Greater than or equal: `[a, b] -> [a >= b]`
    Ge = 25,
    /// Less than or equal: `[a, b] -> [a <= b]`
    Le = 26,

    // === Logic ===
    /// Logical and: `[a, b] -> [a and b]`
    And = 27,
    /// Logical or: `[a, b] -> [a or b]`
    Or = 28,
    /// Logical not: `[a] -> [not a]`
    Not = 29,

    // === Text ===
    /// Concatenate: `[a, b] -> [a & b]`
    Ampersand = 30,
    /// Concatenate with a space: `[a, b] -> [a && b]`
    Concat = 31,
    /// Substring test: `[a, b] -> [a contains b]`
    Contains = 32,
    /// Prefix test: `[a, b] -> [a starts b]`
    Starts = 33,
    /// Insert after: `[a, b] -> [b & a]`
    After = 34,
    /// Insert before: `[a, b] -> [a & b]`
    Before = 35,

    // === Sprites ===
    /// Sprite overlap test: `[a, b] -> [bool]`
    Intersects = 36,
    /// Sprite containment test: `[a, b] -> [bool]`
    Within = 37,

    // === Chunks ===
    /// `char i of s`
    CharOf = 38,
    /// `char i to j of s`
    CharToOf = 39,
    /// `item i of s`
    ItemOf = 40,
    /// `item i to j of s`
    ItemToOf = 41,
    /// `line i of s`
    LineOf = 42,
    /// `line i to j of s`
    LineToOf = 43,
    /// `word i of s`
    WordOf = 44,
    /// `word i to j of s`
    WordToOf = 45,

    // === Statements ===
    /// Print and pop the top of stack.
    PrintTop = 46,
    /// Leave the innermost loop.
    ExitRepeat = 47,
    /// Return the top of stack from the current handler.
    ProcRet = 48,
    /// Call a script handler with `argc` stacked arguments.
    Call = 49,
    /// Call a built-in with `argc` stacked arguments.
    CallBuiltin = 50,

    // === Structured ===
    /// Conditional; the test code follows inline.
    IfCode = 51,
    /// Condition loop; the test code follows inline.
    RepeatWhileCode = 52,
    /// Counted loop; the initial value code follows inline.
    RepeatWithCode = 53,
    /// Event clause; the action code follows inline.
    WhenCode = 54,

    // === Navigation ===
    /// `go loop`
    GotoLoop = 55,
    /// `go next`
    GotoNext = 56,
    /// `go previous`
    GotoPrevious = 57,
    /// `go` to a frame and/or movie selected by a mode constant.
    Goto = 58,
    /// `play` a frame and/or movie selected by a mode constant.
    Play = 59,
    /// `play done`
    PlayDone = 60,
    /// Open a document with an application: `[doc, app] -> []`
    Open = 61,

    // === Definitions ===
    /// Declare a factory.
    Factory = 62,
}

impl Opcode {
    /// Number of opcodes.
    pub const COUNT: usize = 63;

    /// Every opcode, in discriminant order.
    pub const ALL: [Opcode; Self::COUNT] = [
        Self::Stop,
        Self::XPop,
        Self::ConstPush,
        Self::FConstPush,
        Self::StringPush,
        Self::SymbolPush,
        Self::VoidPush,
        Self::VarPush,
        Self::Eval,
        Self::Assign,
        Self::Global,
        Self::Instance,
        Self::TheEntityPush,
        Self::TheEntityAssign,
        Self::Swap,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Negate,
        Self::Gt,
        Self::Lt,
        Self::Eq,
        Self::Neq,
        Self::Ge,
        Self::Le,
        Self::And,
        Self::Or,
        Self::Not,
        Self::Ampersand,
        Self::Concat,
        Self::Contains,
        Self::Starts,
        Self::After,
        Self::Before,
        Self::Intersects,
        Self::Within,
        Self::CharOf,
        Self::CharToOf,
        Self::ItemOf,
        Self::ItemToOf,
        Self::LineOf,
        Self::LineToOf,
        Self::WordOf,
        Self::WordToOf,
        Self::PrintTop,
        Self::ExitRepeat,
        Self::ProcRet,
        Self::Call,
        Self::CallBuiltin,
        Self::IfCode,
        Self::RepeatWhileCode,
        Self::RepeatWithCode,
        Self::WhenCode,
        Self::GotoLoop,
        Self::GotoNext,
        Self::GotoPrevious,
        Self::Goto,
        Self::Play,
        Self::PlayDone,
        Self::Open,
        Self::Factory,
    ];

    /// Decodes an opcode word.
    #[must_use]
    pub fn from_word(word: Inst) -> Option<Self> {
        usize::try_from(word)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Returns the word encoding of this opcode.
    #[must_use]
    pub const fn word(self) -> Inst {
        self as Inst
    }

    /// Returns the mnemonic of this opcode.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stop => "Stop",
            Self::XPop => "XPop",
            Self::ConstPush => "ConstPush",
            Self::FConstPush => "FConstPush",
            Self::StringPush => "StringPush",
            Self::SymbolPush => "SymbolPush",
            Self::VoidPush => "VoidPush",
            Self::VarPush => "VarPush",
            Self::Eval => "Eval",
            Self::Assign => "Assign",
            Self::Global => "Global",
            Self::Instance => "Instance",
            Self::TheEntityPush => "TheEntityPush",
            Self::TheEntityAssign => "TheEntityAssign",
            Self::Swap => "Swap",
            Self::Add => "Add",
            Self::Sub => "Sub",
            Self::Mul => "Mul",
            Self::Div => "Div",
            Self::Mod => "Mod",
            Self::Negate => "Negate",
            Self::Gt => "Gt",
            Self::Lt => "Lt",
            Self::Eq => "Eq",
            Self::Neq => "Neq",
            Self::Ge => "Ge",
            Self::Le => "Le",
            Self::And => "And",
            Self::Or => "Or",
            Self::Not => "Not",
            Self::Ampersand => "Ampersand",
            Self::Concat => "Concat",
            Self::Contains => "Contains",
            Self::Starts => "Starts",
            Self::After => "After",
            Self::Before => "Before",
            Self::Intersects => "Intersects",
            Self::Within => "Within",
            Self::CharOf => "CharOf",
            Self::CharToOf => "CharToOf",
            Self::ItemOf => "ItemOf",
            Self::ItemToOf => "ItemToOf",
            Self::LineOf => "LineOf",
            Self::LineToOf => "LineToOf",
            Self::WordOf => "WordOf",
            Self::WordToOf => "WordToOf",
            Self::PrintTop => "PrintTop",
            Self::ExitRepeat => "ExitRepeat",
            Self::ProcRet => "ProcRet",
            Self::Call => "Call",
            Self::CallBuiltin => "CallBuiltin",
            Self::IfCode => "IfCode",
            Self::RepeatWhileCode => "RepeatWhileCode",
            Self::RepeatWithCode => "RepeatWithCode",
            Self::WhenCode => "WhenCode",
            Self::GotoLoop => "GotoLoop",
            Self::GotoNext => "GotoNext",
            Self::GotoPrevious => "GotoPrevious",
            Self::Goto => "Goto",
            Self::Play => "Play",
            Self::PlayDone => "PlayDone",
            Self::Open => "Open",
            Self::Factory => "Factory",
        }
    }

    /// Returns the inline operand layout that follows this opcode.
    #[must_use]
    pub const fn operands(self) -> &'static [Operand] {
        match self {
            Self::ConstPush => &[Operand::Int],
            Self::FConstPush => &[Operand::Float],
            Self::StringPush
            | Self::SymbolPush
            | Self::VarPush
            | Self::Eval
            | Self::Global
            | Self::Instance
            | Self::Factory => &[Operand::Name],
            Self::TheEntityPush | Self::TheEntityAssign => &[Operand::Word, Operand::Word],
            Self::Call | Self::CallBuiltin => &[Operand::Name, Operand::Word],
            Self::IfCode => &[Operand::Offset, Operand::Offset, Operand::Offset, Operand::Word],
            Self::RepeatWhileCode => &[Operand::Offset, Operand::Offset],
            Self::RepeatWithCode => &[
                Operand::Offset,
                Operand::Offset,
                Operand::Offset,
                Operand::Int,
                Operand::Offset,
                Operand::Name,
            ],
            Self::WhenCode => &[Operand::Offset, Operand::Name],
            _ => &[],
        }
    }

    /// Returns display labels for [`Opcode::operands`]; empty labels print bare.
    #[must_use]
    pub const fn operand_labels(self) -> &'static [&'static str] {
        match self {
            Self::ConstPush => &[""],
            Self::FConstPush => &[""],
            Self::StringPush
            | Self::SymbolPush
            | Self::VarPush
            | Self::Eval
            | Self::Global
            | Self::Instance
            | Self::Factory => &[""],
            Self::TheEntityPush | Self::TheEntityAssign => &["entity", "field"],
            Self::Call | Self::CallBuiltin => &["", "argc"],
            Self::IfCode => &["then", "else", "end", "skip"],
            Self::RepeatWhileCode => &["body", "end"],
            Self::RepeatWithCode => &["init", "limit", "body", "step", "end", "var"],
            Self::WhenCode => &["end", ""],
            _ => &[],
        }
    }

    /// Returns true if this opcode opens a construct with back-patched slots.
    #[must_use]
    pub const fn is_structured(self) -> bool {
        matches!(
            self,
            Self::IfCode | Self::RepeatWhileCode | Self::RepeatWithCode | Self::WhenCode
        )
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
