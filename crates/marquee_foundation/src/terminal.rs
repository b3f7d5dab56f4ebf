//! Terminal symbols of the scripting grammar.
//!
//! A lexer classifies every lexeme as one of these terminals. The parser
//! tables index their action columns by [`Terminal::index`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A terminal symbol of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Terminal {
    /// End of input.
    Eof,
    /// Reserved error-recovery symbol; never produced by a lexer.
    Error,
    /// A lexeme the lexer could not classify.
    Undefined,
    /// Integer literal.
    Int,
    /// Built-in property reference such as `the mouseH`.
    TheEntity,
    /// Built-in property of an indexed object, such as `the locH of sprite`.
    TheEntityWithId,
    /// Floating-point literal.
    Float,
    /// Built-in function taking no arguments.
    BuiltinNoArgs,
    /// Built-in command taking an optional argument.
    BuiltinNoArgsOrOne,
    /// Built-in command taking exactly one argument.
    BuiltinOneArg,
    /// Built-in command taking an argument list.
    BuiltinArgList,
    /// First word of a two-word built-in command.
    TwoWordBuiltin,
    /// Identifier.
    Id,
    /// String literal.
    String,
    /// Symbol literal such as `#done`.
    Symbol,
    /// `end <word>`; the value carries the word.
    EndClause,
    /// `down`
    Down,
    /// `else if` at the start of a line.
    NlElsIf,
    /// `exit`
    Exit,
    /// `frame`
    Frame,
    /// `global`
    Global,
    /// `go`
    Go,
    /// `if`
    If,
    /// `into`
    Into,
    /// `loop`
    Loop,
    /// `macro`
    Macro,
    /// `movie`
    Movie,
    /// `next`
    Next,
    /// `of`
    Of,
    /// `previous`
    Previous,
    /// `put`
    Put,
    /// `repeat`
    Repeat,
    /// `set`
    Set,
    /// `then`
    Then,
    /// `to`
    To,
    /// `when`
    When,
    /// `with`
    With,
    /// `while`
    While,
    /// `else` at the start of a line.
    NlElse,
    /// `factory`
    Factory,
    /// `method`
    Method,
    /// `open`
    Open,
    /// `play`
    Play,
    /// `done`
    Done,
    /// `instance`
    Instance,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `<>`
    Neq,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `mod`
    Mod,
    /// `after`
    After,
    /// `before`
    Before,
    /// `&&`, concatenation with a separating space.
    Concat,
    /// `contains`
    Contains,
    /// `starts`
    Starts,
    /// `char`
    Char,
    /// `item`
    Item,
    /// `line`
    Line,
    /// `word`
    Word,
    /// `sprite`
    Sprite,
    /// `intersects`
    Intersects,
    /// `within`
    Within,
    /// `on`
    On,
    /// `=`
    Equals,
    /// `&`
    Ampersand,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// Line break.
    Newline,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `,`
    Comma,
}

impl Terminal {
    /// Number of terminals.
    pub const COUNT: usize = 77;

    /// Every terminal, in column order.
    pub const ALL: [Terminal; Self::COUNT] = [
        Self::Eof,
        Self::Error,
        Self::Undefined,
        Self::Int,
        Self::TheEntity,
        Self::TheEntityWithId,
        Self::Float,
        Self::BuiltinNoArgs,
        Self::BuiltinNoArgsOrOne,
        Self::BuiltinOneArg,
        Self::BuiltinArgList,
        Self::TwoWordBuiltin,
        Self::Id,
        Self::String,
        Self::Symbol,
        Self::EndClause,
        Self::Down,
        Self::NlElsIf,
        Self::Exit,
        Self::Frame,
        Self::Global,
        Self::Go,
        Self::If,
        Self::Into,
        Self::Loop,
        Self::Macro,
        Self::Movie,
        Self::Next,
        Self::Of,
        Self::Previous,
        Self::Put,
        Self::Repeat,
        Self::Set,
        Self::Then,
        Self::To,
        Self::When,
        Self::With,
        Self::While,
        Self::NlElse,
        Self::Factory,
        Self::Method,
        Self::Open,
        Self::Play,
        Self::Done,
        Self::Instance,
        Self::Ge,
        Self::Le,
        Self::Neq,
        Self::And,
        Self::Or,
        Self::Not,
        Self::Mod,
        Self::After,
        Self::Before,
        Self::Concat,
        Self::Contains,
        Self::Starts,
        Self::Char,
        Self::Item,
        Self::Line,
        Self::Word,
        Self::Sprite,
        Self::Intersects,
        Self::Within,
        Self::On,
        Self::Equals,
        Self::Ampersand,
        Self::Plus,
        Self::Minus,
        Self::Star,
        Self::Slash,
        Self::Newline,
        Self::LParen,
        Self::RParen,
        Self::Gt,
        Self::Lt,
        Self::Comma,
    ];

    /// Returns the dense table column of this terminal.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the terminal for a table column.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns true for the terminals a lexer must never produce.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns a human-readable name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::Error => "error",
            Self::Undefined => "undefined token",
            Self::Int => "integer",
            Self::TheEntity => "THEENTITY",
            Self::TheEntityWithId => "THEENTITYWITHID",
            Self::Float => "float",
            Self::BuiltinNoArgs => "BLTINNOARGS",
            Self::BuiltinNoArgsOrOne => "BLTINNOARGSORONE",
            Self::BuiltinOneArg => "BLTINONEARG",
            Self::BuiltinArgList => "BLTINARGLIST",
            Self::TwoWordBuiltin => "TWOWORDBUILTIN",
            Self::Id => "identifier",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::EndClause => "end clause",
            Self::Down => "'down'",
            Self::NlElsIf => "newline-else-if",
            Self::Exit => "'exit'",
            Self::Frame => "'frame'",
            Self::Global => "'global'",
            Self::Go => "'go'",
            Self::If => "'if'",
            Self::Into => "'into'",
            Self::Loop => "'loop'",
            Self::Macro => "'macro'",
            Self::Movie => "'movie'",
            Self::Next => "'next'",
            Self::Of => "'of'",
            Self::Previous => "'previous'",
            Self::Put => "'put'",
            Self::Repeat => "'repeat'",
            Self::Set => "'set'",
            Self::Then => "'then'",
            Self::To => "'to'",
            Self::When => "'when'",
            Self::With => "'with'",
            Self::While => "'while'",
            Self::NlElse => "newline-else",
            Self::Factory => "'factory'",
            Self::Method => "'method'",
            Self::Open => "'open'",
            Self::Play => "'play'",
            Self::Done => "'done'",
            Self::Instance => "'instance'",
            Self::Ge => "'>='",
            Self::Le => "'<='",
            Self::Neq => "'<>'",
            Self::And => "'and'",
            Self::Or => "'or'",
            Self::Not => "'not'",
            Self::Mod => "'mod'",
            Self::After => "'after'",
            Self::Before => "'before'",
            Self::Concat => "'&&'",
            Self::Contains => "'contains'",
            Self::Starts => "'starts'",
            Self::Char => "'char'",
            Self::Item => "'item'",
            Self::Line => "'line'",
            Self::Word => "'word'",
            Self::Sprite => "'sprite'",
            Self::Intersects => "'intersects'",
            Self::Within => "'within'",
            Self::On => "'on'",
            Self::Equals => "'='",
            Self::Ampersand => "'&'",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Newline => "newline",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Gt => "'>'",
            Self::Lt => "'<'",
            Self::Comma => "','",
        }
    }
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
