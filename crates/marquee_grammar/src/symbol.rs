//! Grammar symbols.

use marquee_foundation::Terminal;

/// A nonterminal of the scripting grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum NonTerminal {
    /// The augmented start symbol.
    Accept,
    Program,
    Nl,
    ProgramLine,
    Asgn,
    StmtOneLiner,
    Stmt,
    IfStmt,
    ElseStmtOneLiner,
    ElseIfStmt,
    ElseIfStmtOneLiner,
    ElseIfStmtOneLiner1,
    ElseIfStmt1,
    Cond,
    RepeatWhile,
    RepeatWith,
    If,
    ElseIf,
    Begin,
    End,
    StmtList,
    When,
    Expr,
    Func,
    GlobalList,
    InstanceList,
    GotoFunc,
    GotoFrame,
    GotoMovie,
    PlayFunc,
    Defn,
    MacroStart,
    MethodStart,
    HandlerStart,
    ArgDef,
    ArgStore,
    Macro,
    ArgList,
}

impl NonTerminal {
    /// Number of nonterminals.
    pub const COUNT: usize = 38;

    /// Returns the dense goto-table column of this nonterminal.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the grammar spelling of this nonterminal.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Accept => "$accept",
            Self::Program => "program",
            Self::Nl => "nl",
            Self::ProgramLine => "programline",
            Self::Asgn => "asgn",
            Self::StmtOneLiner => "stmtoneliner",
            Self::Stmt => "stmt",
            Self::IfStmt => "ifstmt",
            Self::ElseStmtOneLiner => "elsestmtoneliner",
            Self::ElseIfStmt => "elseifstmt",
            Self::ElseIfStmtOneLiner => "elseifstmtoneliner",
            Self::ElseIfStmtOneLiner1 => "elseifstmtoneliner1",
            Self::ElseIfStmt1 => "elseifstmt1",
            Self::Cond => "cond",
            Self::RepeatWhile => "repeatwhile",
            Self::RepeatWith => "repeatwith",
            Self::If => "if",
            Self::ElseIf => "elseif",
            Self::Begin => "begin",
            Self::End => "end",
            Self::StmtList => "stmtlist",
            Self::When => "when",
            Self::Expr => "expr",
            Self::Func => "func",
            Self::GlobalList => "globallist",
            Self::InstanceList => "instancelist",
            Self::GotoFunc => "gotofunc",
            Self::GotoFrame => "gotoframe",
            Self::GotoMovie => "gotomovie",
            Self::PlayFunc => "playfunc",
            Self::Defn => "defn",
            Self::MacroStart => "macrostart",
            Self::MethodStart => "methodstart",
            Self::HandlerStart => "handlerstart",
            Self::ArgDef => "argdef",
            Self::ArgStore => "argstore",
            Self::Macro => "macro",
            Self::ArgList => "arglist",
        }
    }
}

impl std::fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A terminal or nonterminal on the right-hand side of a production.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// A terminal.
    T(Terminal),
    /// A nonterminal.
    N(NonTerminal),
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::T(t) => write!(f, "{t}"),
            Self::N(n) => write!(f, "{n}"),
        }
    }
}
