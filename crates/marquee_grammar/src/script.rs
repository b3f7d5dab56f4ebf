//! The scripting-language grammar.
//!
//! One [`Rule`] tag per production; [`PRODUCTIONS`] lists them in priority
//! order, which is also the order reduce/reduce conflicts are settled in.
//! In particular `begin` precedes `expr : ID`, so a bare identifier at the
//! start of a line is a macro call.

use marquee_foundation::Terminal;

use crate::precedence::{ASSIGNMENT, Precedence, UNARY};
use crate::symbol::Symbol::{self, N, T};
use crate::symbol::{NonTerminal, NonTerminal as Nt};

/// A production of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Production {
    /// The tag the semantic actions dispatch on.
    pub rule: Rule,
    /// The left-hand side.
    pub lhs: NonTerminal,
    /// The right-hand side.
    pub rhs: &'static [Symbol],
    /// Explicit precedence; otherwise the last terminal's is used.
    pub prec: Option<Precedence>,
}

impl Production {
    const fn new(rule: Rule, lhs: NonTerminal, rhs: &'static [Symbol]) -> Self {
        Self {
            rule,
            lhs,
            rhs,
            prec: None,
        }
    }

    const fn with_prec(mut self, prec: Precedence) -> Self {
        self.prec = Some(prec);
        self
    }

    /// Returns the number of right-hand-side symbols.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rhs.len()
    }

    /// Returns true for an empty production.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }
}

impl std::fmt::Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} :", self.lhs)?;
        if self.rhs.is_empty() {
            return write!(f, " /* empty */");
        }
        for symbol in self.rhs {
            write!(f, " {symbol}")?;
        }
        Ok(())
    }
}

/// Production tags, one per production of [`PRODUCTIONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// `$accept : program`
    Accept,
    /// `program : program nl programline`
    ProgramLines,
    /// `program : programline`
    ProgramFirstLine,
    /// `nl : Newline`
    Newline,
    /// `programline : /* empty */`
    LineEmpty,
    /// `programline : defn`
    LineDefn,
    /// `programline : func`
    LineFunc,
    /// `programline : macro`
    LineMacro,
    /// `programline : asgn`
    LineAsgn,
    /// `programline : stmt`
    LineStmt,
    /// `programline : error`, the recovery production.
    LineError,
    /// `asgn : Put expr Into Id`
    PutInto,
    /// `asgn : Put expr After expr`
    PutAfter,
    /// `asgn : Put expr Before expr`
    PutBefore,
    /// `asgn : Set Id Equals expr`
    SetIdEq,
    /// `asgn : Set TheEntity Equals expr`
    SetTheEq,
    /// `asgn : Set TheEntityWithId expr Equals expr`
    SetTheOfEq,
    /// `asgn : Set Id To expr`
    SetIdTo,
    /// `asgn : Set TheEntity To expr`
    SetTheTo,
    /// `asgn : Set TheEntityWithId expr To expr`
    SetTheOfTo,
    /// `stmtoneliner : expr`
    OneLinerExpr,
    /// `stmtoneliner : func`
    OneLinerFunc,
    /// `stmt : stmtoneliner`
    StmtOneLiner,
    /// `stmt : ifstmt`
    StmtIf,
    /// `stmt : repeatwhile cond stmtlist end EndClause`
    RepeatWhileLoop,
    /// `stmt : repeatwith Equals expr end To expr end stmtlist end EndClause`
    RepeatWithUp,
    /// `stmt : repeatwith Equals expr end Down To expr end stmtlist end EndClause`
    RepeatWithDown,
    /// `stmt : when expr end`
    WhenClause,
    /// `ifstmt : if cond Then nl stmtlist end EndClause`
    IfBlock,
    /// `ifstmt : if cond Then nl stmtlist end NlElse stmtlist end EndClause`
    IfBlockElse,
    /// `ifstmt : if cond Then nl stmtlist end begin elseifstmt end EndClause`
    IfBlockElseIf,
    /// `ifstmt : if cond Then begin stmtoneliner end`
    IfOneLiner,
    /// `ifstmt : if cond Then begin stmtoneliner end NlElse begin stmtoneliner end`
    IfOneLinerElse,
    /// `ifstmt : if cond Then begin stmtoneliner end elseifstmtoneliner end elsestmtoneliner end`
    IfOneLinerElseIf,
    /// `elsestmtoneliner : /* empty */`
    ElseOneLinerEmpty,
    /// `elsestmtoneliner : NlElse begin stmtoneliner`
    ElseOneLiner,
    /// `elseifstmt : elseifstmt elseifstmt1`
    ElseIfChain,
    /// `elseifstmt : elseifstmt1`
    ElseIfFirst,
    /// `elseifstmtoneliner : elseifstmtoneliner elseifstmtoneliner1`
    ElseIfOneLinerChain,
    /// `elseifstmtoneliner : elseifstmtoneliner1`
    ElseIfOneLinerFirst,
    /// `elseifstmtoneliner1 : elseif cond Then begin stmt end`
    ElseIfOneLinerClause,
    /// `elseifstmt1 : elseifstmtoneliner`
    ElseIfFromOneLiner,
    /// `elseifstmt1 : elseif cond Then stmtlist end`
    ElseIfBlockClause,
    /// `cond : expr`
    CondExpr,
    /// `cond : LParen cond RParen`
    CondParen,
    /// `repeatwhile : Repeat While`
    RepeatWhileOpen,
    /// `repeatwith : Repeat With Id`
    RepeatWithOpen,
    /// `if : If`
    IfOpen,
    /// `elseif : NlElsIf`
    ElseIfOpen,
    /// `begin : /* empty */`
    Begin,
    /// `end : /* empty */`
    End,
    /// `stmtlist : /* empty */`
    StmtListEmpty,
    /// `stmtlist : stmtlist nl`
    StmtListNewline,
    /// `stmtlist : stmtlist stmt`
    StmtListStmt,
    /// `when : When Id Then`
    WhenOpen,
    /// `expr : Int`
    ExprInt,
    /// `expr : Float`
    ExprFloat,
    /// `expr : Symbol`
    ExprSymbol,
    /// `expr : String`
    ExprString,
    /// `expr : BuiltinNoArgs`
    ExprBuiltinNoArgs,
    /// `expr : Id LParen arglist RParen`
    ExprCall,
    /// `expr : Id`
    ExprVar,
    /// `expr : TheEntity`
    ExprTheEntity,
    /// `expr : TheEntityWithId expr`
    ExprTheEntityWithId,
    /// `expr : asgn`
    ExprAsgn,
    /// `expr : expr Plus expr`
    ExprAdd,
    /// `expr : expr Minus expr`
    ExprSub,
    /// `expr : expr Star expr`
    ExprMul,
    /// `expr : expr Slash expr`
    ExprDiv,
    /// `expr : expr Mod expr`
    ExprMod,
    /// `expr : expr Gt expr`
    ExprGt,
    /// `expr : expr Lt expr`
    ExprLt,
    /// `expr : expr Equals expr`
    ExprEq,
    /// `expr : expr Neq expr`
    ExprNeq,
    /// `expr : expr Ge expr`
    ExprGe,
    /// `expr : expr Le expr`
    ExprLe,
    /// `expr : expr And expr`
    ExprAnd,
    /// `expr : expr Or expr`
    ExprOr,
    /// `expr : Not expr`
    ExprNot,
    /// `expr : expr Ampersand expr`
    ExprAmpersand,
    /// `expr : expr After expr`
    ExprAfter,
    /// `expr : expr Concat expr`
    ExprConcat,
    /// `expr : expr Contains expr`
    ExprContains,
    /// `expr : expr Starts expr`
    ExprStarts,
    /// `expr : Plus expr`
    ExprPlus,
    /// `expr : Minus expr`
    ExprNegate,
    /// `expr : LParen expr RParen`
    ExprParen,
    /// `expr : Sprite expr Intersects expr`
    ExprIntersects,
    /// `expr : Sprite expr Within expr`
    ExprWithin,
    /// `expr : Char expr Of expr`
    ExprCharOf,
    /// `expr : Char expr To expr Of expr`
    ExprCharToOf,
    /// `expr : Item expr Of expr`
    ExprItemOf,
    /// `expr : Item expr To expr Of expr`
    ExprItemToOf,
    /// `expr : Line expr Of expr`
    ExprLineOf,
    /// `expr : Line expr To expr Of expr`
    ExprLineToOf,
    /// `expr : Word expr Of expr`
    ExprWordOf,
    /// `expr : Word expr To expr Of expr`
    ExprWordToOf,
    /// `func : Put expr`
    FuncPut,
    /// `func : gotofunc`
    FuncGoto,
    /// `func : playfunc`
    FuncPlay,
    /// `func : Exit Repeat`
    ExitRepeat,
    /// `func : Exit`
    Exit,
    /// `func : Global globallist`
    GlobalDecl,
    /// `func : Instance instancelist`
    InstanceDecl,
    /// `func : BuiltinOneArg expr`
    BuiltinOneArg,
    /// `func : BuiltinNoArgsOrOne expr`
    BuiltinOptionalWithArg,
    /// `func : BuiltinNoArgsOrOne`
    BuiltinOptionalBare,
    /// `func : BuiltinArgList arglist`
    BuiltinArgList,
    /// `func : Open expr With expr`
    OpenWith,
    /// `func : Open expr`
    Open,
    /// `func : TwoWordBuiltin Id arglist`
    TwoWordBuiltin,
    /// `globallist : Id`
    GlobalFirst,
    /// `globallist : globallist Comma Id`
    GlobalNext,
    /// `instancelist : Id`
    InstanceFirst,
    /// `instancelist : instancelist Comma Id`
    InstanceNext,
    /// `gotofunc : Go Loop`
    GoLoop,
    /// `gotofunc : Go Next`
    GoNext,
    /// `gotofunc : Go Previous`
    GoPrevious,
    /// `gotofunc : Go gotoframe`
    GoFrame,
    /// `gotofunc : Go gotoframe gotomovie`
    GoFrameMovie,
    /// `gotofunc : Go gotomovie`
    GoMovie,
    /// `gotoframe : Frame expr`
    FrameKeyword,
    /// `gotoframe : expr`
    FrameExpr,
    /// `gotomovie : Of Movie expr`
    MovieOf,
    /// `gotomovie : Movie expr`
    Movie,
    /// `playfunc : Play Done`
    PlayDone,
    /// `playfunc : Play gotoframe`
    PlayFrame,
    /// `playfunc : Play gotoframe gotomovie`
    PlayFrameMovie,
    /// `playfunc : Play gotomovie`
    PlayMovie,
    /// `defn : Macro Id macrostart begin argdef nl argstore stmtlist`
    DefineMacro,
    /// `defn : Factory Id`
    DefineFactory,
    /// `defn : Method Id methodstart begin argdef nl argstore stmtlist`
    DefineMethod,
    /// `defn : On Id handlerstart begin argdef nl argstore stmtlist EndClause`
    DefineHandler,
    /// `macrostart : /* empty */`
    MacroStart,
    /// `methodstart : /* empty */`
    MethodStart,
    /// `handlerstart : /* empty */`
    HandlerStart,
    /// `argdef : /* empty */`
    ArgDefEmpty,
    /// `argdef : Id`
    ArgDefFirst,
    /// `argdef : argdef Comma Id`
    ArgDefNext,
    /// `argdef : argdef nl Comma Id`
    ArgDefNextLine,
    /// `argstore : /* empty */`
    ArgStore,
    /// `macro : Id begin arglist`
    MacroCall,
    /// `arglist : /* empty */`
    ArgListEmpty,
    /// `arglist : expr`
    ArgListFirst,
    /// `arglist : arglist Comma expr`
    ArgListNext,
}

const ARG_DEF: Symbol = N(Nt::ArgDef);
const ARG_LIST: Symbol = N(Nt::ArgList);
const ARG_STORE: Symbol = N(Nt::ArgStore);
const ASGN: Symbol = N(Nt::Asgn);
const BEGIN: Symbol = N(Nt::Begin);
const COND: Symbol = N(Nt::Cond);
const DEFN: Symbol = N(Nt::Defn);
const ELSE_IF: Symbol = N(Nt::ElseIf);
const ELSE_IF_STMT: Symbol = N(Nt::ElseIfStmt);
const ELSE_IF_STMT_1: Symbol = N(Nt::ElseIfStmt1);
const ELSE_IF_STMT_ONE_LINER: Symbol = N(Nt::ElseIfStmtOneLiner);
const ELSE_IF_STMT_ONE_LINER_1: Symbol = N(Nt::ElseIfStmtOneLiner1);
const ELSE_STMT_ONE_LINER: Symbol = N(Nt::ElseStmtOneLiner);
const END: Symbol = N(Nt::End);
const EXPR: Symbol = N(Nt::Expr);
const FUNC: Symbol = N(Nt::Func);
const GLOBAL_LIST: Symbol = N(Nt::GlobalList);
const GOTO_FRAME: Symbol = N(Nt::GotoFrame);
const GOTO_FUNC: Symbol = N(Nt::GotoFunc);
const GOTO_MOVIE: Symbol = N(Nt::GotoMovie);
const HANDLER_START: Symbol = N(Nt::HandlerStart);
const IF: Symbol = N(Nt::If);
const IF_STMT: Symbol = N(Nt::IfStmt);
const INSTANCE_LIST: Symbol = N(Nt::InstanceList);
const MACRO: Symbol = N(Nt::Macro);
const MACRO_START: Symbol = N(Nt::MacroStart);
const METHOD_START: Symbol = N(Nt::MethodStart);
const NL: Symbol = N(Nt::Nl);
const PLAY_FUNC: Symbol = N(Nt::PlayFunc);
const PROGRAM: Symbol = N(Nt::Program);
const PROGRAM_LINE: Symbol = N(Nt::ProgramLine);
const REPEAT_WHILE: Symbol = N(Nt::RepeatWhile);
const REPEAT_WITH: Symbol = N(Nt::RepeatWith);
const STMT: Symbol = N(Nt::Stmt);
const STMT_LIST: Symbol = N(Nt::StmtList);
const STMT_ONE_LINER: Symbol = N(Nt::StmtOneLiner);
const WHEN: Symbol = N(Nt::When);

/// The productions of the scripting grammar.
pub static PRODUCTIONS: &[Production] = &[
    Production::new(Rule::Accept, Nt::Accept, &[PROGRAM]),
    Production::new(Rule::ProgramLines, Nt::Program, &[PROGRAM, NL, PROGRAM_LINE]),
    Production::new(Rule::ProgramFirstLine, Nt::Program, &[PROGRAM_LINE]),
    Production::new(Rule::Newline, Nt::Nl, &[T(Terminal::Newline)]),
    Production::new(Rule::LineEmpty, Nt::ProgramLine, &[]),
    Production::new(Rule::LineDefn, Nt::ProgramLine, &[DEFN]),
    Production::new(Rule::LineFunc, Nt::ProgramLine, &[FUNC]),
    Production::new(Rule::LineMacro, Nt::ProgramLine, &[MACRO]),
    Production::new(Rule::LineAsgn, Nt::ProgramLine, &[ASGN]),
    Production::new(Rule::LineStmt, Nt::ProgramLine, &[STMT]),
    Production::new(Rule::LineError, Nt::ProgramLine, &[T(Terminal::Error)]),
    Production::new(
        Rule::PutInto,
        Nt::Asgn,
        &[T(Terminal::Put), EXPR, T(Terminal::Into), T(Terminal::Id)],
    ),
    Production::new(
        Rule::PutAfter,
        Nt::Asgn,
        &[T(Terminal::Put), EXPR, T(Terminal::After), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::PutBefore,
        Nt::Asgn,
        &[T(Terminal::Put), EXPR, T(Terminal::Before), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::SetIdEq,
        Nt::Asgn,
        &[T(Terminal::Set), T(Terminal::Id), T(Terminal::Equals), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::SetTheEq,
        Nt::Asgn,
        &[T(Terminal::Set), T(Terminal::TheEntity), T(Terminal::Equals), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::SetTheOfEq,
        Nt::Asgn,
        &[T(Terminal::Set), T(Terminal::TheEntityWithId), EXPR, T(Terminal::Equals), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::SetIdTo,
        Nt::Asgn,
        &[T(Terminal::Set), T(Terminal::Id), T(Terminal::To), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::SetTheTo,
        Nt::Asgn,
        &[T(Terminal::Set), T(Terminal::TheEntity), T(Terminal::To), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(
        Rule::SetTheOfTo,
        Nt::Asgn,
        &[T(Terminal::Set), T(Terminal::TheEntityWithId), EXPR, T(Terminal::To), EXPR],
    )
    .with_prec(ASSIGNMENT),
    Production::new(Rule::OneLinerExpr, Nt::StmtOneLiner, &[EXPR]),
    Production::new(Rule::OneLinerFunc, Nt::StmtOneLiner, &[FUNC]),
    Production::new(Rule::StmtOneLiner, Nt::Stmt, &[STMT_ONE_LINER]),
    Production::new(Rule::StmtIf, Nt::Stmt, &[IF_STMT]),
    Production::new(
        Rule::RepeatWhileLoop,
        Nt::Stmt,
        &[REPEAT_WHILE, COND, STMT_LIST, END, T(Terminal::EndClause)],
    ),
    Production::new(
        Rule::RepeatWithUp,
        Nt::Stmt,
        &[
            REPEAT_WITH,
            T(Terminal::Equals),
            EXPR,
            END,
            T(Terminal::To),
            EXPR,
            END,
            STMT_LIST,
            END,
            T(Terminal::EndClause),
        ],
    ),
    Production::new(
        Rule::RepeatWithDown,
        Nt::Stmt,
        &[
            REPEAT_WITH,
            T(Terminal::Equals),
            EXPR,
            END,
            T(Terminal::Down),
            T(Terminal::To),
            EXPR,
            END,
            STMT_LIST,
            END,
            T(Terminal::EndClause),
        ],
    ),
    Production::new(Rule::WhenClause, Nt::Stmt, &[WHEN, EXPR, END]),
    Production::new(
        Rule::IfBlock,
        Nt::IfStmt,
        &[IF, COND, T(Terminal::Then), NL, STMT_LIST, END, T(Terminal::EndClause)],
    ),
    Production::new(
        Rule::IfBlockElse,
        Nt::IfStmt,
        &[
            IF,
            COND,
            T(Terminal::Then),
            NL,
            STMT_LIST,
            END,
            T(Terminal::NlElse),
            STMT_LIST,
            END,
            T(Terminal::EndClause),
        ],
    ),
    Production::new(
        Rule::IfBlockElseIf,
        Nt::IfStmt,
        &[
            IF,
            COND,
            T(Terminal::Then),
            NL,
            STMT_LIST,
            END,
            BEGIN,
            ELSE_IF_STMT,
            END,
            T(Terminal::EndClause),
        ],
    ),
    Production::new(
        Rule::IfOneLiner,
        Nt::IfStmt,
        &[IF, COND, T(Terminal::Then), BEGIN, STMT_ONE_LINER, END],
    ),
    Production::new(
        Rule::IfOneLinerElse,
        Nt::IfStmt,
        &[
            IF,
            COND,
            T(Terminal::Then),
            BEGIN,
            STMT_ONE_LINER,
            END,
            T(Terminal::NlElse),
            BEGIN,
            STMT_ONE_LINER,
            END,
        ],
    ),
    Production::new(
        Rule::IfOneLinerElseIf,
        Nt::IfStmt,
        &[
            IF,
            COND,
            T(Terminal::Then),
            BEGIN,
            STMT_ONE_LINER,
            END,
            ELSE_IF_STMT_ONE_LINER,
            END,
            ELSE_STMT_ONE_LINER,
            END,
        ],
    ),
    Production::new(Rule::ElseOneLinerEmpty, Nt::ElseStmtOneLiner, &[]),
    Production::new(
        Rule::ElseOneLiner,
        Nt::ElseStmtOneLiner,
        &[T(Terminal::NlElse), BEGIN, STMT_ONE_LINER],
    ),
    Production::new(Rule::ElseIfChain, Nt::ElseIfStmt, &[ELSE_IF_STMT, ELSE_IF_STMT_1]),
    Production::new(Rule::ElseIfFirst, Nt::ElseIfStmt, &[ELSE_IF_STMT_1]),
    Production::new(
        Rule::ElseIfOneLinerChain,
        Nt::ElseIfStmtOneLiner,
        &[ELSE_IF_STMT_ONE_LINER, ELSE_IF_STMT_ONE_LINER_1],
    ),
    Production::new(
        Rule::ElseIfOneLinerFirst,
        Nt::ElseIfStmtOneLiner,
        &[ELSE_IF_STMT_ONE_LINER_1],
    ),
    Production::new(
        Rule::ElseIfOneLinerClause,
        Nt::ElseIfStmtOneLiner1,
        &[ELSE_IF, COND, T(Terminal::Then), BEGIN, STMT, END],
    ),
    Production::new(Rule::ElseIfFromOneLiner, Nt::ElseIfStmt1, &[ELSE_IF_STMT_ONE_LINER]),
    Production::new(
        Rule::ElseIfBlockClause,
        Nt::ElseIfStmt1,
        &[ELSE_IF, COND, T(Terminal::Then), STMT_LIST, END],
    ),
    Production::new(Rule::CondExpr, Nt::Cond, &[EXPR]),
    Production::new(Rule::CondParen, Nt::Cond, &[T(Terminal::LParen), COND, T(Terminal::RParen)]),
    Production::new(
        Rule::RepeatWhileOpen,
        Nt::RepeatWhile,
        &[T(Terminal::Repeat), T(Terminal::While)],
    ),
    Production::new(
        Rule::RepeatWithOpen,
        Nt::RepeatWith,
        &[T(Terminal::Repeat), T(Terminal::With), T(Terminal::Id)],
    ),
    Production::new(Rule::IfOpen, Nt::If, &[T(Terminal::If)]),
    Production::new(Rule::ElseIfOpen, Nt::ElseIf, &[T(Terminal::NlElsIf)]),
    Production::new(Rule::Begin, Nt::Begin, &[]),
    Production::new(Rule::End, Nt::End, &[]),
    Production::new(Rule::StmtListEmpty, Nt::StmtList, &[]),
    Production::new(Rule::StmtListNewline, Nt::StmtList, &[STMT_LIST, NL]),
    Production::new(Rule::StmtListStmt, Nt::StmtList, &[STMT_LIST, STMT]),
    Production::new(
        Rule::WhenOpen,
        Nt::When,
        &[T(Terminal::When), T(Terminal::Id), T(Terminal::Then)],
    ),
    Production::new(Rule::ExprInt, Nt::Expr, &[T(Terminal::Int)]),
    Production::new(Rule::ExprFloat, Nt::Expr, &[T(Terminal::Float)]),
    Production::new(Rule::ExprSymbol, Nt::Expr, &[T(Terminal::Symbol)]),
    Production::new(Rule::ExprString, Nt::Expr, &[T(Terminal::String)]),
    Production::new(Rule::ExprBuiltinNoArgs, Nt::Expr, &[T(Terminal::BuiltinNoArgs)]),
    Production::new(
        Rule::ExprCall,
        Nt::Expr,
        &[T(Terminal::Id), T(Terminal::LParen), ARG_LIST, T(Terminal::RParen)],
    ),
    Production::new(Rule::ExprVar, Nt::Expr, &[T(Terminal::Id)]),
    Production::new(Rule::ExprTheEntity, Nt::Expr, &[T(Terminal::TheEntity)]),
    Production::new(
        Rule::ExprTheEntityWithId,
        Nt::Expr,
        &[T(Terminal::TheEntityWithId), EXPR],
    )
    .with_prec(UNARY),
    Production::new(Rule::ExprAsgn, Nt::Expr, &[ASGN]),
    Production::new(Rule::ExprAdd, Nt::Expr, &[EXPR, T(Terminal::Plus), EXPR]),
    Production::new(Rule::ExprSub, Nt::Expr, &[EXPR, T(Terminal::Minus), EXPR]),
    Production::new(Rule::ExprMul, Nt::Expr, &[EXPR, T(Terminal::Star), EXPR]),
    Production::new(Rule::ExprDiv, Nt::Expr, &[EXPR, T(Terminal::Slash), EXPR]),
    Production::new(Rule::ExprMod, Nt::Expr, &[EXPR, T(Terminal::Mod), EXPR]),
    Production::new(Rule::ExprGt, Nt::Expr, &[EXPR, T(Terminal::Gt), EXPR]),
    Production::new(Rule::ExprLt, Nt::Expr, &[EXPR, T(Terminal::Lt), EXPR]),
    Production::new(Rule::ExprEq, Nt::Expr, &[EXPR, T(Terminal::Equals), EXPR]),
    Production::new(Rule::ExprNeq, Nt::Expr, &[EXPR, T(Terminal::Neq), EXPR]),
    Production::new(Rule::ExprGe, Nt::Expr, &[EXPR, T(Terminal::Ge), EXPR]),
    Production::new(Rule::ExprLe, Nt::Expr, &[EXPR, T(Terminal::Le), EXPR]),
    Production::new(Rule::ExprAnd, Nt::Expr, &[EXPR, T(Terminal::And), EXPR]),
    Production::new(Rule::ExprOr, Nt::Expr, &[EXPR, T(Terminal::Or), EXPR]),
    Production::new(Rule::ExprNot, Nt::Expr, &[T(Terminal::Not), EXPR]),
    Production::new(Rule::ExprAmpersand, Nt::Expr, &[EXPR, T(Terminal::Ampersand), EXPR]),
    Production::new(Rule::ExprAfter, Nt::Expr, &[EXPR, T(Terminal::After), EXPR]),
    Production::new(Rule::ExprConcat, Nt::Expr, &[EXPR, T(Terminal::Concat), EXPR]),
    Production::new(Rule::ExprContains, Nt::Expr, &[EXPR, T(Terminal::Contains), EXPR]),
    Production::new(Rule::ExprStarts, Nt::Expr, &[EXPR, T(Terminal::Starts), EXPR]),
    Production::new(Rule::ExprPlus, Nt::Expr, &[T(Terminal::Plus), EXPR]).with_prec(UNARY),
    Production::new(Rule::ExprNegate, Nt::Expr, &[T(Terminal::Minus), EXPR]).with_prec(UNARY),
    Production::new(Rule::ExprParen, Nt::Expr, &[T(Terminal::LParen), EXPR, T(Terminal::RParen)]),
    Production::new(
        Rule::ExprIntersects,
        Nt::Expr,
        &[T(Terminal::Sprite), EXPR, T(Terminal::Intersects), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprWithin,
        Nt::Expr,
        &[T(Terminal::Sprite), EXPR, T(Terminal::Within), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprCharOf,
        Nt::Expr,
        &[T(Terminal::Char), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprCharToOf,
        Nt::Expr,
        &[T(Terminal::Char), EXPR, T(Terminal::To), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprItemOf,
        Nt::Expr,
        &[T(Terminal::Item), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprItemToOf,
        Nt::Expr,
        &[T(Terminal::Item), EXPR, T(Terminal::To), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprLineOf,
        Nt::Expr,
        &[T(Terminal::Line), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprLineToOf,
        Nt::Expr,
        &[T(Terminal::Line), EXPR, T(Terminal::To), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprWordOf,
        Nt::Expr,
        &[T(Terminal::Word), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(
        Rule::ExprWordToOf,
        Nt::Expr,
        &[T(Terminal::Word), EXPR, T(Terminal::To), EXPR, T(Terminal::Of), EXPR],
    )
    .with_prec(UNARY),
    Production::new(Rule::FuncPut, Nt::Func, &[T(Terminal::Put), EXPR]),
    Production::new(Rule::FuncGoto, Nt::Func, &[GOTO_FUNC]),
    Production::new(Rule::FuncPlay, Nt::Func, &[PLAY_FUNC]),
    Production::new(Rule::ExitRepeat, Nt::Func, &[T(Terminal::Exit), T(Terminal::Repeat)]),
    Production::new(Rule::Exit, Nt::Func, &[T(Terminal::Exit)]),
    Production::new(Rule::GlobalDecl, Nt::Func, &[T(Terminal::Global), GLOBAL_LIST]),
    Production::new(Rule::InstanceDecl, Nt::Func, &[T(Terminal::Instance), INSTANCE_LIST]),
    Production::new(Rule::BuiltinOneArg, Nt::Func, &[T(Terminal::BuiltinOneArg), EXPR]),
    Production::new(
        Rule::BuiltinOptionalWithArg,
        Nt::Func,
        &[T(Terminal::BuiltinNoArgsOrOne), EXPR],
    ),
    Production::new(Rule::BuiltinOptionalBare, Nt::Func, &[T(Terminal::BuiltinNoArgsOrOne)]),
    Production::new(Rule::BuiltinArgList, Nt::Func, &[T(Terminal::BuiltinArgList), ARG_LIST]),
    Production::new(Rule::OpenWith, Nt::Func, &[T(Terminal::Open), EXPR, T(Terminal::With), EXPR]),
    Production::new(Rule::Open, Nt::Func, &[T(Terminal::Open), EXPR]),
    Production::new(
        Rule::TwoWordBuiltin,
        Nt::Func,
        &[T(Terminal::TwoWordBuiltin), T(Terminal::Id), ARG_LIST],
    ),
    Production::new(Rule::GlobalFirst, Nt::GlobalList, &[T(Terminal::Id)]),
    Production::new(
        Rule::GlobalNext,
        Nt::GlobalList,
        &[GLOBAL_LIST, T(Terminal::Comma), T(Terminal::Id)],
    ),
    Production::new(Rule::InstanceFirst, Nt::InstanceList, &[T(Terminal::Id)]),
    Production::new(
        Rule::InstanceNext,
        Nt::InstanceList,
        &[INSTANCE_LIST, T(Terminal::Comma), T(Terminal::Id)],
    ),
    Production::new(Rule::GoLoop, Nt::GotoFunc, &[T(Terminal::Go), T(Terminal::Loop)]),
    Production::new(Rule::GoNext, Nt::GotoFunc, &[T(Terminal::Go), T(Terminal::Next)]),
    Production::new(Rule::GoPrevious, Nt::GotoFunc, &[T(Terminal::Go), T(Terminal::Previous)]),
    Production::new(Rule::GoFrame, Nt::GotoFunc, &[T(Terminal::Go), GOTO_FRAME]),
    Production::new(Rule::GoFrameMovie, Nt::GotoFunc, &[T(Terminal::Go), GOTO_FRAME, GOTO_MOVIE]),
    Production::new(Rule::GoMovie, Nt::GotoFunc, &[T(Terminal::Go), GOTO_MOVIE]),
    Production::new(Rule::FrameKeyword, Nt::GotoFrame, &[T(Terminal::Frame), EXPR]),
    Production::new(Rule::FrameExpr, Nt::GotoFrame, &[EXPR]),
    Production::new(Rule::MovieOf, Nt::GotoMovie, &[T(Terminal::Of), T(Terminal::Movie), EXPR]),
    Production::new(Rule::Movie, Nt::GotoMovie, &[T(Terminal::Movie), EXPR]),
    Production::new(Rule::PlayDone, Nt::PlayFunc, &[T(Terminal::Play), T(Terminal::Done)]),
    Production::new(Rule::PlayFrame, Nt::PlayFunc, &[T(Terminal::Play), GOTO_FRAME]),
    Production::new(
        Rule::PlayFrameMovie,
        Nt::PlayFunc,
        &[T(Terminal::Play), GOTO_FRAME, GOTO_MOVIE],
    ),
    Production::new(Rule::PlayMovie, Nt::PlayFunc, &[T(Terminal::Play), GOTO_MOVIE]),
    Production::new(
        Rule::DefineMacro,
        Nt::Defn,
        &[
            T(Terminal::Macro),
            T(Terminal::Id),
            MACRO_START,
            BEGIN,
            ARG_DEF,
            NL,
            ARG_STORE,
            STMT_LIST,
        ],
    ),
    Production::new(Rule::DefineFactory, Nt::Defn, &[T(Terminal::Factory), T(Terminal::Id)]),
    Production::new(
        Rule::DefineMethod,
        Nt::Defn,
        &[
            T(Terminal::Method),
            T(Terminal::Id),
            METHOD_START,
            BEGIN,
            ARG_DEF,
            NL,
            ARG_STORE,
            STMT_LIST,
        ],
    ),
    Production::new(
        Rule::DefineHandler,
        Nt::Defn,
        &[
            T(Terminal::On),
            T(Terminal::Id),
            HANDLER_START,
            BEGIN,
            ARG_DEF,
            NL,
            ARG_STORE,
            STMT_LIST,
            T(Terminal::EndClause),
        ],
    ),
    Production::new(Rule::MacroStart, Nt::MacroStart, &[]),
    Production::new(Rule::MethodStart, Nt::MethodStart, &[]),
    Production::new(Rule::HandlerStart, Nt::HandlerStart, &[]),
    Production::new(Rule::ArgDefEmpty, Nt::ArgDef, &[]),
    Production::new(Rule::ArgDefFirst, Nt::ArgDef, &[T(Terminal::Id)]),
    Production::new(Rule::ArgDefNext, Nt::ArgDef, &[ARG_DEF, T(Terminal::Comma), T(Terminal::Id)]),
    Production::new(
        Rule::ArgDefNextLine,
        Nt::ArgDef,
        &[ARG_DEF, NL, T(Terminal::Comma), T(Terminal::Id)],
    ),
    Production::new(Rule::ArgStore, Nt::ArgStore, &[]),
    Production::new(Rule::MacroCall, Nt::Macro, &[T(Terminal::Id), BEGIN, ARG_LIST]),
    Production::new(Rule::ArgListEmpty, Nt::ArgList, &[]),
    Production::new(Rule::ArgListFirst, Nt::ArgList, &[EXPR]),
    Production::new(Rule::ArgListNext, Nt::ArgList, &[ARG_LIST, T(Terminal::Comma), EXPR]),
];
