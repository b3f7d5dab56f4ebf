//! Token and bytecode builders shared by the compiler tests.

use marquee_bytecode::{Inst, Opcode, encoding};
use marquee_compiler::{CompilationUnit, CompileOptions, Session};
use marquee_foundation::{EntityRef, Span, Terminal, Token, TokenStream};

/// Builds a token stream with plausible positions, one column per token.
#[derive(Default)]
pub struct Src {
    tokens: Vec<Token>,
    line: u32,
    column: u32,
}

impl Src {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    fn push(mut self, make: impl FnOnce(Span) -> Token) -> Self {
        let at = self.tokens.len();
        let token = make(Span::new(at, at + 1, self.line, self.column));
        let newline = token.kind == Terminal::Newline;
        self.tokens.push(token);
        if newline {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self
    }

    pub fn kw(self, kind: Terminal) -> Self {
        self.push(|span| Token::keyword(kind, span))
    }

    pub fn nl(self) -> Self {
        self.kw(Terminal::Newline)
    }

    pub fn id(self, name: &str) -> Self {
        self.push(|span| Token::id(name, span))
    }

    pub fn int(self, n: i32) -> Self {
        self.push(|span| Token::int(n, span))
    }

    pub fn float(self, x: f64) -> Self {
        self.push(|span| Token::float(x, span))
    }

    pub fn string(self, text: &str) -> Self {
        self.push(|span| Token::string(text, span))
    }

    pub fn text(self, kind: Terminal, text: &str) -> Self {
        self.push(|span| Token::text(kind, text, span))
    }

    pub fn end(self, word: &str) -> Self {
        self.text(Terminal::EndClause, word)
    }

    pub fn entity(self, entity: u32, field: u32) -> Self {
        self.push(|span| Token::entity(Terminal::TheEntity, EntityRef::new(entity, field), span))
    }

    pub fn tokens(self) -> Vec<Token> {
        self.tokens
    }

    pub fn compile_with(self, options: CompileOptions) -> marquee_foundation::Result<CompilationUnit> {
        Session::new(options).compile(TokenStream::from(self.tokens))
    }

    /// Compiles with default options; the unit must not abort.
    pub fn compile(self) -> CompilationUnit {
        self.compile_with(CompileOptions::default()).unwrap()
    }
}

/// Builds expected instruction words.
#[derive(Default)]
pub struct Words(Vec<Inst>);

impl Words {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, op: Opcode) -> Self {
        self.0.push(op.word());
        self
    }

    pub fn word(mut self, word: Inst) -> Self {
        self.0.push(word);
        self
    }

    pub fn int(mut self, n: i32) -> Self {
        self.0.push(encoding::encode_int(n));
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        encoding::encode_name(name, &mut self.0);
        self
    }

    /// `ConstPush n`
    pub fn push(self, n: i32) -> Self {
        self.op(Opcode::ConstPush).int(n)
    }

    /// `op name`
    pub fn named(self, op: Opcode, name: &str) -> Self {
        self.op(op).name(name)
    }

    pub fn build(self) -> Vec<Inst> {
        self.0
    }
}

/// Opcodes of a unit's disassembly, in order.
pub fn opcodes(unit: &CompilationUnit) -> Vec<Opcode> {
    marquee_bytecode::disassemble(&unit.script)
        .iter()
        .filter_map(marquee_bytecode::Instruction::opcode)
        .collect()
}
