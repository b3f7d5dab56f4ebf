//! Token streams shared by the integration tests.

use marquee_foundation::{Span, Terminal, Token};

/// Appends tokens line by line with real positions.
pub struct Lines {
    tokens: Vec<Token>,
    line: u32,
    column: u32,
}

impl Lines {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            line: 1,
            column: 1,
        }
    }

    fn push(&mut self, make: impl FnOnce(Span) -> Token) -> &mut Self {
        let at = self.tokens.len();
        self.tokens
            .push(make(Span::new(at, at + 1, self.line, self.column)));
        self.column += 1;
        self
    }

    pub fn kw(&mut self, kind: Terminal) -> &mut Self {
        self.push(|span| Token::keyword(kind, span))
    }

    pub fn id(&mut self, name: &str) -> &mut Self {
        self.push(|span| Token::id(name, span))
    }

    pub fn int(&mut self, n: i32) -> &mut Self {
        self.push(|span| Token::int(n, span))
    }

    pub fn end(&mut self, word: &str) -> &mut Self {
        self.push(|span| Token::text(Terminal::EndClause, word, span))
    }

    pub fn nl(&mut self) -> &mut Self {
        self.kw(Terminal::Newline);
        self.line += 1;
        self.column = 1;
        self
    }

    pub fn build(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }
}

/// A handler, a factory, and a method of that factory.
///
/// ```text
/// on start
///   put bird() into b
/// end start
/// factory Bird
/// method mFly a, b
///   put me(1) into a
///   put moveIt(2, 3)
/// ```
pub fn aviary() -> Vec<Token> {
    Lines::new()
        .kw(Terminal::On)
        .id("start")
        .nl()
        .kw(Terminal::Put)
        .id("bird")
        .kw(Terminal::LParen)
        .kw(Terminal::RParen)
        .kw(Terminal::Into)
        .id("b")
        .nl()
        .end("start")
        .nl()
        .kw(Terminal::Factory)
        .id("Bird")
        .nl()
        .kw(Terminal::Method)
        .id("mFly")
        .id("a")
        .kw(Terminal::Comma)
        .id("b")
        .nl()
        .kw(Terminal::Put)
        .id("me")
        .kw(Terminal::LParen)
        .int(1)
        .kw(Terminal::RParen)
        .kw(Terminal::Into)
        .id("a")
        .nl()
        .kw(Terminal::Put)
        .id("moveIt")
        .kw(Terminal::LParen)
        .int(2)
        .kw(Terminal::Comma)
        .int(3)
        .kw(Terminal::RParen)
        .nl()
        .build()
}

/// A top-level script with one syntax error on its first line.
pub fn one_bad_line() -> Vec<Token> {
    Lines::new()
        .kw(Terminal::Put)
        .kw(Terminal::RParen)
        .kw(Terminal::Into)
        .id("x")
        .nl()
        .kw(Terminal::Put)
        .int(1)
        .kw(Terminal::Into)
        .id("y")
        .nl()
        .build()
}
