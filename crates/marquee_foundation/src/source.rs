//! The pull interface between a lexer and the parser.

use crate::span::Span;
use crate::token::Token;

/// A supplier of tokens.
///
/// The parser calls [`TokenSource::next_token`] only when its tables need a
/// lookahead. Once input is exhausted a source must keep returning an
/// `Eof` token.
pub trait TokenSource {
    /// Returns the next token.
    fn next_token(&mut self) -> Token;
}

/// A [`TokenSource`] over any iterator of tokens.
///
/// Yields `Eof` forever once the iterator is exhausted, positioned just
/// after the last token seen.
#[derive(Debug)]
pub struct TokenStream<I> {
    tokens: I,
    last: Span,
    pulled: usize,
}

impl<I: Iterator<Item = Token>> TokenStream<I> {
    /// Wraps an iterator of tokens.
    pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            last: Span::at_start(),
            pulled: 0,
        }
    }

    /// Returns how many tokens have been pulled so far, `Eof` included.
    #[must_use]
    pub const fn pulled(&self) -> usize {
        self.pulled
    }
}

impl<I: Iterator<Item = Token>> TokenSource for TokenStream<I> {
    fn next_token(&mut self) -> Token {
        self.pulled += 1;
        match self.tokens.next() {
            Some(token) => {
                self.last = token.span;
                token
            }
            None => Token::eof(self.last.empty_after()),
        }
    }
}

impl From<Vec<Token>> for TokenStream<std::vec::IntoIter<Token>> {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}
